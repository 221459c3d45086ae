//! Error type shared by every farm API call.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The API rejected the bearer token. The global redirect has already run.
    #[error("unauthorized")]
    Unauthorized,

    /// The API returned a non-success status other than 401.
    #[error("request failed: status {status}")]
    Status { status: u16, message: String },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be decoded.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// HTTP is only available in the browser build.
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Text suitable for the error banner.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized => "Sesión expirada. Inicie sesión nuevamente.".to_owned(),
            ApiError::Status { message, .. } if !message.trim().is_empty() => message.clone(),
            ApiError::Status { status, .. } => format!("Error del servidor ({status})."),
            ApiError::Network(_) => "No se pudo conectar con el servidor.".to_owned(),
            ApiError::Decode(_) => "Respuesta inesperada del servidor.".to_owned(),
            ApiError::Unavailable => "Operación no disponible.".to_owned(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// Pull a human-readable message out of an error response body.
///
/// The API answers with either plain text, `{"message": ...}`, or an
/// ASP.NET validation document carrying `title`.
#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn body_message(body: &str) -> String {
    let trimmed = body.trim();
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => ["message", "mensaje", "title"]
            .iter()
            .find_map(|key| map.get(*key).and_then(serde_json::Value::as_str))
            .unwrap_or_default()
            .to_owned(),
        Ok(serde_json::Value::String(text)) => text,
        Ok(_) => String::new(),
        Err(_) => trimmed.to_owned(),
    }
}
