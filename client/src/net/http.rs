//! Single request pipeline for the farm API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every endpoint in `api` goes through `ApiClient::execute`, which attaches
//! the bearer token, classifies the response status, and runs the installed
//! unauthorized hook on a 401 before the caller sees the error.
//!
//! DESIGN
//! ======
//! The hook is installed once by the app root. It clears credentials and
//! performs a hard navigation to `/login`, so screens never handle expired
//! sessions themselves; they only see `ApiError::Unauthorized` and stop.
//!
//! ERROR HANDLING
//! ==============
//! Transport, status, and decode failures map to `ApiError` variants.
//! Nothing here retries.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::sync::Arc;

use leptos::prelude::*;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::auth::token_store::TokenStore;
use crate::config::ApiConfig;
use crate::state::auth::Session;

/// Outcome class of an HTTP status code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseClass {
    Success,
    Unauthorized,
    Failed(u16),
}

pub fn classify_status(status: u16) -> ResponseClass {
    match status {
        200..=299 => ResponseClass::Success,
        401 => ResponseClass::Unauthorized,
        other => ResponseClass::Failed(other),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
        }
    }
}

/// Whether a request carries the session token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestAuth {
    /// Attach the bearer token and route 401s to the unauthorized hook.
    Bearer,
    /// Send without credentials; a 401 is an ordinary failure (login).
    Anonymous,
}

/// Callback run when any authenticated request comes back 401.
pub type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

struct ClientInner {
    config: ApiConfig,
    store: TokenStore,
    on_unauthorized: Option<UnauthorizedHook>,
}

/// Reactive-owner-scoped handle to the API pipeline.
#[derive(Clone, Copy)]
pub struct ApiClient {
    inner: StoredValue<ClientInner>,
}

impl ApiClient {
    pub fn new(config: ApiConfig, store: TokenStore) -> Self {
        Self { inner: StoredValue::new(ClientInner { config, store, on_unauthorized: None }) }
    }

    pub fn config(&self) -> ApiConfig {
        self.inner.with_value(|c| c.config.clone())
    }

    /// Replace the unauthorized hook.
    pub fn set_unauthorized_hook(&self, hook: UnauthorizedHook) {
        self.inner.update_value(|c| c.on_unauthorized = Some(hook));
    }

    /// `Authorization` header value for the stored token, if any.
    pub fn bearer_header(&self) -> Option<String> {
        self.inner.with_value(|c| c.store.read()).map(|token| format!("Bearer {token}"))
    }

    /// Classify `status` and fire the unauthorized hook when it applies.
    #[cfg(any(test, feature = "hydrate"))]
    pub(crate) fn observe_status(&self, status: u16, auth: RequestAuth) -> ResponseClass {
        let class = classify_status(status);
        if class == ResponseClass::Unauthorized && auth == RequestAuth::Bearer {
            let hook = self.inner.with_value(|c| c.on_unauthorized.clone());
            match hook {
                Some(hook) => hook(),
                None => log::warn!("401 received with no unauthorized hook installed"),
            }
        }
        class
    }

    /// Map a classified response to the caller's result.
    #[cfg(any(test, feature = "hydrate"))]
    pub(crate) fn finish(&self, status: u16, auth: RequestAuth, body: String) -> Result<String, ApiError> {
        match self.observe_status(status, auth) {
            ResponseClass::Success => Ok(body),
            ResponseClass::Unauthorized if auth == RequestAuth::Bearer => Err(ApiError::Unauthorized),
            ResponseClass::Unauthorized | ResponseClass::Failed(_) => {
                Err(ApiError::Status { status, message: super::error::body_message(&body) })
            }
        }
    }

    /// Send one request and return the raw response body.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        auth: RequestAuth,
    ) -> Result<String, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::RequestBuilder;

            let url = self.inner.with_value(|c| c.config.url(path));
            let mut builder = match method {
                Method::Get => RequestBuilder::new(&url).method(gloo_net::http::Method::GET),
                Method::Post => RequestBuilder::new(&url).method(gloo_net::http::Method::POST),
                Method::Put => RequestBuilder::new(&url).method(gloo_net::http::Method::PUT),
            };
            if auth == RequestAuth::Bearer {
                if let Some(header) = self.bearer_header() {
                    builder = builder.header("Authorization", &header);
                }
            }
            let request = match body {
                Some(json) => builder
                    .header("Content-Type", "application/json")
                    .body(json)
                    .map_err(|e| ApiError::Network(e.to_string()))?,
                None => builder.build().map_err(|e| ApiError::Network(e.to_string()))?,
            };
            let resp = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            log::debug!("{} {path} -> {status}", method.as_str());
            self.finish(status, auth, text)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (method, path, body, auth);
            Err(ApiError::Unavailable)
        }
    }

    /// Send a request and decode the JSON response.
    pub async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = encode_body(body)?;
        let text = self.execute(method, path, payload, RequestAuth::Bearer).await?;
        decode_body(&text)
    }

    /// Send a request whose response body is ignored.
    pub async fn send_unit<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let payload = encode_body(body)?;
        self.execute(method, path, payload, RequestAuth::Bearer).await.map(|_| ())
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send::<(), T>(Method::Get, path, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.send_unit(Method::Post, path, Some(body)).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.send_unit(Method::Put, path, Some(body)).await
    }

    /// `PUT` with no request body.
    pub async fn put_empty(&self, path: &str) -> Result<(), ApiError> {
        self.send_unit::<()>(Method::Put, path, None).await
    }
}

pub(crate) fn encode_body<B: Serialize + ?Sized>(body: Option<&B>) -> Result<Option<String>, ApiError> {
    body.map(|b| serde_json::to_string(b).map_err(|e| ApiError::Decode(e.to_string())))
        .transpose()
}

pub(crate) fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Route 401s to a logout plus a hard navigation to `/login`.
///
/// The hard navigation resets every page-local signal, matching what a user
/// sees after a fresh visit with no token.
pub fn install_unauthorized_redirect(client: ApiClient, session: Session) {
    client.set_unauthorized_hook(Arc::new(move || {
        session.logout();
        // The logout also wakes `RequireAuth`'s soft redirect; this hard one
        // supersedes it and reloads the app from `/login`.
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href("/login");
            }
        }
    }));
}
