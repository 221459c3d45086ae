//! Startup failures of the host binary.

/// Errors that stop the server before or while serving.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("invalid PORT {value:?}: expected an integer between 1 and 65535")]
    InvalidPort { value: String },
    #[error("leptos configuration: {0}")]
    Leptos(String),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server failed: {0}")]
    Serve(#[source] std::io::Error),
}
