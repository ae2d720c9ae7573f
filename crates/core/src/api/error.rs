//! Error types for SiYuan API operations.

use crate::config::ConfigError;

/// Error from SiYuan API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request could not be sent or the connection failed.
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: ureq::Error,
    },

    /// Server answered with an HTTP error status.
    #[error("API error ({path}): HTTP {status}: {message}")]
    Http { path: String, status: u16, message: String },

    /// Server answered with a non-zero envelope code.
    #[error("API error ({path}): code {code}: {message}")]
    Api { path: String, code: i64, message: String },

    /// Response body did not have the expected shape.
    #[error("unexpected response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A lookup (e.g. by human-readable path) found nothing.
    #[error("not found: {0}")]
    NotFound(String),

    /// Client configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
