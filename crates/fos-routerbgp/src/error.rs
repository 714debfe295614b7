//! Error types for resource operations.

use fos_client::ClientError;
use fos_objmap::MapError;
use thiserror::Error;

/// Result type alias for resource operations.
pub type ResourceResult<T> = Result<T, ResourceError>;

/// Errors returned by resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// A context parameter was set neither on the resource nor the provider.
    #[error("Missing context parameter '{param}': set it on the resource or the provider")]
    MissingContext { param: &'static str },

    /// The object client failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Mapping between wire and attribute tree failed.
    #[error("Failed to map object state: {0}")]
    State(#[from] MapError),

    /// Provider, resource or state configuration is invalid.
    #[error("Invalid configuration at {path}: {message}")]
    Config { path: String, message: String },
}

impl ResourceError {
    pub fn missing_context(param: &'static str) -> Self {
        Self::MissingContext { param }
    }

    pub fn config(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }
}
