//! Error types for management API calls.

use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// JSON-RPC status code for a missing object.
pub const STATUS_OBJECT_NOT_FOUND: i64 = -3;

/// Errors returned by an [`ObjectClient`](crate::ObjectClient).
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The HTTP layer rejected the request.
    #[error("HTTP {status} from {url}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Request URL.
        url: String,
    },

    /// The API answered with a non-zero status.
    #[error("API error {code} for {url}: {message}")]
    Status {
        /// API status code.
        code: i64,
        /// API status message.
        message: String,
        /// Object URL the status refers to.
        url: String,
    },

    /// The response body was not valid JSON.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response was JSON but not a JSON-RPC result.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The client configuration is unusable.
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Creates an API status error.
    pub fn status(code: i64, message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Status {
            code,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Returns true if the API reported the object as missing.
    ///
    /// Only the JSON-RPC status counts; an HTTP 404 means the endpoint
    /// itself is wrong and stays an error.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ClientError::Status {
                code: STATUS_OBJECT_NOT_FOUND,
                ..
            }
        )
    }

    /// Returns true for failures that happened before the API answered.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}
