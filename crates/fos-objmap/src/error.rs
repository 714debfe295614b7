//! Error types for object mapping.
//!
//! Mapping between wire objects and attribute trees only fails when a value
//! cannot be assigned to the kind its descriptor declares, or when an
//! attribute tree names something the descriptor table does not know.
//! All errors implement `std::error::Error` via `thiserror`.

use thiserror::Error;

/// Result type alias for mapping operations.
pub type MapResult<T> = Result<T, MapError>;

/// Errors that can occur while flattening, expanding or decoding objects.
#[derive(Debug, Error)]
pub enum MapError {
    /// The attribute tree names a field the descriptor table does not have.
    #[error("Unknown attribute '{path}'")]
    UnknownAttribute {
        /// Dotted attribute path.
        path: String,
    },

    /// A wire value could not be assigned to the declared field kind,
    /// neither directly nor through an alternate representation.
    #[error("Cannot assign value at '{path}': expected {expected}, got {actual}")]
    Assign {
        /// Dotted attribute path.
        path: String,
        /// Kind the descriptor declares.
        expected: &'static str,
        /// Rendered wire value.
        actual: String,
    },

    /// An attribute value has the wrong shape for its field.
    #[error("Invalid value for '{path}': {message}")]
    InvalidValue {
        /// Dotted attribute path.
        path: String,
        /// Error message.
        message: String,
    },

    /// A block record was not a JSON object.
    #[error("Expected an object at '{path}'")]
    NotAnObject {
        /// Dotted attribute path.
        path: String,
    },
}

impl MapError {
    /// Creates an unknown attribute error.
    pub fn unknown_attribute(path: impl Into<String>) -> Self {
        Self::UnknownAttribute { path: path.into() }
    }

    /// Creates an assignment error.
    pub fn assign(path: impl Into<String>, expected: &'static str, actual: impl ToString) -> Self {
        Self::Assign {
            path: path.into(),
            expected,
            actual: actual.to_string(),
        }
    }

    /// Creates an invalid value error.
    pub fn invalid_value(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a not-an-object error.
    pub fn not_an_object(path: impl Into<String>) -> Self {
        Self::NotAnObject { path: path.into() }
    }

    /// Returns the attribute path the error refers to.
    pub fn path(&self) -> &str {
        match self {
            MapError::UnknownAttribute { path }
            | MapError::Assign { path, .. }
            | MapError::InvalidValue { path, .. }
            | MapError::NotAnObject { path } => path,
        }
    }
}
