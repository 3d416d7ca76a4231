//! Error types for cm-reconcile

use crate::remote::RemoteError;

/// Result type for cm-reconcile operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while mapping or reconciling content types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The declaration itself is invalid, or names a validation kind the
    /// mapper cannot express
    #[error(transparent)]
    Model(#[from] cm_model::Error),

    /// A remote default value is neither a string nor a boolean
    #[error("The default value type {value_type} of field {field} is not supported")]
    UnsupportedDefaultValueType { field: String, value_type: String },

    /// A remote default value map mixes scalar types
    #[error("Default values of field {field} mix {expected} and {found} values")]
    MixedDefaultValueTypes {
        field: String,
        expected: String,
        found: String,
    },

    /// Sidebar settings text is not a JSON object
    #[error("Invalid settings for sidebar widget {widget}: {message}")]
    InvalidSidebarSettings { widget: String, message: String },

    /// An operation needs a content type id that was never assigned
    #[error("Content type {name} has no id")]
    MissingId { name: String },

    /// Failure reported by the remote API
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Coarse classification that retry and display policies key off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A validation or default value type the model has no variant for.
    /// Needs a code change; never retried.
    UnsupportedVariant,
    /// Stale version on write; re-read, recompute drift, then retry.
    Conflict,
    /// The content type is gone remotely.
    NotFound,
    /// The remote side rejected the payload with details.
    RemoteValidation,
    /// Opaque transport failure.
    Transport,
    /// The declaration is malformed.
    InvalidInput,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Model(cm_model::Error::UnsupportedValidation { .. })
            | Error::Model(cm_model::Error::UnsupportedFieldType { .. })
            | Error::UnsupportedDefaultValueType { .. }
            | Error::MixedDefaultValueTypes { .. } => ErrorKind::UnsupportedVariant,
            Error::Model(_) | Error::InvalidSidebarSettings { .. } | Error::MissingId { .. } => {
                ErrorKind::InvalidInput
            }
            Error::Remote(RemoteError::Conflict { .. }) => ErrorKind::Conflict,
            Error::Remote(RemoteError::NotFound { .. }) => ErrorKind::NotFound,
            Error::Remote(RemoteError::Validation(_)) => ErrorKind::RemoteValidation,
            Error::Remote(RemoteError::Transport(_)) | Error::Json(_) => ErrorKind::Transport,
        }
    }

    /// Only a version conflict can succeed on a later attempt without a
    /// change to code or declaration.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }
}
