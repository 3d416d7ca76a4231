//! Remote failure classification and the structured error payload

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RemoteError {
    /// A write carried a version older than the stored one.
    #[error("Version conflict on {id}: submitted version {submitted}, current version {current}")]
    Conflict {
        id: String,
        submitted: u64,
        current: u64,
    },

    #[error("Not found: {id}")]
    NotFound { id: String },

    /// The remote side rejected the payload and explained why.
    #[error(transparent)]
    Validation(#[from] ErrorResponse),

    /// Anything the transport could not classify.
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Error body returned by the remote API.
///
/// ```json
/// {"message": "Validation error", "details": {"errors": [{"path": ["fields", 0], "details": "..."}]}}
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorDetails {
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Segments are strings or array indices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,
    pub details: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }

    pub fn with_detail(mut self, detail: ErrorDetail) -> Self {
        self.details
            .get_or_insert_with(ErrorDetails::default)
            .errors
            .push(detail);
        self
    }
}

impl ErrorDetail {
    pub fn new(details: impl Into<String>) -> Self {
        Self {
            path: None,
            details: details.into(),
        }
    }

    pub fn at<I, V>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.path = Some(path.into_iter().map(Into::into).collect());
        self
    }

    /// Path segments joined with dots; empty without a path.
    pub fn dotted_path(&self) -> String {
        let Some(path) = &self.path else {
            return String::new();
        };

        path.iter()
            .map(|segment| match segment {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".")
    }
}
