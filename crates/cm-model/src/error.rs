//! Error types for cm-model

use crate::field_type::FieldType;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported validation used: {kind}")]
    UnsupportedValidation { kind: String },

    #[error("Validation rule on field {field} declares more than one kind: {kinds}")]
    AmbiguousValidation { field: String, kinds: String },

    #[error("Duplicate field id {field} in content type {content_type}")]
    DuplicateFieldId { content_type: String, field: String },

    #[error("Field {field} has type {field_type}, which is not supported")]
    UnsupportedFieldType { field: String, field_type: String },

    #[error("Field {field} has type Array but declares no items")]
    MissingItems { field: String },

    #[error("Field {field} has type {field_type} and cannot declare items")]
    UnexpectedItems { field: String, field_type: FieldType },

    #[error("Field {field} has type {field_type} and cannot declare a link type")]
    UnexpectedLinkType { field: String, field_type: FieldType },

    #[error("Invalid settings for sidebar widget {widget}: {message}")]
    InvalidSidebarSettings { widget: String, message: String },

    #[error("Duplicate sidebar widget {widget}")]
    DuplicateSidebarWidget { widget: String },
}
