//! Content model types for content-model-sync.
//!
//! This crate defines both sides of a reconciliation:
//!
//! - [`desired`] - the user-declared shape of a content type (fields,
//!   validation rules, control bindings, sidebar widgets)
//! - [`remote`] - the wire shape exchanged with the remote management API,
//!   including the independently versioned editor interface
//!
//! Validation rules are the one place where both sides meet inside this
//! crate: a declared [`ValidationRule`] drafts into exactly one
//! [`FieldValidation`] variant and imports back from it.

pub mod desired;
pub mod error;
pub mod field_type;
pub mod remote;
pub mod validation;

pub use desired::{
    ContentModel, Control, DefaultValue, Field, Items, Sidebar, SidebarSettings, flatten_settings,
};
pub use error::{Error, Result};
pub use field_type::FieldType;
pub use remote::{
    EditorInterface, FieldValidation, RemoteContentModel, RemoteControl, RemoteField, RemoteItems,
    RemoteSidebarWidget, Sys,
};
pub use validation::{Bounds, Regexp, ValidationKind, ValidationRule};
