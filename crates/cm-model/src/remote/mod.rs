//! Remote (wire) representation
//!
//! These types serialize to the JSON payloads of the remote management API
//! and are rebuilt from scratch on every read.

mod content_type;
mod editor_interface;
mod validation;

pub use content_type::{RemoteContentModel, RemoteField, RemoteItems, Sys};
pub use editor_interface::{EditorInterface, RemoteControl, RemoteSidebarWidget};
pub use validation::FieldValidation;
