//! Draft and import between the declared and the remote representation
//!
//! Every function here produces a new value. Nothing is mutated in place, so
//! state read in one reconciliation cycle cannot leak into the next.

mod content_type;
mod field;

pub use content_type::{draft_content_type, draft_editor_interface, import_content_type};
pub use field::{draft_field, import_field};

pub(crate) use field::{draft_rules, non_empty};
