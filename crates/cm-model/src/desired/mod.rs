//! Desired-state representation
//!
//! These are the values a user declares. They are immutable inputs to a
//! reconciliation cycle; importing remote state builds new instances.

mod content_model;
mod field;
mod sidebar;

pub use content_model::ContentModel;
pub use field::{Control, DefaultValue, Field, Items};
pub use sidebar::{Sidebar, SidebarSettings, flatten_settings};
