//! Drift detection
//!
//! Comparison never fails. Anything that cannot be compared, such as a rule
//! that does not draft or sidebar settings that do not decode, counts as a
//! difference.

mod content_type;
mod field;

pub use content_type::{
    content_type_differences, content_type_equal, editor_interface_differences,
    editor_interface_equal,
};
pub use field::{FieldAttribute, field_equal, field_mismatch, items_equal, rules_equal};

use std::fmt;

/// One way the remote state departs from the declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Difference {
    Name { desired: String, remote: String },
    DisplayField { desired: String, remote: String },
    Description,
    FieldCount { desired: usize, remote: usize },
    FieldMissing { field: String },
    FieldChanged { field: String, attribute: FieldAttribute },
    /// Same content, different position.
    FieldMoved { field: String, from: usize, to: usize },
    ControlCount { desired: usize, remote: usize },
    ControlMissing { field: String },
    ControlChanged { field: String },
    SidebarCount { desired: usize, remote: usize },
    SidebarMissing { widget: String },
    SidebarMoved { widget: String, from: usize, to: usize },
    SidebarChanged { widget: String },
}

impl Difference {
    /// Whether the difference lives in the editor interface rather than the
    /// content type.
    pub fn is_editor_interface(&self) -> bool {
        self.is_control() || self.is_sidebar()
    }

    pub fn is_control(&self) -> bool {
        matches!(
            self,
            Difference::ControlCount { .. }
                | Difference::ControlMissing { .. }
                | Difference::ControlChanged { .. }
        )
    }

    pub fn is_sidebar(&self) -> bool {
        matches!(
            self,
            Difference::SidebarCount { .. }
                | Difference::SidebarMissing { .. }
                | Difference::SidebarMoved { .. }
                | Difference::SidebarChanged { .. }
        )
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difference::Name { desired, remote } => {
                write!(f, "name is '{remote}', expected '{desired}'")
            }
            Difference::DisplayField { desired, remote } => {
                write!(f, "display field is '{remote}', expected '{desired}'")
            }
            Difference::Description => write!(f, "description differs"),
            Difference::FieldCount { desired, remote } => {
                write!(f, "{remote} fields remote, {desired} declared")
            }
            Difference::FieldMissing { field } => write!(f, "field '{field}' is missing"),
            Difference::FieldChanged { field, attribute } => {
                write!(f, "field '{field}' differs in {attribute}")
            }
            Difference::FieldMoved { field, from, to } => {
                write!(f, "field '{field}' is at position {from}, expected {to}")
            }
            Difference::ControlCount { desired, remote } => {
                write!(f, "{remote} bound controls remote, {desired} declared")
            }
            Difference::ControlMissing { field } => {
                write!(f, "control for field '{field}' is missing")
            }
            Difference::ControlChanged { field } => {
                write!(f, "control for field '{field}' differs")
            }
            Difference::SidebarCount { desired, remote } => {
                write!(f, "{remote} sidebar widgets remote, {desired} declared")
            }
            Difference::SidebarMissing { widget } => {
                write!(f, "sidebar widget '{widget}' is missing")
            }
            Difference::SidebarMoved { widget, from, to } => {
                write!(f, "sidebar widget '{widget}' is at position {from}, expected {to}")
            }
            Difference::SidebarChanged { widget } => {
                write!(f, "sidebar widget '{widget}' differs")
            }
        }
    }
}
