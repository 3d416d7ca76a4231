//! Declared content types

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::field::Field;
use super::sidebar::Sidebar;
use crate::error::{Error, Result};
use crate::field_type::FieldType;
use crate::validation::ValidationRule;

/// The desired state of one content type.
///
/// # Example TOML
///
/// ```toml
/// [[content_type]]
/// id = "article"
/// name = "Article"
/// display_field = "title"
///
/// [[content_type.fields]]
/// id = "title"
/// name = "Title"
/// type = "Symbol"
/// required = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentModel {
    /// `None` until the remote side has assigned or accepted an id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub display_field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Version of the content type last observed remotely.
    #[serde(default)]
    pub version: u64,
    /// Version of the editor interface last observed remotely.
    #[serde(default)]
    pub version_controls: u64,
    /// Order matters: a moved field is drift.
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Order matters: a moved widget is drift.
    #[serde(default)]
    pub sidebar: Vec<Sidebar>,
}

impl ContentModel {
    pub fn new(name: impl Into<String>, display_field: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            display_field: display_field.into(),
            description: None,
            version: 0,
            version_controls: 0,
            fields: Vec::new(),
            sidebar: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_sidebar(mut self, sidebar: Sidebar) -> Self {
        self.sidebar.push(sidebar);
        self
    }

    /// The id if set and non-empty.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// A label for logs and errors: the id when known, the name otherwise.
    pub fn label(&self) -> &str {
        self.id().unwrap_or(&self.name)
    }

    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.id == id)
    }

    /// Check the declaration for mistakes the remote API would reject or that
    /// would make drift detection ambiguous.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, in field order.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for field in &self.fields {
            if !seen.insert(field.id.as_str()) {
                return Err(Error::DuplicateFieldId {
                    content_type: self.label().to_string(),
                    field: field.id.clone(),
                });
            }

            validate_field(field)?;
        }

        let mut widgets = HashSet::new();

        for widget in &self.sidebar {
            if !widgets.insert(widget.widget_id.as_str()) {
                return Err(Error::DuplicateSidebarWidget {
                    widget: widget.widget_id.clone(),
                });
            }

            widget
                .settings
                .decode()
                .map_err(|e| Error::InvalidSidebarSettings {
                    widget: widget.widget_id.clone(),
                    message: e.to_string(),
                })?;
        }

        Ok(())
    }
}

fn validate_field(field: &Field) -> Result<()> {
    let unsupported = std::iter::once(&field.field_type)
        .chain(field.items.as_ref().map(|items| &items.item_type))
        .find(|field_type| !field_type.is_supported());
    if let Some(field_type) = unsupported {
        return Err(Error::UnsupportedFieldType {
            field: field.id.clone(),
            field_type: field_type.to_string(),
        });
    }

    match (&field.items, &field.field_type) {
        (None, FieldType::Array) => {
            return Err(Error::MissingItems {
                field: field.id.clone(),
            });
        }
        (Some(_), field_type) if *field_type != FieldType::Array => {
            return Err(Error::UnexpectedItems {
                field: field.id.clone(),
                field_type: field_type.clone(),
            });
        }
        _ => {}
    }

    if field.link_type.is_some() && !field.field_type.accepts_link_type() {
        return Err(Error::UnexpectedLinkType {
            field: field.id.clone(),
            field_type: field.field_type.clone(),
        });
    }

    validate_rules(&field.id, &field.validations)?;

    if let Some(items) = &field.items {
        if items.link_type.is_some() && !items.item_type.accepts_link_type() {
            return Err(Error::UnexpectedLinkType {
                field: field.id.clone(),
                field_type: items.item_type.clone(),
            });
        }

        validate_rules(&field.id, &items.validations)?;
    }

    Ok(())
}

fn validate_rules(field: &str, rules: &[ValidationRule]) -> Result<()> {
    for rule in rules {
        let kinds = rule.kinds();

        match kinds.len() {
            0 => {
                return Err(Error::UnsupportedValidation {
                    kind: format!("empty validation rule on field {field}"),
                });
            }
            1 => {}
            _ => {
                let kinds: Vec<&str> = kinds.iter().map(|kind| kind.wire_name()).collect();
                return Err(Error::AmbiguousValidation {
                    field: field.to_string(),
                    kinds: kinds.join(", "),
                });
            }
        }
    }

    Ok(())
}
