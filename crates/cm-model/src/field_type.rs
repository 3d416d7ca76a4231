//! Field type tags shared by the desired and remote representations

use std::fmt;

use serde::{Deserialize, Serialize};

/// The field kinds the remote API understands.
///
/// Variant names are the wire names, so the enum serializes as-is. A type
/// name this crate does not know parses as [`FieldType::Unsupported`], so a
/// content type carrying one can still be read; mapping it to a declaration
/// fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    Symbol,
    Text,
    RichText,
    Integer,
    Number,
    Date,
    Location,
    Boolean,
    Object,
    Link,
    Array,
    ResourceLink,
    #[serde(untagged)]
    Unsupported(String),
}

impl FieldType {
    /// Whether a field of this type may carry a `link_type`.
    pub fn accepts_link_type(&self) -> bool {
        matches!(self, FieldType::Link)
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, FieldType::Unsupported(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Symbol => "Symbol",
            FieldType::Text => "Text",
            FieldType::RichText => "RichText",
            FieldType::Integer => "Integer",
            FieldType::Number => "Number",
            FieldType::Date => "Date",
            FieldType::Location => "Location",
            FieldType::Boolean => "Boolean",
            FieldType::Object => "Object",
            FieldType::Link => "Link",
            FieldType::Array => "Array",
            FieldType::ResourceLink => "ResourceLink",
            FieldType::Unsupported(name) => name,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
