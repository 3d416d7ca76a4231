//! Remote field validations
//!
//! On the wire a validation is a JSON object whose single significant key
//! names its kind (`{"size": {...}, "message": "..."}`). Kinds this crate
//! does not know are kept as [`FieldValidation::Unsupported`] so a read never
//! fails on them; importing such a validation is what fails.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::validation::{Bounds, Regexp};

/// A validation as the remote API stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawValidation", into = "RawValidation")]
pub enum FieldValidation {
    Unique {
        unique: bool,
    },
    Size {
        size: Bounds,
        message: Option<String>,
    },
    Range {
        range: Bounds,
        message: Option<String>,
    },
    AssetFileSize {
        size: Bounds,
    },
    Regexp {
        regexp: Regexp,
        message: Option<String>,
    },
    LinkContentType {
        content_types: Vec<String>,
    },
    LinkMimetypeGroup {
        groups: Vec<String>,
        message: Option<String>,
    },
    PredefinedValues {
        values: Vec<Value>,
    },
    EnabledMarks {
        marks: Vec<String>,
        message: Option<String>,
    },
    EnabledNodeTypes {
        node_types: Vec<String>,
        message: Option<String>,
    },
    /// A kind introduced by the remote side that has no model here yet.
    Unsupported {
        kind: String,
        body: Map<String, Value>,
    },
}

impl FieldValidation {
    /// The wire key naming this validation's kind.
    pub fn kind(&self) -> &str {
        match self {
            FieldValidation::Unique { .. } => "unique",
            FieldValidation::Size { .. } => "size",
            FieldValidation::Range { .. } => "range",
            FieldValidation::AssetFileSize { .. } => "assetFileSize",
            FieldValidation::Regexp { .. } => "regexp",
            FieldValidation::LinkContentType { .. } => "linkContentType",
            FieldValidation::LinkMimetypeGroup { .. } => "linkMimetypeGroup",
            FieldValidation::PredefinedValues { .. } => "in",
            FieldValidation::EnabledMarks { .. } => "enabledMarks",
            FieldValidation::EnabledNodeTypes { .. } => "enabledNodeTypes",
            FieldValidation::Unsupported { kind, .. } => kind,
        }
    }
}

/// Flat wire form used only for (de)serialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawValidation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unique: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    range: Option<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    asset_file_size: Option<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    regexp: Option<Regexp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    link_content_type: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    link_mimetype_group: Option<Vec<String>>,
    #[serde(default, rename = "in", skip_serializing_if = "Option::is_none")]
    predefined: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    enabled_marks: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    enabled_node_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<RawValidation> for FieldValidation {
    fn from(raw: RawValidation) -> Self {
        let RawValidation {
            unique,
            size,
            range,
            asset_file_size,
            regexp,
            link_content_type,
            link_mimetype_group,
            predefined,
            enabled_marks,
            enabled_node_types,
            message,
            mut extra,
        } = raw;

        if let Some(unique) = unique {
            return FieldValidation::Unique { unique };
        }
        if let Some(size) = size {
            return FieldValidation::Size { size, message };
        }
        if let Some(range) = range {
            return FieldValidation::Range { range, message };
        }
        if let Some(size) = asset_file_size {
            return FieldValidation::AssetFileSize { size };
        }
        if let Some(regexp) = regexp {
            return FieldValidation::Regexp { regexp, message };
        }
        if let Some(content_types) = link_content_type {
            return FieldValidation::LinkContentType { content_types };
        }
        if let Some(groups) = link_mimetype_group {
            return FieldValidation::LinkMimetypeGroup { groups, message };
        }
        if let Some(values) = predefined {
            return FieldValidation::PredefinedValues { values };
        }
        if let Some(marks) = enabled_marks {
            return FieldValidation::EnabledMarks { marks, message };
        }
        if let Some(node_types) = enabled_node_types {
            return FieldValidation::EnabledNodeTypes {
                node_types,
                message,
            };
        }

        let kind = extra
            .keys()
            .next()
            .cloned()
            .unwrap_or_else(|| "empty".to_string());
        if let Some(message) = message {
            extra.insert("message".to_string(), Value::String(message));
        }

        FieldValidation::Unsupported { kind, body: extra }
    }
}

impl From<FieldValidation> for RawValidation {
    fn from(validation: FieldValidation) -> Self {
        let mut raw = RawValidation::default();

        match validation {
            FieldValidation::Unique { unique } => raw.unique = Some(unique),
            FieldValidation::Size { size, message } => {
                raw.size = Some(size);
                raw.message = message;
            }
            FieldValidation::Range { range, message } => {
                raw.range = Some(range);
                raw.message = message;
            }
            FieldValidation::AssetFileSize { size } => raw.asset_file_size = Some(size),
            FieldValidation::Regexp { regexp, message } => {
                raw.regexp = Some(regexp);
                raw.message = message;
            }
            FieldValidation::LinkContentType { content_types } => {
                raw.link_content_type = Some(content_types);
            }
            FieldValidation::LinkMimetypeGroup { groups, message } => {
                raw.link_mimetype_group = Some(groups);
                raw.message = message;
            }
            FieldValidation::PredefinedValues { values } => raw.predefined = Some(values),
            FieldValidation::EnabledMarks { marks, message } => {
                raw.enabled_marks = Some(marks);
                raw.message = message;
            }
            FieldValidation::EnabledNodeTypes {
                node_types,
                message,
            } => {
                raw.enabled_node_types = Some(node_types);
                raw.message = message;
            }
            FieldValidation::Unsupported { body, .. } => raw.extra = body,
        }

        raw
    }
}
