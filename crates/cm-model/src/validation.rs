//! Field validation rules
//!
//! A declared [`ValidationRule`] carries one optional slot per validation
//! kind, mirroring how rules are written in a manifest. Exactly one slot may
//! be populated; the named constructors build rules that satisfy this, and
//! [`ValidationRule::draft`] enforces it when a rule is turned into its
//! remote [`FieldValidation`] variant.
//!
//! # Example TOML
//!
//! ```toml
//! validations = [
//!     { unique = true },
//!     { size = { min = 1, max = 80 }, message = "Keep titles short" },
//!     { link_content_type = ["author"] },
//! ]
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::remote::FieldValidation;

/// Inclusive numeric bounds; either end may be open.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Bounds {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }
}

/// A regular expression constraint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Regexp {
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<String>,
}

/// The kinds of validation a field can carry, in draft precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationKind {
    Unique,
    Size,
    Range,
    AssetFileSize,
    Regexp,
    LinkContentType,
    LinkMimetypeGroup,
    PredefinedValues,
    EnabledMarks,
    EnabledNodeTypes,
}

impl ValidationKind {
    /// The key this kind uses in the remote payload.
    pub fn wire_name(&self) -> &'static str {
        match self {
            ValidationKind::Unique => "unique",
            ValidationKind::Size => "size",
            ValidationKind::Range => "range",
            ValidationKind::AssetFileSize => "assetFileSize",
            ValidationKind::Regexp => "regexp",
            ValidationKind::LinkContentType => "linkContentType",
            ValidationKind::LinkMimetypeGroup => "linkMimetypeGroup",
            ValidationKind::PredefinedValues => "in",
            ValidationKind::EnabledMarks => "enabledMarks",
            ValidationKind::EnabledNodeTypes => "enabledNodeTypes",
        }
    }
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// A declared validation rule.
///
/// List slots are set or unset independently of their length: an empty
/// `enabled_marks` list is a rule that allows no marks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_file_size: Option<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regexp: Option<Regexp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_content_type: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_mimetype_group: Option<Vec<String>>,
    #[serde(default, rename = "in", skip_serializing_if = "Option::is_none")]
    pub predefined: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_marks: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_node_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn strings<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}

impl ValidationRule {
    pub fn unique(unique: bool) -> Self {
        Self {
            unique: Some(unique),
            ..Self::default()
        }
    }

    pub fn size(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            size: Some(Bounds::new(min, max)),
            ..Self::default()
        }
    }

    pub fn range(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            range: Some(Bounds::new(min, max)),
            ..Self::default()
        }
    }

    pub fn asset_file_size(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            asset_file_size: Some(Bounds::new(min, max)),
            ..Self::default()
        }
    }

    pub fn regexp(pattern: impl Into<String>) -> Self {
        Self {
            regexp: Some(Regexp {
                pattern: pattern.into(),
                flags: None,
            }),
            ..Self::default()
        }
    }

    pub fn link_content_type<I, S>(content_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            link_content_type: Some(strings(content_types)),
            ..Self::default()
        }
    }

    pub fn link_mimetype_group<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            link_mimetype_group: Some(strings(groups)),
            ..Self::default()
        }
    }

    pub fn predefined<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            predefined: Some(values.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn enabled_marks<I, S>(marks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enabled_marks: Some(strings(marks)),
            ..Self::default()
        }
    }

    pub fn enabled_node_types<I, S>(node_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enabled_node_types: Some(strings(node_types)),
            ..Self::default()
        }
    }

    /// Attach an error message shown by the remote editor when the rule fails.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Every kind populated on this rule, in draft precedence order.
    ///
    /// A well-formed rule returns exactly one kind.
    pub fn kinds(&self) -> Vec<ValidationKind> {
        let slots = [
            (self.unique.is_some(), ValidationKind::Unique),
            (self.size.is_some(), ValidationKind::Size),
            (self.range.is_some(), ValidationKind::Range),
            (self.asset_file_size.is_some(), ValidationKind::AssetFileSize),
            (self.regexp.is_some(), ValidationKind::Regexp),
            (self.link_content_type.is_some(), ValidationKind::LinkContentType),
            (self.link_mimetype_group.is_some(), ValidationKind::LinkMimetypeGroup),
            (self.predefined.is_some(), ValidationKind::PredefinedValues),
            (self.enabled_marks.is_some(), ValidationKind::EnabledMarks),
            (self.enabled_node_types.is_some(), ValidationKind::EnabledNodeTypes),
        ];

        slots
            .into_iter()
            .filter_map(|(populated, kind)| populated.then_some(kind))
            .collect()
    }

    /// Build the remote validation for this rule.
    ///
    /// The first populated kind wins. `unique = false` is a populated rule.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedValidation`] when no kind is populated.
    pub fn draft(&self) -> Result<FieldValidation> {
        let message = self.message.clone();

        if let Some(unique) = self.unique {
            return Ok(FieldValidation::Unique { unique });
        }

        if let Some(size) = self.size {
            return Ok(FieldValidation::Size { size, message });
        }

        if let Some(range) = self.range {
            return Ok(FieldValidation::Range { range, message });
        }

        if let Some(size) = self.asset_file_size {
            return Ok(FieldValidation::AssetFileSize { size });
        }

        if let Some(regexp) = &self.regexp {
            return Ok(FieldValidation::Regexp {
                regexp: regexp.clone(),
                message,
            });
        }

        if let Some(content_types) = &self.link_content_type {
            return Ok(FieldValidation::LinkContentType {
                content_types: content_types.clone(),
            });
        }

        if let Some(groups) = &self.link_mimetype_group {
            return Ok(FieldValidation::LinkMimetypeGroup {
                groups: groups.clone(),
                message,
            });
        }

        if let Some(values) = &self.predefined {
            return Ok(FieldValidation::PredefinedValues {
                values: values.clone(),
            });
        }

        if let Some(marks) = &self.enabled_marks {
            return Ok(FieldValidation::EnabledMarks {
                marks: marks.clone(),
                message,
            });
        }

        if let Some(node_types) = &self.enabled_node_types {
            return Ok(FieldValidation::EnabledNodeTypes {
                node_types: node_types.clone(),
                message,
            });
        }

        Err(Error::UnsupportedValidation {
            kind: "ValidationRule without any populated kind".to_string(),
        })
    }

    /// Build the declared rule for a remote validation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedValidation`] naming the remote kind when
    /// the validation is not one this crate models.
    pub fn import(validation: &FieldValidation) -> Result<Self> {
        let rule = match validation {
            FieldValidation::Unique { unique } => Self::unique(*unique),
            FieldValidation::Size { size, message } => Self {
                size: Some(*size),
                message: message.clone(),
                ..Self::default()
            },
            FieldValidation::Range { range, message } => Self {
                range: Some(*range),
                message: message.clone(),
                ..Self::default()
            },
            FieldValidation::AssetFileSize { size } => Self {
                asset_file_size: Some(*size),
                ..Self::default()
            },
            FieldValidation::Regexp { regexp, message } => Self {
                regexp: Some(regexp.clone()),
                message: message.clone(),
                ..Self::default()
            },
            FieldValidation::LinkContentType { content_types } => {
                Self::link_content_type(content_types.iter().cloned())
            }
            FieldValidation::LinkMimetypeGroup { groups, message } => Self {
                link_mimetype_group: Some(groups.clone()),
                message: message.clone(),
                ..Self::default()
            },
            FieldValidation::PredefinedValues { values } => Self::predefined(values.iter().cloned()),
            FieldValidation::EnabledMarks { marks, message } => Self {
                enabled_marks: Some(marks.clone()),
                message: message.clone(),
                ..Self::default()
            },
            FieldValidation::EnabledNodeTypes {
                node_types,
                message,
            } => Self {
                enabled_node_types: Some(node_types.clone()),
                message: message.clone(),
                ..Self::default()
            },
            FieldValidation::Unsupported { kind, .. } => {
                return Err(Error::UnsupportedValidation { kind: kind.clone() });
            }
        };

        Ok(rule)
    }
}
