//! Remote content type payloads

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validation::FieldValidation;
use crate::field_type::FieldType;

/// System metadata attached to every remote object.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sys {
    pub id: String,
    /// Optimistic-concurrency token; every write must echo the last one read.
    #[serde(default)]
    pub version: u64,
}

impl Sys {
    pub fn new(id: impl Into<String>, version: u64) -> Self {
        Self {
            id: id.into(),
            version,
        }
    }
}

/// A content type as stored by the remote API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteContentModel {
    /// Absent on a create payload for a content type without a chosen id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sys: Option<Sys>,
    pub name: String,
    pub display_field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<RemoteField>,
}

impl RemoteContentModel {
    pub fn id(&self) -> Option<&str> {
        self.sys.as_ref().map(|sys| sys.id.as_str())
    }

    /// The version last observed, or zero for an unsaved payload.
    pub fn version(&self) -> u64 {
        self.sys.as_ref().map_or(0, |sys| sys.version)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteField {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub localized: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub omitted: bool,
    #[serde(default)]
    pub validations: Vec<FieldValidation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<RemoteItems>,
    /// Locale code to default value; values are JSON scalars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<BTreeMap<String, Value>>,
}

/// Element description of an `Array` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteItems {
    #[serde(rename = "type")]
    pub item_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    #[serde(default)]
    pub validations: Vec<FieldValidation>,
}
