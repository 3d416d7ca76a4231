//! Declared sidebar widgets

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sidebar {
    pub widget_id: String,
    pub widget_namespace: String,
    #[serde(default)]
    pub settings: SidebarSettings,
    #[serde(default)]
    pub disabled: bool,
}

impl Sidebar {
    pub fn new(widget_id: impl Into<String>, widget_namespace: impl Into<String>) -> Self {
        Self {
            widget_id: widget_id.into(),
            widget_namespace: widget_namespace.into(),
            settings: SidebarSettings::default(),
            disabled: false,
        }
    }

    pub fn with_settings(mut self, settings: SidebarSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Sidebar widget settings kept as raw JSON object text.
///
/// The text is only parsed when it is compared or drafted. Comparison works
/// on the [`flatten_settings`] form, so `{"count": 3}` and `{"count": "3"}`
/// are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SidebarSettings(String);

impl SidebarSettings {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Keep a remote settings object as text.
    pub fn from_object(settings: &Map<String, Value>) -> serde_json::Result<Self> {
        serde_json::to_string(settings).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the text into the object sent to the remote side.
    pub fn to_object(&self) -> serde_json::Result<Map<String, Value>> {
        serde_json::from_str(&self.0)
    }

    /// Parse and flatten; fails unless the text is a JSON object.
    pub fn decode(&self) -> serde_json::Result<BTreeMap<String, String>> {
        self.to_object().map(|settings| flatten_settings(&settings))
    }
}

/// Flatten a settings object into a string map. Strings are kept as they
/// are; every other value becomes its JSON text.
pub fn flatten_settings(settings: &Map<String, Value>) -> BTreeMap<String, String> {
    settings
        .iter()
        .map(|(key, value)| {
            let flat = match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            (key.clone(), flat)
        })
        .collect()
}

impl Default for SidebarSettings {
    fn default() -> Self {
        Self("{}".to_string())
    }
}
