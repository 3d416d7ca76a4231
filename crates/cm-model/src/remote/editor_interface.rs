//! Remote editor interface payloads
//!
//! The editor interface is the companion object of a content type: it
//! holds the widget bound to each field and the ordered entry sidebar. It
//! lives under the same content type id but carries its own version.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::content_type::Sys;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorInterface {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sys: Option<Sys>,
    #[serde(default)]
    pub controls: Vec<RemoteControl>,
    #[serde(default)]
    pub sidebar: Vec<RemoteSidebarWidget>,
}

impl EditorInterface {
    /// The version last observed, or zero when the interface was never written.
    pub fn version(&self) -> u64 {
        self.sys.as_ref().map_or(0, |sys| sys.version)
    }
}

/// The widget bound to one field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteControl {
    pub field_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Map<String, Value>>,
}

impl RemoteControl {
    /// Whether the entry binds anything beyond the bare field id.
    pub fn is_bound(&self) -> bool {
        self.widget_id.is_some() || self.widget_namespace.is_some() || self.settings.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSidebarWidget {
    pub widget_id: String,
    pub widget_namespace: String,
    #[serde(default)]
    pub disabled: bool,
    /// Opaque object; rejected by the remote side for disabled widgets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Map<String, Value>>,
}
