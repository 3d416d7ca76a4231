//! Declared fields

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::field_type::FieldType;
use crate::validation::ValidationRule;

/// A declared content type field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
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
    /// Order matters: reordering rules is drift.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validations: Vec<ValidationRule>,
    /// Present iff `field_type` is `Array`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Items>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<Control>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
}

impl Field {
    pub fn new(id: impl Into<String>, name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            field_type,
            link_type: None,
            required: false,
            localized: false,
            disabled: false,
            omitted: false,
            validations: Vec::new(),
            items: None,
            control: None,
            default_value: None,
        }
    }

    pub fn with_link_type(mut self, link_type: impl Into<String>) -> Self {
        self.link_type = Some(link_type.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn localized(mut self) -> Self {
        self.localized = true;
        self
    }

    pub fn with_validation(mut self, rule: ValidationRule) -> Self {
        self.validations.push(rule);
        self
    }

    pub fn with_items(mut self, items: Items) -> Self {
        self.items = Some(items);
        self
    }

    pub fn with_control(mut self, control: Control) -> Self {
        self.control = Some(control);
        self
    }

    pub fn with_default_value(mut self, default_value: DefaultValue) -> Self {
        self.default_value = Some(default_value);
        self
    }
}

/// Element description of an `Array` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Items {
    #[serde(rename = "type")]
    pub item_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validations: Vec<ValidationRule>,
}

impl Items {
    pub fn new(item_type: FieldType) -> Self {
        Self {
            item_type,
            link_type: None,
            validations: Vec::new(),
        }
    }

    pub fn with_link_type(mut self, link_type: impl Into<String>) -> Self {
        self.link_type = Some(link_type.into());
        self
    }

    pub fn with_validation(mut self, rule: ValidationRule) -> Self {
        self.validations.push(rule);
        self
    }
}

/// The editor widget bound to a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    pub widget_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_namespace: Option<String>,
    /// Widget specific; kept opaque.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Map<String, Value>>,
}

impl Control {
    pub fn new(widget_id: impl Into<String>, widget_namespace: impl Into<String>) -> Self {
        Self {
            widget_id: widget_id.into(),
            widget_namespace: Some(widget_namespace.into()),
            settings: None,
        }
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Per-locale default values.
///
/// The map is homogeneous by construction: either every locale defaults to a
/// string or every locale defaults to a boolean.
///
/// ```toml
/// default_value = { string = { "en-US" = "Untitled" } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultValue {
    String(BTreeMap<String, String>),
    Bool(BTreeMap<String, bool>),
}

impl DefaultValue {
    pub fn is_empty(&self) -> bool {
        match self {
            DefaultValue::String(values) => values.is_empty(),
            DefaultValue::Bool(values) => values.is_empty(),
        }
    }

    /// The JSON scalar map sent to the remote API.
    pub fn to_wire(&self) -> BTreeMap<String, Value> {
        match self {
            DefaultValue::String(values) => values
                .iter()
                .map(|(locale, value)| (locale.clone(), Value::String(value.clone())))
                .collect(),
            DefaultValue::Bool(values) => values
                .iter()
                .map(|(locale, value)| (locale.clone(), Value::Bool(*value)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_default_value_to_wire() {
        let value = DefaultValue::Bool(BTreeMap::from([
            ("de-DE".to_string(), false),
            ("en-US".to_string(), true),
        ]));

        assert_eq!(
            value.to_wire(),
            BTreeMap::from([
                ("de-DE".to_string(), json!(false)),
                ("en-US".to_string(), json!(true)),
            ])
        );
    }

    #[test]
    fn test_default_value_parses_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            default_value: DefaultValue,
        }

        let parsed: Wrapper =
            toml::from_str(r#"default_value = { string = { "en-US" = "Untitled" } }"#).unwrap();

        assert_eq!(
            parsed.default_value,
            DefaultValue::String(BTreeMap::from([(
                "en-US".to_string(),
                "Untitled".to_string()
            )]))
        );
    }

    #[test]
    fn test_control_settings_builder() {
        let control = Control::new("rating", "builtin").with_setting("stars", 5);

        assert_eq!(control.settings.unwrap()["stars"], json!(5));
    }
}
