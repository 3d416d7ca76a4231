//! Field mapping

use std::collections::BTreeMap;

use cm_model::{
    Control, DefaultValue, Field, FieldType, FieldValidation, Items, RemoteControl, RemoteField,
    RemoteItems, ValidationRule,
};
use serde_json::Value;

use crate::error::{Error, Result};

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

pub(crate) fn draft_rules(rules: &[ValidationRule]) -> Result<Vec<FieldValidation>> {
    rules
        .iter()
        .map(|rule| rule.draft().map_err(Error::from))
        .collect()
}

fn import_rules(validations: &[FieldValidation]) -> Result<Vec<ValidationRule>> {
    validations
        .iter()
        .map(|validation| ValidationRule::import(validation).map_err(Error::from))
        .collect()
}

/// Build the remote payload for a declared field.
///
/// A link type is only sent when it is set and non-empty; an empty string
/// and an absent link type mean different things to the remote side.
///
/// # Errors
///
/// Fails when a validation rule has no populated kind, or when an `Array`
/// field declares no items.
pub fn draft_field(field: &Field) -> Result<RemoteField> {
    let items = if field.field_type == FieldType::Array {
        let items = field.items.as_ref().ok_or_else(|| cm_model::Error::MissingItems {
            field: field.id.clone(),
        })?;
        Some(draft_items(items)?)
    } else {
        None
    };

    Ok(RemoteField {
        id: field.id.clone(),
        name: field.name.clone(),
        field_type: field.field_type.clone(),
        link_type: non_empty(field.link_type.as_deref()).map(str::to_string),
        required: field.required,
        localized: field.localized,
        disabled: field.disabled,
        omitted: field.omitted,
        validations: draft_rules(&field.validations)?,
        items,
        default_value: field.default_value.as_ref().map(DefaultValue::to_wire),
    })
}

fn draft_items(items: &Items) -> Result<RemoteItems> {
    Ok(RemoteItems {
        item_type: items.item_type.clone(),
        link_type: non_empty(items.link_type.as_deref()).map(str::to_string),
        validations: draft_rules(&items.validations)?,
    })
}

/// Build the declared form of a remote field.
///
/// `controls` is the editor interface's control list for the whole content
/// type; the entry for this field becomes its [`Control`] when it names a
/// widget.
///
/// # Errors
///
/// Fails on field types and validation kinds the model does not know, and on
/// default values that are not all strings or all booleans.
pub fn import_field(remote: &RemoteField, controls: &[RemoteControl]) -> Result<Field> {
    let item_type = remote.items.as_ref().map(|items| &items.item_type);
    if let Some(unsupported) = std::iter::once(&remote.field_type)
        .chain(item_type)
        .find(|field_type| !field_type.is_supported())
    {
        return Err(cm_model::Error::UnsupportedFieldType {
            field: remote.id.clone(),
            field_type: unsupported.to_string(),
        }
        .into());
    }

    let items = match (&remote.items, &remote.field_type) {
        (Some(items), FieldType::Array) => Some(Items {
            item_type: items.item_type.clone(),
            link_type: non_empty(items.link_type.as_deref()).map(str::to_string),
            validations: import_rules(&items.validations)?,
        }),
        _ => None,
    };

    let control = controls
        .iter()
        .find(|control| control.field_id == remote.id)
        .and_then(|control| {
            let widget_id = non_empty(control.widget_id.as_deref())?;
            Some(Control {
                widget_id: widget_id.to_string(),
                widget_namespace: control.widget_namespace.clone(),
                settings: control.settings.clone(),
            })
        });

    Ok(Field {
        id: remote.id.clone(),
        name: remote.name.clone(),
        field_type: remote.field_type.clone(),
        link_type: non_empty(remote.link_type.as_deref()).map(str::to_string),
        required: remote.required,
        localized: remote.localized,
        disabled: remote.disabled,
        omitted: remote.omitted,
        validations: import_rules(&remote.validations)?,
        items,
        control,
        default_value: import_default_value(&remote.id, remote.default_value.as_ref())?,
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Infer the type of a remote default value map.
///
/// The first entry decides the type; every other entry must agree with it.
/// An empty map imports as no default value.
fn import_default_value(
    field: &str,
    values: Option<&BTreeMap<String, Value>>,
) -> Result<Option<DefaultValue>> {
    let Some(values) = values else {
        return Ok(None);
    };
    let Some(first) = values.values().next() else {
        return Ok(None);
    };

    let mismatch = |expected: &str, found: &Value| Error::MixedDefaultValueTypes {
        field: field.to_string(),
        expected: expected.to_string(),
        found: json_type_name(found).to_string(),
    };

    match first {
        Value::String(_) => {
            let mut strings = BTreeMap::new();
            for (locale, value) in values {
                let Value::String(s) = value else {
                    return Err(mismatch("string", value));
                };
                strings.insert(locale.clone(), s.clone());
            }
            Ok(Some(DefaultValue::String(strings)))
        }
        Value::Bool(_) => {
            let mut bools = BTreeMap::new();
            for (locale, value) in values {
                let Value::Bool(b) = value else {
                    return Err(mismatch("bool", value));
                };
                bools.insert(locale.clone(), *b);
            }
            Ok(Some(DefaultValue::Bool(bools)))
        }
        other => Err(Error::UnsupportedDefaultValueType {
            field: field.to_string(),
            value_type: json_type_name(other).to_string(),
        }),
    }
}
