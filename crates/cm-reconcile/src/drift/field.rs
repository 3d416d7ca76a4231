//! Field comparison

use cm_model::{Field, FieldValidation, Items, RemoteField, RemoteItems, ValidationRule};

use crate::mapper::{draft_rules, non_empty};

/// The attribute of a field that differs between the declared and the
/// remote side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAttribute {
    Type,
    Name,
    LinkType,
    Required,
    Localized,
    Disabled,
    Omitted,
    Validations,
    Items,
    DefaultValue,
}

impl FieldAttribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldAttribute::Type => "type",
            FieldAttribute::Name => "name",
            FieldAttribute::LinkType => "link type",
            FieldAttribute::Required => "required",
            FieldAttribute::Localized => "localized",
            FieldAttribute::Disabled => "disabled",
            FieldAttribute::Omitted => "omitted",
            FieldAttribute::Validations => "validations",
            FieldAttribute::Items => "items",
            FieldAttribute::DefaultValue => "default value",
        }
    }
}

impl std::fmt::Display for FieldAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a declared field matches its remote counterpart.
///
/// The ids are compared too, so this is meaningful on any pair, not only
/// on a pair already matched by id.
pub fn field_equal(desired: &Field, remote: &RemoteField) -> bool {
    desired.id == remote.id && field_mismatch(desired, remote).is_none()
}

/// The first attribute that differs, in a fixed order.
pub fn field_mismatch(desired: &Field, remote: &RemoteField) -> Option<FieldAttribute> {
    if desired.field_type != remote.field_type {
        return Some(FieldAttribute::Type);
    }
    if desired.name != remote.name {
        return Some(FieldAttribute::Name);
    }
    if non_empty(desired.link_type.as_deref()) != non_empty(remote.link_type.as_deref()) {
        return Some(FieldAttribute::LinkType);
    }
    if desired.required != remote.required {
        return Some(FieldAttribute::Required);
    }
    if desired.localized != remote.localized {
        return Some(FieldAttribute::Localized);
    }
    if desired.disabled != remote.disabled {
        return Some(FieldAttribute::Disabled);
    }
    if desired.omitted != remote.omitted {
        return Some(FieldAttribute::Omitted);
    }
    if !items_equal(desired.items.as_ref(), remote.items.as_ref()) {
        return Some(FieldAttribute::Items);
    }
    if !rules_equal(&desired.validations, &remote.validations) {
        return Some(FieldAttribute::Validations);
    }
    if let Some(default_value) = &desired.default_value
        && remote.default_value.as_ref() != Some(&default_value.to_wire())
    {
        return Some(FieldAttribute::DefaultValue);
    }

    None
}

/// Array item specs are equal when both are absent, or both are present
/// with the same type, link type and validations.
pub fn items_equal(desired: Option<&Items>, remote: Option<&RemoteItems>) -> bool {
    match (desired, remote) {
        (None, None) => true,
        (Some(desired), Some(remote)) => {
            desired.item_type == remote.item_type
                && non_empty(desired.link_type.as_deref()) == non_empty(remote.link_type.as_deref())
                && rules_equal(&desired.validations, &remote.validations)
        }
        _ => false,
    }
}

/// Positional comparison: rule `i` must equal remote validation `i`.
///
/// Reordered rules are unequal even when they hold the same kinds. A rule
/// that cannot be drafted never equals anything.
pub fn rules_equal(desired: &[ValidationRule], remote: &[FieldValidation]) -> bool {
    if desired.len() != remote.len() {
        return false;
    }

    match draft_rules(desired) {
        Ok(drafted) => drafted == remote,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::draft_field;
    use cm_model::{DefaultValue, FieldType};
    use rstest::rstest;
    use std::collections::BTreeMap;

    fn title() -> Field {
        Field::new("title", "Title", FieldType::Symbol)
            .required()
            .with_validation(ValidationRule::unique(true))
            .with_validation(ValidationRule::size(Some(1.0), Some(100.0)))
    }

    #[test]
    fn test_drafted_field_equals_itself() {
        let field = title();
        let remote = draft_field(&field).unwrap();

        assert!(field_equal(&field, &remote));
    }

    #[test]
    fn test_reordered_rules_are_drift() {
        let field = title();
        let mut remote = draft_field(&field).unwrap();
        remote.validations.reverse();

        assert_eq!(field_mismatch(&field, &remote), Some(FieldAttribute::Validations));
    }

    #[test]
    fn test_message_presence_is_compared() {
        let field = Field::new("slug", "Slug", FieldType::Symbol)
            .with_validation(ValidationRule::regexp("^[a-z-]+$").with_message(""));
        let mut remote = draft_field(&field).unwrap();
        if let FieldValidation::Regexp { message, .. } = &mut remote.validations[0] {
            *message = None;
        }

        assert!(!field_equal(&field, &remote));
    }

    #[test]
    fn test_empty_rule_never_matches() {
        let desired = vec![ValidationRule::default()];
        let remote = vec![FieldValidation::Unique { unique: true }];

        assert!(!rules_equal(&desired, &remote));
    }

    #[rstest]
    #[case::name(|r: &mut RemoteField| r.name = "Headline".to_string(), FieldAttribute::Name)]
    #[case::localized(|r: &mut RemoteField| r.localized = true, FieldAttribute::Localized)]
    #[case::omitted(|r: &mut RemoteField| r.omitted = true, FieldAttribute::Omitted)]
    #[case::link_type(|r: &mut RemoteField| r.link_type = Some("Entry".to_string()), FieldAttribute::LinkType)]
    #[case::items(|r: &mut RemoteField| r.items = Some(RemoteItems {
        item_type: FieldType::Symbol,
        link_type: None,
        validations: Vec::new(),
    }), FieldAttribute::Items)]
    fn test_single_attribute_change(
        #[case] change: fn(&mut RemoteField),
        #[case] expected: FieldAttribute,
    ) {
        let field = title();
        let mut remote = draft_field(&field).unwrap();
        change(&mut remote);

        assert_eq!(field_mismatch(&field, &remote), Some(expected));
    }

    #[test]
    fn test_empty_link_type_matches_absent() {
        let mut field = Field::new("author", "Author", FieldType::Link);
        field.link_type = Some(String::new());
        let mut remote = draft_field(&field).unwrap();
        remote.link_type = None;

        assert!(field_equal(&field, &remote));
    }

    #[test]
    fn test_default_value_compared_only_when_declared() {
        let declared = title().with_default_value(DefaultValue::String(BTreeMap::from([(
            "en-US".to_string(),
            "Untitled".to_string(),
        )])));
        let mut remote = draft_field(&declared).unwrap();

        assert!(field_equal(&declared, &remote));

        remote.default_value = None;
        assert_eq!(
            field_mismatch(&declared, &remote),
            Some(FieldAttribute::DefaultValue)
        );

        let mut undeclared_remote = draft_field(&declared).unwrap();
        undeclared_remote.default_value = Some(BTreeMap::new());
        assert!(field_equal(&title(), &undeclared_remote));
    }
}
