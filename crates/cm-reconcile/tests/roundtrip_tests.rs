//! Property: importing well-formed remote state and drafting it back yields
//! a declaration that the drift detector reports as in sync.

use std::collections::BTreeMap;

use cm_model::{
    Bounds, EditorInterface, FieldType, FieldValidation, Regexp, RemoteContentModel, RemoteControl,
    RemoteField, RemoteItems, RemoteSidebarWidget, Sys,
};
use cm_reconcile::drift::{content_type_equal, editor_interface_equal};
use cm_reconcile::{draft_content_type, draft_editor_interface, import_content_type};
use proptest::prelude::*;
use serde_json::Value;

fn bounds() -> impl Strategy<Value = Bounds> {
    (
        prop::option::of(0u32..10_000),
        prop::option::of(0u32..10_000),
    )
        .prop_map(|(min, max)| Bounds::new(min.map(f64::from), max.map(f64::from)))
}

fn message() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[a-zA-Z ]{0,16}")
}

fn words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z][a-z-]{0,8}", 0..4)
}

fn validation() -> impl Strategy<Value = FieldValidation> {
    prop_oneof![
        any::<bool>().prop_map(|unique| FieldValidation::Unique { unique }),
        (bounds(), message()).prop_map(|(size, message)| FieldValidation::Size { size, message }),
        (bounds(), message()).prop_map(|(range, message)| FieldValidation::Range { range, message }),
        bounds().prop_map(|size| FieldValidation::AssetFileSize { size }),
        ("[a-z^$.*+]{1,12}", prop::option::of("[gimsuy]{1,3}"), message()).prop_map(
            |(pattern, flags, message)| FieldValidation::Regexp {
                regexp: Regexp { pattern, flags },
                message,
            }
        ),
        words().prop_map(|content_types| FieldValidation::LinkContentType { content_types }),
        (words(), message())
            .prop_map(|(groups, message)| FieldValidation::LinkMimetypeGroup { groups, message }),
        words().prop_map(|values| FieldValidation::PredefinedValues {
            values: values.into_iter().map(Value::String).collect(),
        }),
        (words(), message()).prop_map(|(marks, message)| FieldValidation::EnabledMarks { marks, message }),
        (words(), message()).prop_map(|(node_types, message)| {
            FieldValidation::EnabledNodeTypes {
                node_types,
                message,
            }
        }),
    ]
}

fn scalar_type() -> impl Strategy<Value = FieldType> {
    prop_oneof![
        Just(FieldType::Symbol),
        Just(FieldType::Text),
        Just(FieldType::RichText),
        Just(FieldType::Integer),
        Just(FieldType::Number),
        Just(FieldType::Date),
        Just(FieldType::Location),
        Just(FieldType::Boolean),
        Just(FieldType::Object),
        Just(FieldType::Link),
    ]
}

fn link_type(field_type: &FieldType) -> BoxedStrategy<Option<String>> {
    if *field_type == FieldType::Link {
        prop_oneof![Just("Entry".to_string()), Just("Asset".to_string())]
            .prop_map(Some)
            .boxed()
    } else {
        Just(None).boxed()
    }
}

fn default_value() -> impl Strategy<Value = Option<BTreeMap<String, Value>>> {
    let locales = prop::collection::vec("[a-z]{2}-[A-Z]{2}", 1..3);
    prop_oneof![
        Just(None),
        (locales.clone(), "[a-zA-Z ]{0,10}").prop_map(|(locales, text)| Some(
            locales
                .into_iter()
                .map(|locale| (locale, Value::String(text.clone())))
                .collect()
        )),
        (locales, any::<bool>()).prop_map(|(locales, flag)| Some(
            locales
                .into_iter()
                .map(|locale| (locale, Value::Bool(flag)))
                .collect()
        )),
    ]
}

fn items() -> impl Strategy<Value = RemoteItems> {
    scalar_type().prop_flat_map(|item_type| {
        (
            link_type(&item_type),
            prop::collection::vec(validation(), 0..3),
        )
            .prop_map(move |(link_type, validations)| RemoteItems {
                item_type: item_type.clone(),
                link_type,
                validations,
            })
    })
}

fn field(id: String) -> impl Strategy<Value = RemoteField> {
    let field_type = prop_oneof![4 => scalar_type(), 1 => Just(FieldType::Array)];

    field_type.prop_flat_map(move |field_type| {
        let items = if field_type == FieldType::Array {
            items().prop_map(Some).boxed()
        } else {
            Just(None).boxed()
        };

        (
            "[A-Z][a-z ]{0,12}",
            link_type(&field_type),
            any::<[bool; 4]>(),
            prop::collection::vec(validation(), 0..4),
            items,
            default_value(),
        )
            .prop_map({
                let id = id.clone();
                move |(name, link_type, flags, validations, items, default_value)| RemoteField {
                    id: id.clone(),
                    name,
                    field_type: field_type.clone(),
                    link_type,
                    required: flags[0],
                    localized: flags[1],
                    disabled: flags[2],
                    omitted: flags[3],
                    validations,
                    items,
                    default_value,
                }
            })
    })
}

fn content_type() -> impl Strategy<Value = RemoteContentModel> {
    (0usize..6).prop_flat_map(|count| {
        let fields: Vec<_> = (0..count).map(|i| field(format!("field{i}"))).collect();
        (
            "[A-Z][a-z]{2,10}",
            prop::option::of("[a-z ]{0,20}"),
            fields,
            1u64..50,
        )
            .prop_map(|(name, description, fields, version)| RemoteContentModel {
                sys: Some(Sys::new("generated", version)),
                display_field: fields
                    .first()
                    .map_or_else(String::new, |f: &RemoteField| f.id.clone()),
                name,
                description,
                fields,
            })
    })
}

fn setting_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-z0-9]{0,5}".prop_map(Value::String),
        any::<i32>().prop_map(Value::from),
        any::<bool>().prop_map(Value::Bool),
    ]
}

fn editor_interface(fields: Vec<String>) -> impl Strategy<Value = EditorInterface> {
    let controls = fields
        .into_iter()
        .map(|field_id| {
            prop::option::of(("[a-zA-Z]{1,10}", prop::option::of("builtin|app"))).prop_map(
                move |widget| match widget {
                    Some((widget_id, widget_namespace)) => RemoteControl {
                        field_id: field_id.clone(),
                        widget_id: Some(widget_id),
                        widget_namespace,
                        settings: None,
                    },
                    None => RemoteControl {
                        field_id: field_id.clone(),
                        ..RemoteControl::default()
                    },
                },
            )
        })
        .collect::<Vec<_>>();

    let sidebar = prop::collection::btree_set("[a-z]{1,8}-widget", 0..4).prop_flat_map(|ids| {
        ids.into_iter()
            .map(|widget_id| {
                (
                    any::<bool>(),
                    prop::collection::btree_map("[a-z]{1,5}", setting_value(), 0..3),
                )
                    .prop_map(move |(disabled, settings)| RemoteSidebarWidget {
                        widget_id: widget_id.clone(),
                        widget_namespace: "sidebar-builtin".to_string(),
                        disabled,
                        settings: (!disabled).then(|| settings.into_iter().collect()),
                    })
            })
            .collect::<Vec<_>>()
    });

    (controls, sidebar, 1u64..20).prop_map(|(controls, sidebar, version)| EditorInterface {
        sys: Some(Sys::new("default", version)),
        controls,
        sidebar,
    })
}

fn remote_state() -> impl Strategy<Value = (RemoteContentModel, EditorInterface)> {
    content_type().prop_flat_map(|model| {
        let ids = model.fields.iter().map(|f| f.id.clone()).collect();
        (Just(model), editor_interface(ids))
    })
}

proptest! {
    #[test]
    fn imported_content_type_drafts_back_in_sync(remote in content_type()) {
        let imported = import_content_type(&remote, None).unwrap();

        prop_assert!(content_type_equal(&imported, &remote));

        let drafted = draft_content_type(&imported).unwrap();
        prop_assert!(content_type_equal(&imported, &drafted));
        prop_assert_eq!(drafted.version(), remote.version());
    }

    #[test]
    fn imported_editor_interface_drafts_back_in_sync((remote, ei) in remote_state()) {
        let imported = import_content_type(&remote, Some(&ei)).unwrap();

        prop_assert!(editor_interface_equal(&imported, Some(&ei)));
        prop_assert_eq!(imported.version_controls, ei.version());

        let drafted = draft_editor_interface(&imported, &ei).unwrap();
        prop_assert!(editor_interface_equal(&imported, Some(&drafted)));
        prop_assert!(drafted.sidebar.iter().all(|w| !w.disabled || w.settings.is_none()));
    }
}
