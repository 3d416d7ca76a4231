//! Content type fixtures.
//!
//! [`article_model`], [`article_remote`] and [`article_editor_interface`]
//! describe the same content type from both sides: drafting the model yields
//! exactly the wire fixtures. The article exercises every validation kind,
//! both default value types, array items, controls and a disabled sidebar
//! widget.

use std::collections::BTreeMap;

use cm_model::{
    ContentModel, Control, DefaultValue, EditorInterface, Field, FieldType, Items,
    RemoteContentModel, Sidebar, SidebarSettings, ValidationRule,
};
use serde_json::json;

pub fn article_model() -> ContentModel {
    ContentModel::new("Article", "title")
        .with_id("article")
        .with_description("A blog article")
        .with_field(
            Field::new("title", "Title", FieldType::Symbol)
                .required()
                .with_validation(ValidationRule::unique(true))
                .with_validation(
                    ValidationRule::size(Some(1.0), Some(120.0)).with_message("Keep titles short"),
                )
                .with_control(Control::new("singleLine", "builtin"))
                .with_default_value(DefaultValue::String(BTreeMap::from([(
                    "en-US".to_string(),
                    "Untitled".to_string(),
                )]))),
        )
        .with_field(
            Field::new("slug", "Slug", FieldType::Symbol)
                .required()
                .with_validation(
                    ValidationRule::regexp("^[a-z0-9-]+$")
                        .with_message("Lowercase letters, digits and dashes"),
                )
                .with_control(Control::new("slugEditor", "builtin")),
        )
        .with_field(
            Field::new("body", "Body", FieldType::RichText)
                .localized()
                .with_validation(
                    ValidationRule::enabled_marks(["bold", "italic", "code"])
                        .with_message("Only basic marks"),
                )
                .with_validation(ValidationRule::enabled_node_types([
                    "heading-2",
                    "paragraph",
                    "hyperlink",
                ])),
        )
        .with_field(
            Field::new("author", "Author", FieldType::Link)
                .with_link_type("Entry")
                .with_validation(ValidationRule::link_content_type(["author"])),
        )
        .with_field(
            Field::new("hero", "Hero image", FieldType::Link)
                .with_link_type("Asset")
                .with_validation(ValidationRule::link_mimetype_group(["image"]))
                .with_validation(ValidationRule::asset_file_size(None, Some(5_242_880.0))),
        )
        .with_field(
            Field::new("tags", "Tags", FieldType::Array).with_items(
                Items::new(FieldType::Symbol)
                    .with_validation(ValidationRule::predefined(["news", "opinion", "howto"])),
            ),
        )
        .with_field(
            Field::new("related", "Related articles", FieldType::Array)
                .with_validation(ValidationRule::size(None, Some(5.0)))
                .with_items(
                    Items::new(FieldType::Link)
                        .with_link_type("Entry")
                        .with_validation(ValidationRule::link_content_type(["article"])),
                ),
        )
        .with_field(
            Field::new("rating", "Rating", FieldType::Integer)
                .with_validation(ValidationRule::range(Some(1.0), Some(5.0))),
        )
        .with_field(
            Field::new("featured", "Featured", FieldType::Boolean)
                .with_control(Control::new("boolean", "builtin").with_setting("trueLabel", "yes"))
                .with_default_value(DefaultValue::Bool(BTreeMap::from([(
                    "en-US".to_string(),
                    false,
                )]))),
        )
        .with_sidebar(Sidebar::new("publication-widget", "sidebar-builtin"))
        .with_sidebar(
            Sidebar::new("preview", "app").with_settings(SidebarSettings::new(
                r#"{"url":"https://preview.example.com"}"#,
            )),
        )
        .with_sidebar(Sidebar::new("versions-widget", "sidebar-builtin").disabled())
}

/// The article as stored remotely, at version 1.
pub fn article_remote() -> RemoteContentModel {
    serde_json::from_value(json!({
        "sys": {"id": "article", "version": 1},
        "name": "Article",
        "displayField": "title",
        "description": "A blog article",
        "fields": [
            {
                "id": "title", "name": "Title", "type": "Symbol", "required": true,
                "validations": [
                    {"unique": true},
                    {"size": {"min": 1, "max": 120}, "message": "Keep titles short"}
                ],
                "defaultValue": {"en-US": "Untitled"}
            },
            {
                "id": "slug", "name": "Slug", "type": "Symbol", "required": true,
                "validations": [
                    {"regexp": {"pattern": "^[a-z0-9-]+$"}, "message": "Lowercase letters, digits and dashes"}
                ]
            },
            {
                "id": "body", "name": "Body", "type": "RichText", "localized": true,
                "validations": [
                    {"enabledMarks": ["bold", "italic", "code"], "message": "Only basic marks"},
                    {"enabledNodeTypes": ["heading-2", "paragraph", "hyperlink"]}
                ]
            },
            {
                "id": "author", "name": "Author", "type": "Link", "linkType": "Entry",
                "validations": [{"linkContentType": ["author"]}]
            },
            {
                "id": "hero", "name": "Hero image", "type": "Link", "linkType": "Asset",
                "validations": [
                    {"linkMimetypeGroup": ["image"]},
                    {"assetFileSize": {"max": 5242880}}
                ]
            },
            {
                "id": "tags", "name": "Tags", "type": "Array",
                "items": {"type": "Symbol", "validations": [{"in": ["news", "opinion", "howto"]}]}
            },
            {
                "id": "related", "name": "Related articles", "type": "Array",
                "validations": [{"size": {"max": 5}}],
                "items": {
                    "type": "Link", "linkType": "Entry",
                    "validations": [{"linkContentType": ["article"]}]
                }
            },
            {
                "id": "rating", "name": "Rating", "type": "Integer",
                "validations": [{"range": {"min": 1, "max": 5}}]
            },
            {
                "id": "featured", "name": "Featured", "type": "Boolean",
                "defaultValue": {"en-US": false}
            }
        ]
    }))
    .expect("article fixture is valid wire JSON")
}

/// The article's editor interface, without `sys`.
pub fn article_editor_interface() -> EditorInterface {
    serde_json::from_value(json!({
        "controls": [
            {"fieldId": "title", "widgetId": "singleLine", "widgetNamespace": "builtin"},
            {"fieldId": "slug", "widgetId": "slugEditor", "widgetNamespace": "builtin"},
            {"fieldId": "body"},
            {"fieldId": "author"},
            {"fieldId": "hero"},
            {"fieldId": "tags"},
            {"fieldId": "related"},
            {"fieldId": "rating"},
            {
                "fieldId": "featured", "widgetId": "boolean", "widgetNamespace": "builtin",
                "settings": {"trueLabel": "yes"}
            }
        ],
        "sidebar": [
            {"widgetId": "publication-widget", "widgetNamespace": "sidebar-builtin", "settings": {}},
            {
                "widgetId": "preview", "widgetNamespace": "app",
                "settings": {"url": "https://preview.example.com"}
            },
            {"widgetId": "versions-widget", "widgetNamespace": "sidebar-builtin", "disabled": true}
        ]
    }))
    .expect("editor interface fixture is valid wire JSON")
}

/// A small content type without controls or sidebar.
pub fn author_model() -> ContentModel {
    ContentModel::new("Author", "name")
        .with_id("author")
        .with_field(Field::new("name", "Name", FieldType::Symbol).required())
        .with_field(Field::new("bio", "Bio", FieldType::Text))
}
