//! Content type and editor interface mapping

use cm_model::{
    ContentModel, EditorInterface, RemoteContentModel, RemoteControl, RemoteSidebarWidget, Sidebar,
    SidebarSettings, Sys,
};

use super::field::{draft_field, import_field};
use crate::error::{Error, Result};

/// Build the remote payload for a declared content type.
///
/// The payload carries `sys` only once the content type has an id, so a
/// create without a chosen id lets the remote side assign one. The first
/// field that fails to draft aborts the whole payload.
///
/// # Errors
///
/// Propagates the first field mapping failure.
pub fn draft_content_type(model: &ContentModel) -> Result<RemoteContentModel> {
    let fields = model
        .fields
        .iter()
        .map(draft_field)
        .collect::<Result<Vec<_>>>()?;

    Ok(RemoteContentModel {
        sys: model.id().map(|id| Sys::new(id, model.version)),
        name: model.name.clone(),
        display_field: model.display_field.clone(),
        description: model.description.clone(),
        fields,
    })
}

/// Build the declared form of a remote content type and its editor interface.
///
/// The editor interface may not exist yet, for example right after the
/// content type was created. Fields then import without controls and the
/// editor interface version is zero.
///
/// # Errors
///
/// Fails when a field cannot be imported, see
/// [`import_field`](super::import_field).
pub fn import_content_type(
    remote: &RemoteContentModel,
    editor_interface: Option<&EditorInterface>,
) -> Result<ContentModel> {
    let controls: &[RemoteControl] = editor_interface
        .map(|ei| ei.controls.as_slice())
        .unwrap_or_default();

    let fields = remote
        .fields
        .iter()
        .map(|field| import_field(field, controls))
        .collect::<Result<Vec<_>>>()?;

    let sidebar = editor_interface
        .map(|ei| ei.sidebar.iter().map(import_sidebar).collect::<Result<Vec<_>>>())
        .transpose()?
        .unwrap_or_default();

    Ok(ContentModel {
        id: remote.id().map(str::to_string),
        name: remote.name.clone(),
        display_field: remote.display_field.clone(),
        description: remote.description.clone(),
        version: remote.version(),
        version_controls: editor_interface.map_or(0, EditorInterface::version),
        fields,
        sidebar,
    })
}

fn import_sidebar(widget: &RemoteSidebarWidget) -> Result<Sidebar> {
    let settings = match &widget.settings {
        Some(settings) => SidebarSettings::from_object(settings)?,
        None => SidebarSettings::default(),
    };

    Ok(Sidebar {
        widget_id: widget.widget_id.clone(),
        widget_namespace: widget.widget_namespace.clone(),
        settings,
        disabled: widget.disabled,
    })
}

/// Build the editor interface payload for a declared content type.
///
/// `base` is the editor interface last read; its `sys` is kept so the write
/// carries the observed version. Controls are rebuilt from the declared fields
/// in order, one entry per field, and the sidebar from the declared widgets
/// in order. Disabled widgets never carry settings.
///
/// # Errors
///
/// Fails when the settings of an enabled sidebar widget are not a JSON
/// object.
pub fn draft_editor_interface(
    model: &ContentModel,
    base: &EditorInterface,
) -> Result<EditorInterface> {
    let controls = model
        .fields
        .iter()
        .map(|field| match &field.control {
            Some(control) => RemoteControl {
                field_id: field.id.clone(),
                widget_id: Some(control.widget_id.clone()),
                widget_namespace: control.widget_namespace.clone(),
                settings: control.settings.clone(),
            },
            None => RemoteControl {
                field_id: field.id.clone(),
                ..RemoteControl::default()
            },
        })
        .collect();

    let sidebar = model
        .sidebar
        .iter()
        .map(draft_sidebar)
        .collect::<Result<Vec<_>>>()?;

    Ok(EditorInterface {
        sys: base.sys.clone(),
        controls,
        sidebar,
    })
}

fn draft_sidebar(widget: &Sidebar) -> Result<RemoteSidebarWidget> {
    let settings = if widget.disabled {
        None
    } else {
        let object = widget
            .settings
            .to_object()
            .map_err(|e| Error::InvalidSidebarSettings {
                widget: widget.widget_id.clone(),
                message: e.to_string(),
            })?;
        Some(object)
    };

    Ok(RemoteSidebarWidget {
        widget_id: widget.widget_id.clone(),
        widget_namespace: widget.widget_namespace.clone(),
        disabled: widget.disabled,
        settings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cm_model::{Control, Field, FieldType};
    use pretty_assertions::assert_eq;

    fn article() -> ContentModel {
        ContentModel::new("Article", "title")
            .with_field(
                Field::new("title", "Title", FieldType::Symbol)
                    .required()
                    .with_control(Control::new("singleLine", "builtin")),
            )
            .with_field(Field::new("body", "Body", FieldType::Text))
    }

    #[test]
    fn test_draft_without_id_has_no_sys() {
        let remote = draft_content_type(&article()).unwrap();

        assert_eq!(remote.sys, None);
        assert_eq!(remote.description, None);
        assert_eq!(remote.fields.len(), 2);
    }

    #[test]
    fn test_draft_with_id_carries_version() {
        let mut model = article().with_id("article").with_description("Posts");
        model.version = 4;

        let remote = draft_content_type(&model).unwrap();
        assert_eq!(remote.sys, Some(Sys::new("article", 4)));
        assert_eq!(remote.description.as_deref(), Some("Posts"));
    }

    #[test]
    fn test_draft_fails_fast_on_bad_field() {
        let model = article().with_field(Field::new("tags", "Tags", FieldType::Array));

        assert!(draft_content_type(&model).is_err());
    }

    #[test]
    fn test_import_without_editor_interface() {
        let remote = draft_content_type(&article().with_id("article")).unwrap();

        let imported = import_content_type(&remote, None).unwrap();
        assert_eq!(imported.version_controls, 0);
        assert!(imported.sidebar.is_empty());
        assert!(imported.fields.iter().all(|field| field.control.is_none()));
    }

    #[test]
    fn test_import_sidebar_defaults_missing_settings() {
        let remote = draft_content_type(&article().with_id("article")).unwrap();
        let ei = EditorInterface {
            sys: Some(Sys::new("default", 3)),
            controls: Vec::new(),
            sidebar: vec![RemoteSidebarWidget {
                widget_id: "publication-widget".to_string(),
                widget_namespace: "sidebar-builtin".to_string(),
                disabled: false,
                settings: None,
            }],
        };

        let imported = import_content_type(&remote, Some(&ei)).unwrap();
        assert_eq!(imported.version_controls, 3);
        assert_eq!(imported.sidebar[0].settings, SidebarSettings::default());
    }

    #[test]
    fn test_import_keeps_typed_sidebar_settings() {
        let remote = draft_content_type(&article().with_id("article")).unwrap();
        let settings = serde_json::json!({"count": 3, "enabled": true});
        let ei = EditorInterface {
            sys: Some(Sys::new("default", 1)),
            controls: Vec::new(),
            sidebar: vec![RemoteSidebarWidget {
                widget_id: "counter".to_string(),
                widget_namespace: "app".to_string(),
                disabled: false,
                settings: settings.as_object().cloned(),
            }],
        };

        let imported = import_content_type(&remote, Some(&ei)).unwrap();
        let drafted = draft_editor_interface(&imported, &ei).unwrap();

        assert_eq!(drafted.sidebar[0].settings, settings.as_object().cloned());
    }

    #[test]
    fn test_draft_editor_interface_keeps_field_order_and_base_version() {
        let base = EditorInterface {
            sys: Some(Sys::new("default", 9)),
            ..EditorInterface::default()
        };

        let ei = draft_editor_interface(&article(), &base).unwrap();
        assert_eq!(ei.version(), 9);

        let ids: Vec<_> = ei.controls.iter().map(|c| c.field_id.as_str()).collect();
        assert_eq!(ids, ["title", "body"]);
        assert_eq!(ei.controls[0].widget_id.as_deref(), Some("singleLine"));
        assert!(!ei.controls[1].is_bound());
    }

    #[test]
    fn test_disabled_sidebar_widget_drops_settings() {
        let model = article().with_sidebar(
            Sidebar::new("preview", "app")
                .with_settings(SidebarSettings::new(r#"{"url":"https://example.com"}"#))
                .disabled(),
        );

        let ei = draft_editor_interface(&model, &EditorInterface::default()).unwrap();
        assert!(ei.sidebar[0].disabled);
        assert_eq!(ei.sidebar[0].settings, None);
    }

    #[test]
    fn test_enabled_sidebar_with_bad_settings_fails() {
        let model = article()
            .with_sidebar(Sidebar::new("preview", "app").with_settings(SidebarSettings::new("[1]")));

        let err = draft_editor_interface(&model, &EditorInterface::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidSidebarSettings { ref widget, .. } if widget == "preview"));
    }
}
