//! Content type and editor interface comparison
//!
//! Fields are matched by id, then their position is checked on its own, so a
//! field that only moved is reported as [`Difference::FieldMoved`] rather
//! than as a content change. Controls are matched by field id only, their
//! order is irrelevant. Sidebar widgets must also keep their position.

use cm_model::{
    ContentModel, Control, EditorInterface, RemoteContentModel, RemoteControl, Sidebar,
    flatten_settings,
};

use super::field::field_mismatch;
use super::Difference;

/// Every difference between a declared content type and the remote one, in
/// a stable order. Empty means in sync.
pub fn content_type_differences(
    desired: &ContentModel,
    remote: &RemoteContentModel,
) -> Vec<Difference> {
    let mut differences = Vec::new();

    if desired.name != remote.name {
        differences.push(Difference::Name {
            desired: desired.name.clone(),
            remote: remote.name.clone(),
        });
    }
    if desired.display_field != remote.display_field {
        differences.push(Difference::DisplayField {
            desired: desired.display_field.clone(),
            remote: remote.display_field.clone(),
        });
    }
    if desired.description != remote.description {
        differences.push(Difference::Description);
    }
    if desired.fields.len() != remote.fields.len() {
        differences.push(Difference::FieldCount {
            desired: desired.fields.len(),
            remote: remote.fields.len(),
        });
    }

    for (index, field) in desired.fields.iter().enumerate() {
        let Some((remote_index, remote_field)) = remote
            .fields
            .iter()
            .enumerate()
            .find(|(_, candidate)| candidate.id == field.id)
        else {
            differences.push(Difference::FieldMissing {
                field: field.id.clone(),
            });
            continue;
        };

        if let Some(attribute) = field_mismatch(field, remote_field) {
            differences.push(Difference::FieldChanged {
                field: field.id.clone(),
                attribute,
            });
        }
        if remote_index != index {
            differences.push(Difference::FieldMoved {
                field: field.id.clone(),
                from: remote_index,
                to: index,
            });
        }
    }

    differences
}

/// Whether the remote content type already matches the declaration.
pub fn content_type_equal(desired: &ContentModel, remote: &RemoteContentModel) -> bool {
    content_type_differences(desired, remote).is_empty()
}

/// Every difference between the declared controls and sidebar and the remote
/// editor interface. A missing editor interface compares as an empty one.
pub fn editor_interface_differences(
    desired: &ContentModel,
    remote: Option<&EditorInterface>,
) -> Vec<Difference> {
    let empty = EditorInterface::default();
    let remote = remote.unwrap_or(&empty);

    let mut differences = control_differences(desired, &remote.controls);
    differences.extend(sidebar_differences(&desired.sidebar, remote));
    differences
}

/// Whether the remote editor interface already matches the declaration.
pub fn editor_interface_equal(desired: &ContentModel, remote: Option<&EditorInterface>) -> bool {
    editor_interface_differences(desired, remote).is_empty()
}

fn control_differences(desired: &ContentModel, remote: &[RemoteControl]) -> Vec<Difference> {
    let mut differences = Vec::new();

    let bound = desired.fields.iter().filter(|f| f.control.is_some()).count();
    let remote_bound = remote.iter().filter(|c| c.is_bound()).count();
    if bound != remote_bound {
        differences.push(Difference::ControlCount {
            desired: bound,
            remote: remote_bound,
        });
    }

    for field in &desired.fields {
        let Some(control) = &field.control else {
            continue;
        };

        match remote.iter().find(|c| c.field_id == field.id) {
            None => differences.push(Difference::ControlMissing {
                field: field.id.clone(),
            }),
            Some(remote_control) if !control_equal(control, remote_control) => {
                differences.push(Difference::ControlChanged {
                    field: field.id.clone(),
                });
            }
            Some(_) => {}
        }
    }

    differences
}

fn control_equal(desired: &Control, remote: &RemoteControl) -> bool {
    remote.widget_id.as_deref() == Some(desired.widget_id.as_str())
        && desired.widget_namespace == remote.widget_namespace
        && desired.settings == remote.settings
}

fn sidebar_differences(desired: &[Sidebar], remote: &EditorInterface) -> Vec<Difference> {
    let mut differences = Vec::new();

    if desired.len() != remote.sidebar.len() {
        differences.push(Difference::SidebarCount {
            desired: desired.len(),
            remote: remote.sidebar.len(),
        });
    }

    for (index, widget) in desired.iter().enumerate() {
        let Some((remote_index, remote_widget)) = remote
            .sidebar
            .iter()
            .enumerate()
            .find(|(_, candidate)| candidate.widget_id == widget.widget_id)
        else {
            differences.push(Difference::SidebarMissing {
                widget: widget.widget_id.clone(),
            });
            continue;
        };

        if remote_index != index {
            differences.push(Difference::SidebarMoved {
                widget: widget.widget_id.clone(),
                from: remote_index,
                to: index,
            });
        }

        // Disabled widgets never carry settings remotely, so theirs are not compared
        let settings_equal = widget.disabled
            || widget
                .settings
                .decode()
                .is_ok_and(|settings| match &remote_widget.settings {
                    Some(remote_settings) => settings == flatten_settings(remote_settings),
                    None => settings.is_empty(),
                });

        if widget.disabled != remote_widget.disabled
            || widget.widget_namespace != remote_widget.widget_namespace
            || !settings_equal
        {
            differences.push(Difference::SidebarChanged {
                widget: widget.widget_id.clone(),
            });
        }
    }

    differences
}
