//! Manifest to remote and back
//!
//! Loads a manifest from disk, resolves the client settings, applies the
//! declared content types to an in-memory remote, then detects and repairs an
//! out-of-band edit.

use cm_config::{ClientConfig, MapEnv, env, load_manifest};
use cm_model::{DefaultValue, FieldType};
use cm_reconcile::{CheckStatus, Fragment, Reconciler};
use cm_test_utils::{InMemoryRemote, TestManifest, WriteOp};
use pretty_assertions::assert_eq;

const MANIFEST: &str = r#"
[client]
space_id = "space-1"
environment = "staging"

[[content_type]]
id = "author"
name = "Author"
display_field = "name"
description = "People who write articles"

[[content_type.fields]]
id = "name"
name = "Name"
type = "Symbol"
required = true
validations = [{ size = { min = 1.0, max = 80.0 }, message = "Keep it short" }]
control = { widget_id = "singleLine", widget_namespace = "builtin" }

[[content_type.fields]]
id = "bio"
name = "Biography"
type = "Text"
localized = true

[[content_type.fields]]
id = "avatar"
name = "Avatar"
type = "Link"
link_type = "Asset"
validations = [{ link_mimetype_group = ["image"] }]

[[content_type.fields]]
id = "active"
name = "Active"
type = "Boolean"
default_value = { bool = { "en-US" = true } }

[[content_type.sidebar]]
widget_id = "publication-widget"
widget_namespace = "sidebar-builtin"

[[content_type.sidebar]]
widget_id = "preview-widget"
widget_namespace = "sidebar-builtin"
settings = '{"showPreview":"true"}'
"#;

fn token_env() -> MapEnv {
    MapEnv::new().with(env::MANAGEMENT_TOKEN, "token-from-env")
}

#[test]
fn test_manifest_loads_and_resolves_client() {
    let manifest_file = TestManifest::new(MANIFEST);
    let manifest = load_manifest(manifest_file.path()).unwrap();

    let client: ClientConfig = manifest.client_config(&token_env()).unwrap();
    assert_eq!(client.space_id, "space-1");
    assert_eq!(client.environment, "staging");
    assert_eq!(client.access_token, "token-from-env");

    let author = manifest.content_type("author").unwrap();
    assert_eq!(author.fields.len(), 4);
    assert_eq!(author.fields[2].field_type, FieldType::Link);
    assert_eq!(
        author.fields[3].default_value,
        Some(DefaultValue::Bool([("en-US".to_string(), true)].into()))
    );
    assert_eq!(author.sidebar[1].settings.decode().unwrap()["showPreview"], "true");
}

#[test]
fn test_apply_detect_and_repair_drift() {
    let manifest_file = TestManifest::new(MANIFEST);
    let manifest = load_manifest(manifest_file.path()).unwrap();
    let author = manifest.content_type("author").unwrap();

    let reconciler = Reconciler::new(InMemoryRemote::new());

    // First apply creates everything
    let report = reconciler.apply(author).unwrap();
    assert_eq!(
        report.actions,
        vec![
            "Created content type author".to_string(),
            "Updated editor interface of author to version 1".to_string(),
        ]
    );
    let state = report.state.unwrap();
    assert_eq!(state.version, 1);
    assert_eq!(state.version_controls, 1);
    assert!(reconciler.check(author).is_healthy());

    // Someone renames a field in the web app
    reconciler
        .remote()
        .edit_content_type("author", |model| model.fields[1].name = "Bio".to_string());

    let check = reconciler.check(author);
    assert_eq!(check.status, CheckStatus::Drifted);
    assert_eq!(check.drifted.len(), 1);
    assert_eq!(check.drifted[0].fragment, Fragment::ContentType);
    assert_eq!(check.drifted[0].description, "field 'bio' differs in name");

    // Applying again writes only the content type, at the edited version
    let report = reconciler.apply(author).unwrap();
    assert_eq!(
        report.actions,
        vec!["Updated content type author to version 3".to_string()]
    );
    assert!(reconciler.check(author).is_healthy());

    // The imported state is what the next destroy uses
    let state = report.state.unwrap();
    assert_eq!(state.fields[1].name, "Biography");
    reconciler.destroy(&state).unwrap();

    assert_eq!(
        reconciler.remote().writes().last(),
        Some(&WriteOp::DeleteContentType {
            id: "author".to_string(),
            version: 3,
        })
    );
    assert_eq!(reconciler.check(author).status, CheckStatus::Missing);
}

#[test]
fn test_rewritten_manifest_is_picked_up() {
    let manifest_file = TestManifest::new(MANIFEST);
    let reconciler = Reconciler::new(InMemoryRemote::new());

    let manifest = load_manifest(manifest_file.path()).unwrap();
    reconciler.apply_all(&manifest.content_types);

    manifest_file.rewrite(&MANIFEST.replace("People who write articles", "Staff writers"));
    let manifest = load_manifest(manifest_file.path()).unwrap();
    let author = manifest.content_type("author").unwrap();

    let check = reconciler.check(author);
    assert_eq!(check.status, CheckStatus::Drifted);
    assert_eq!(check.drifted[0].description, "description differs");

    let report = reconciler.apply_all(&manifest.content_types);
    assert!(report.success);
    assert_eq!(
        reconciler.remote().content_type("author").unwrap().description.as_deref(),
        Some("Staff writers")
    );
}

#[test]
fn test_missing_token_is_reported() {
    let manifest_file = TestManifest::new(MANIFEST);
    let manifest = load_manifest(manifest_file.path()).unwrap();

    let err = manifest.client_config(&MapEnv::new()).unwrap_err();
    assert!(err.to_string().contains(env::MANAGEMENT_TOKEN));
}
