//! Multi content type scenarios against the in-memory remote

use std::sync::Arc;

use cm_model::{ContentModel, Field, FieldType, Items};
use cm_reconcile::remote::{ErrorDetail, ErrorResponse};
use cm_reconcile::{
    ApplyReport, CheckStatus, ErrorKind, ReconcileOptions, Reconciler, RemoteError, Result,
    Severity,
};
use cm_test_utils::fixtures::{article_model, author_model};
use cm_test_utils::{InMemoryRemote, WriteOp};
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Plan and apply, re-reading after a conflict. `between` runs after each
/// plan, before its writes.
fn apply_with_retry(
    reconciler: &Reconciler<Arc<InMemoryRemote>>,
    model: &ContentModel,
    attempts: usize,
    mut between: impl FnMut(usize),
) -> Result<ApplyReport> {
    let mut attempt = 0;
    loop {
        let plan = reconciler.plan(model)?;
        between(attempt);

        match reconciler.apply_plan(model, &plan) {
            Err(e) if e.is_retryable() && attempt + 1 < attempts => attempt += 1,
            other => return other,
        }
    }
}

#[test]
fn test_apply_all_then_check_all_is_healthy() {
    let remote = Arc::new(InMemoryRemote::new());
    let reconciler = Reconciler::new(Arc::clone(&remote));
    let models = [author_model(), article_model()];

    let report = reconciler.apply_all(&models);
    assert!(report.success);
    assert!(report.diagnostics.is_empty());
    assert_eq!(
        report.actions,
        vec![
            "Created content type author".to_string(),
            "Created content type article".to_string(),
            "Updated editor interface of article to version 1".to_string(),
        ]
    );

    assert!(reconciler.check_all(&models).is_healthy());

    // A second pass has nothing to do
    let report = reconciler.apply_all(&models);
    assert_eq!(
        report.actions,
        vec!["No changes needed".to_string(), "No changes needed".to_string()]
    );
    assert_eq!(remote.writes().len(), 3);
}

#[test]
fn test_conflict_is_retried_after_reread() {
    let remote = Arc::new(
        InMemoryRemote::new()
            .with_content_type(cm_test_utils::fixtures::article_remote())
            .with_editor_interface("article", cm_test_utils::fixtures::article_editor_interface()),
    );
    let reconciler = Reconciler::new(Arc::clone(&remote));

    let mut model = article_model();
    model.name = "Story".to_string();

    let report = apply_with_retry(&reconciler, &model, 3, |attempt| {
        if attempt == 0 {
            remote.touch_content_type("article");
        }
    })
    .unwrap();

    assert_eq!(
        remote.writes(),
        vec![WriteOp::UpdateContentType {
            id: "article".to_string(),
            version: 2,
        }]
    );
    assert_eq!(report.state.unwrap().name, "Story");
}

#[test]
fn test_conflict_gives_up_after_attempts() {
    let remote = Arc::new(InMemoryRemote::new().with_content_type(cm_test_utils::fixtures::article_remote()));
    let reconciler = Reconciler::new(Arc::clone(&remote));

    let mut model = article_model();
    model.name = "Story".to_string();

    let err = apply_with_retry(&reconciler, &model, 2, |_| remote.touch_content_type("article"))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(remote.writes().is_empty());
    assert_eq!(remote.content_type("article").unwrap().version(), 3);
}

#[test]
fn test_non_retryable_errors_are_not_retried() {
    let remote = Arc::new(InMemoryRemote::new());
    let reconciler = Reconciler::new(Arc::clone(&remote));
    remote.fail_next(RemoteError::Transport("timeout".to_string()));

    let mut plans = 0;
    let err = apply_with_retry(&reconciler, &author_model(), 3, |_| plans += 1).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(plans, 0);
}

#[test]
fn test_diagnostics_follow_model_order() {
    let remote = Arc::new(InMemoryRemote::new());
    let reconciler = Reconciler::new(Arc::clone(&remote));

    remote.fail_next(RemoteError::Validation(
        ErrorResponse::new("Validation error")
            .with_detail(ErrorDetail::new("Too many fields").at(["fields"]))
            .with_detail(ErrorDetail::new("Unknown widget").at(["controls"])),
    ));
    let broken = author_model().with_field(Field::new("tags", "Tags", FieldType::Array));

    let report = reconciler.apply_all(&[article_model(), broken]);

    assert!(!report.success);
    let summary: Vec<_> = report
        .diagnostics
        .iter()
        .map(|d| (d.severity, d.summary.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (Severity::Warning, "Too many fields (fields)"),
            (Severity::Warning, "Unknown widget (controls)"),
            (Severity::Error, "Validation error"),
            (Severity::Error, "Field tags has type Array but declares no items"),
        ]
    );
    assert!(remote.writes().is_empty());
}

#[test]
fn test_disabled_widget_settings_never_reach_remote() {
    let remote = Arc::new(InMemoryRemote::new());
    let reconciler = Reconciler::new(Arc::clone(&remote));

    let mut model = article_model();
    model.sidebar[2].settings = cm_model::SidebarSettings::new(r#"{"mode":"compact"}"#);

    // The remote rejects settings on disabled widgets
    reconciler.apply(&model).unwrap();

    let stored = remote.editor_interface("article").unwrap();
    assert!(stored.sidebar.iter().filter(|w| w.disabled).all(|w| w.settings.is_none()));
}

#[rstest]
#[case::create(InMemoryRemote::new(), 2)]
#[case::update(
    InMemoryRemote::new().with_content_type(cm_test_utils::fixtures::article_remote()),
    2
)]
fn test_dry_run_never_writes(#[case] remote: InMemoryRemote, #[case] expected_actions: usize) {
    let options = ReconcileOptions {
        dry_run: true,
        ..ReconcileOptions::default()
    };
    let reconciler = Reconciler::with_options(remote, options);

    let mut model = article_model();
    model.description = Some("Changed".to_string());

    let report = reconciler.apply(&model).unwrap();
    assert_eq!(report.actions.len(), expected_actions);
    assert!(report.actions.iter().all(|a| a.starts_with("[dry-run] Would ")));
    assert!(reconciler.remote().writes().is_empty());
    assert_ne!(reconciler.check(&model).status, CheckStatus::Healthy);
}

#[test]
fn test_items_change_is_detected_and_applied() {
    let remote = Arc::new(InMemoryRemote::new());
    let reconciler = Reconciler::new(Arc::clone(&remote));
    let model = author_model().with_field(
        Field::new("aliases", "Aliases", FieldType::Array).with_items(Items::new(FieldType::Symbol)),
    );
    reconciler.apply(&model).unwrap();

    let mut changed = model.clone();
    if let Some(field) = changed.fields.last_mut() {
        field.items = Some(Items::new(FieldType::Text));
    }

    let check = reconciler.check(&changed);
    assert_eq!(check.status, CheckStatus::Drifted);
    assert_eq!(check.drifted[0].description, "field 'aliases' differs in items");

    reconciler.apply(&changed).unwrap();
    assert!(reconciler.check(&changed).is_healthy());
    assert!(!reconciler.check(&model).is_healthy());
}
