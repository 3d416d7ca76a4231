//! Reconciler implementation
//!
//! The Reconciler coordinates a declared content type with its remote copy:
//! the content type itself and its independently versioned editor interface.

use std::fmt;

use cm_model::{ContentModel, EditorInterface, RemoteContentModel, Sys};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::diagnostics::Diagnostics;
use crate::drift::{Difference, content_type_differences, editor_interface_differences};
use crate::error::{Error, Result};
use crate::mapper::{draft_content_type, draft_editor_interface, import_content_type};
use crate::remote::{RemoteApi, RemoteError};

use super::check::CheckReport;

/// Report from applying several content types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    /// Whether every content type applied without error
    pub success: bool,
    /// Actions taken during the operation
    pub actions: Vec<String>,
    /// Translated failures, in the order they occurred
    pub diagnostics: Diagnostics,
}

impl SyncReport {
    /// Create a successful sync report
    pub fn success() -> Self {
        Self {
            success: true,
            actions: Vec::new(),
            diagnostics: Diagnostics::default(),
        }
    }

    /// Add an action to the report
    pub fn with_action(mut self, action: String) -> Self {
        self.actions.push(action);
        self
    }
}

/// Options for plan and apply operations
#[derive(Debug, Clone, Copy)]
pub struct ReconcileOptions {
    /// If false, field controls are neither compared nor written; the remote
    /// controls are sent back unchanged.
    pub manage_field_controls: bool,
    /// If true, simulate changes without writing.
    /// Actions will be prefixed with "[dry-run] Would ..."
    pub dry_run: bool,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            manage_field_controls: true,
            dry_run: false,
        }
    }
}

/// Both remote objects of one content type, as read together.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteState {
    pub id: String,
    pub content_type: RemoteContentModel,
    /// `None` until the editor interface is written for the first time.
    pub editor_interface: Option<EditorInterface>,
}

impl RemoteState {
    pub fn editor_interface_version(&self) -> u64 {
        self.editor_interface
            .as_ref()
            .map_or(0, EditorInterface::version)
    }
}

/// One remote write
#[derive(Debug, Clone, PartialEq)]
pub enum PlannedAction {
    CreateContentType {
        name: String,
        /// `None` lets the remote side assign the id.
        id: Option<String>,
    },
    UpdateContentType {
        id: String,
        version: u64,
        differences: Vec<Difference>,
    },
    UpdateEditorInterface {
        version: u64,
        differences: Vec<Difference>,
    },
}

impl fmt::Display for PlannedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannedAction::CreateContentType { name, id: Some(id) } => {
                write!(f, "create content type {id} ({name})")
            }
            PlannedAction::CreateContentType { name, id: None } => {
                write!(f, "create content type {name}")
            }
            PlannedAction::UpdateContentType {
                id,
                version,
                differences,
            } => write!(
                f,
                "update content type {id} at version {version} ({} differences)",
                differences.len()
            ),
            PlannedAction::UpdateEditorInterface {
                version,
                differences,
            } => write!(
                f,
                "update editor interface at version {version} ({} differences)",
                differences.len()
            ),
        }
    }
}

/// The writes needed to bring one content type in line, and the remote
/// state they were computed from.
#[derive(Debug, Clone)]
pub struct Plan {
    pub content_type: String,
    pub actions: Vec<PlannedAction>,
    observed: Option<RemoteState>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The remote state read while planning, `None` if nothing existed.
    pub fn observed(&self) -> Option<&RemoteState> {
        self.observed.as_ref()
    }
}

/// Report from applying one content type
#[derive(Debug, Clone)]
pub struct ApplyReport {
    pub content_type: String,
    /// Actions taken during the operation
    pub actions: Vec<String>,
    /// The remote state imported after the writes. `None` for a dry run or
    /// after a delete.
    pub state: Option<ContentModel>,
}

impl ApplyReport {
    fn new(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            actions: Vec::new(),
            state: None,
        }
    }
}

/// Engine for reconciling declared content types with the remote API
///
/// The Reconciler provides four main operations:
/// - **check**: Report whether the remote state matches the declaration
/// - **plan**: Compute the writes needed, without performing them
/// - **apply**: Perform those writes and import the resulting state
/// - **destroy**: Delete a content type at its last observed version
///
/// Every write submits the version observed by the read that preceded it. A
/// stale version surfaces as a conflict; the Reconciler never retries.
pub struct Reconciler<R> {
    remote: R,
    options: ReconcileOptions,
}

impl<R: RemoteApi> Reconciler<R> {
    pub fn new(remote: R) -> Self {
        Self::with_options(remote, ReconcileOptions::default())
    }

    pub fn with_options(remote: R, options: ReconcileOptions) -> Self {
        Self { remote, options }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn options(&self) -> ReconcileOptions {
        self.options
    }

    /// Read both remote objects of a content type.
    ///
    /// # Errors
    ///
    /// Returns any remote failure other than the content type not existing,
    /// which is `Ok(None)`.
    pub fn read(&self, id: &str) -> Result<Option<RemoteState>> {
        let content_type = match self.remote.get_content_type(id) {
            Ok(content_type) => content_type,
            Err(RemoteError::NotFound { .. }) => {
                debug!(content_type = %id, "Content type not found");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let editor_interface = self.remote.get_editor_interface(id)?;

        Ok(Some(RemoteState {
            id: id.to_string(),
            content_type,
            editor_interface,
        }))
    }

    /// Read a content type and import it into its declared form.
    ///
    /// # Errors
    ///
    /// Fails on remote errors and on remote state the model cannot express.
    pub fn import(&self, id: &str) -> Result<Option<ContentModel>> {
        self.read(id)?
            .map(|state| import_content_type(&state.content_type, state.editor_interface.as_ref()))
            .transpose()
    }

    fn observe(&self, desired: &ContentModel) -> Result<Option<RemoteState>> {
        match desired.id() {
            Some(id) => self.read(id),
            None => Ok(None),
        }
    }

    fn editor_interface_drift(
        &self,
        desired: &ContentModel,
        remote: Option<&EditorInterface>,
    ) -> Vec<Difference> {
        editor_interface_differences(desired, remote)
            .into_iter()
            .filter(|d| self.options.manage_field_controls || !d.is_control())
            .collect()
    }

    fn draft_editor_interface(
        &self,
        desired: &ContentModel,
        base: &EditorInterface,
    ) -> Result<EditorInterface> {
        let mut editor_interface = draft_editor_interface(desired, base)?;
        if !self.options.manage_field_controls {
            editor_interface.controls = base.controls.clone();
        }
        Ok(editor_interface)
    }

    /// Check one content type against the remote state. Never writes.
    pub fn check(&self, desired: &ContentModel) -> CheckReport {
        let label = desired.label();

        if let Err(e) = desired.validate() {
            return CheckReport::broken(format!("Invalid declaration for {label}: {e}"));
        }

        let state = match self.observe(desired) {
            Ok(Some(state)) => state,
            Ok(None) => return CheckReport::not_found(label),
            Err(e) => return CheckReport::broken(format!("Failed to read {label}: {e}")),
        };

        let mut differences = content_type_differences(desired, &state.content_type);
        differences.extend(self.editor_interface_drift(desired, state.editor_interface.as_ref()));

        debug!(content_type = %label, differences = differences.len(), "Checked content type");

        CheckReport::from_differences(label, &differences)
    }

    /// Check several content types; the status is the worst of them.
    pub fn check_all(&self, models: &[ContentModel]) -> CheckReport {
        models
            .iter()
            .map(|model| self.check(model))
            .collect()
    }

    /// Compute the writes that would bring the remote state in line.
    ///
    /// Both payloads are drafted before anything is read, so a declaration
    /// that cannot be mapped fails here and never reaches a write.
    ///
    /// # Errors
    ///
    /// Fails on invalid declarations, mapping failures and remote read errors.
    pub fn plan(&self, desired: &ContentModel) -> Result<Plan> {
        desired.validate()?;
        draft_content_type(desired)?;

        let observed = self.observe(desired)?;
        let base = observed
            .as_ref()
            .and_then(|state| state.editor_interface.clone())
            .unwrap_or_default();
        self.draft_editor_interface(desired, &base)?;

        let mut actions = Vec::new();

        match &observed {
            None => {
                actions.push(PlannedAction::CreateContentType {
                    name: desired.name.clone(),
                    id: desired.id().map(str::to_string),
                });

                let differences = self.editor_interface_drift(desired, None);
                if !differences.is_empty() {
                    actions.push(PlannedAction::UpdateEditorInterface {
                        version: 0,
                        differences,
                    });
                }
            }
            Some(state) => {
                let differences = content_type_differences(desired, &state.content_type);
                if !differences.is_empty() {
                    actions.push(PlannedAction::UpdateContentType {
                        id: state.id.clone(),
                        version: state.content_type.version(),
                        differences,
                    });
                }

                let differences =
                    self.editor_interface_drift(desired, state.editor_interface.as_ref());
                if !differences.is_empty() {
                    actions.push(PlannedAction::UpdateEditorInterface {
                        version: state.editor_interface_version(),
                        differences,
                    });
                }
            }
        }

        debug!(content_type = %desired.label(), actions = actions.len(), "Planned content type");

        Ok(Plan {
            content_type: desired.label().to_string(),
            actions,
            observed,
        })
    }

    /// Plan and apply in one step.
    ///
    /// # Errors
    ///
    /// See [`Reconciler::plan`] and [`Reconciler::apply_plan`].
    pub fn apply(&self, desired: &ContentModel) -> Result<ApplyReport> {
        let plan = self.plan(desired)?;
        self.apply_plan(desired, &plan)
    }

    /// Perform the writes of a plan, in order: the content type first, then
    /// its editor interface with the editor interface's own version.
    ///
    /// The plan's versions are submitted as is. If the remote state changed
    /// since the plan was computed the first write fails with a conflict and
    /// nothing is written.
    ///
    /// # Errors
    ///
    /// Fails on mapping failures and on the first remote write error.
    pub fn apply_plan(&self, desired: &ContentModel, plan: &Plan) -> Result<ApplyReport> {
        let content_type = draft_content_type(desired)?;
        let base = plan
            .observed
            .as_ref()
            .and_then(|state| state.editor_interface.clone())
            .unwrap_or_default();
        let editor_interface = self.draft_editor_interface(desired, &base)?;

        let mut report = ApplyReport::new(&plan.content_type);

        if plan.is_empty() {
            report.actions.push("No changes needed".to_string());
            report.state = plan
                .observed
                .as_ref()
                .map(|state| {
                    import_content_type(&state.content_type, state.editor_interface.as_ref())
                })
                .transpose()?;
            return Ok(report);
        }

        if self.options.dry_run {
            for action in &plan.actions {
                report.actions.push(format!("[dry-run] Would {action}"));
            }
            return Ok(report);
        }

        let mut id = plan.observed.as_ref().map(|state| state.id.clone());

        for action in &plan.actions {
            match action {
                PlannedAction::CreateContentType { .. } => {
                    let created = self.remote.create_content_type(&content_type)?;
                    let created_id = created.id().ok_or_else(|| Error::MissingId {
                        name: desired.name.clone(),
                    })?;

                    info!(content_type = %created_id, version = created.version(), "Created content type");
                    report
                        .actions
                        .push(format!("Created content type {created_id}"));
                    id = Some(created_id.to_string());
                }
                PlannedAction::UpdateContentType {
                    id: target,
                    version,
                    differences,
                } => {
                    let mut payload = content_type.clone();
                    payload.sys = Some(Sys::new(target.as_str(), *version));

                    let updated = self
                        .remote
                        .update_content_type(target, *version, &payload)
                        .inspect_err(log_conflict)?;

                    info!(
                        content_type = %target,
                        version = updated.version(),
                        differences = differences.len(),
                        "Updated content type"
                    );
                    report.actions.push(format!(
                        "Updated content type {target} to version {}",
                        updated.version()
                    ));
                }
                PlannedAction::UpdateEditorInterface { version, .. } => {
                    let target = id.as_deref().ok_or_else(|| Error::MissingId {
                        name: desired.name.clone(),
                    })?;

                    let written = self
                        .remote
                        .update_editor_interface(target, *version, &editor_interface)
                        .inspect_err(log_conflict)?;

                    info!(content_type = %target, version = written.version(), "Updated editor interface");
                    report.actions.push(format!(
                        "Updated editor interface of {target} to version {}",
                        written.version()
                    ));
                }
            }
        }

        if let Some(id) = &id {
            report.state = self.import(id)?;
        }

        Ok(report)
    }

    /// Apply several content types one after another.
    ///
    /// A failure is translated into diagnostics and does not stop the
    /// remaining content types.
    pub fn apply_all(&self, models: &[ContentModel]) -> SyncReport {
        let mut report = SyncReport::success();

        for model in models {
            match self.apply(model) {
                Ok(applied) => {
                    for action in applied.actions {
                        report = report.with_action(action);
                    }
                }
                Err(e) => {
                    warn!(content_type = %model.label(), error = %e, "Failed to apply content type");
                    report.diagnostics.extend(Diagnostics::translate(Some(&e)));
                }
            }
        }

        report.success = !report.diagnostics.has_error();
        report
    }

    /// Delete a content type at the version recorded in `state`.
    ///
    /// A content type that is already gone counts as deleted.
    ///
    /// # Errors
    ///
    /// Fails when `state` has no id, and on remote errors such as a conflict.
    pub fn destroy(&self, state: &ContentModel) -> Result<ApplyReport> {
        let id = state.id().ok_or_else(|| Error::MissingId {
            name: state.name.clone(),
        })?;
        let mut report = ApplyReport::new(id);

        if self.options.dry_run {
            report
                .actions
                .push(format!("[dry-run] Would delete content type {id}"));
            return Ok(report);
        }

        match self.remote.delete_content_type(id, state.version) {
            Ok(()) => {
                info!(content_type = %id, version = state.version, "Deleted content type");
                report.actions.push(format!("Deleted content type {id}"));
            }
            Err(RemoteError::NotFound { .. }) => {
                debug!(content_type = %id, "Content type already deleted");
                report
                    .actions
                    .push(format!("Content type {id} already deleted"));
            }
            Err(e) => {
                log_conflict(&e);
                return Err(e.into());
            }
        }

        Ok(report)
    }
}

fn log_conflict(error: &RemoteError) {
    if let RemoteError::Conflict {
        id,
        submitted,
        current,
    } = error
    {
        warn!(
            content_type = %id,
            submitted,
            current,
            "Version conflict; re-read and plan again"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_manage_controls() {
        let options = ReconcileOptions::default();
        assert!(options.manage_field_controls);
        assert!(!options.dry_run);
    }

    #[test]
    fn test_planned_action_display() {
        let create = PlannedAction::CreateContentType {
            name: "Article".to_string(),
            id: Some("article".to_string()),
        };
        assert_eq!(create.to_string(), "create content type article (Article)");

        let update = PlannedAction::UpdateEditorInterface {
            version: 3,
            differences: vec![Difference::Description],
        };
        assert_eq!(
            update.to_string(),
            "update editor interface at version 3 (1 differences)"
        );
    }

    #[test]
    fn test_sync_report_with_action() {
        let report = SyncReport::success().with_action("Created content type article".to_string());
        assert!(report.success);
        assert_eq!(report.actions.len(), 1);
    }
}
