//! [`InMemoryRemote`], a [`RemoteApi`] backed by process memory.
//!
//! It keeps the parts of the remote contract the reconciler relies on:
//! versions start at 1 and grow by one per write, a stale version is a
//! conflict that leaves the store untouched, and an editor interface only
//! exists once written.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use cm_model::{EditorInterface, RemoteContentModel, Sys};
use cm_reconcile::remote::{ErrorDetail, ErrorResponse, RemoteApi, RemoteError, RemoteResult};

/// A successful write, as recorded in the write log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    CreateContentType { id: String },
    UpdateContentType { id: String, version: u64 },
    DeleteContentType { id: String, version: u64 },
    UpdateEditorInterface { id: String, version: u64 },
}

#[derive(Debug, Default)]
struct Store {
    content_types: BTreeMap<String, RemoteContentModel>,
    editor_interfaces: BTreeMap<String, EditorInterface>,
    next_id: u64,
    writes: Vec<WriteOp>,
    failures: VecDeque<RemoteError>,
}

/// In-memory remote management API.
///
/// # Example
///
/// ```rust,no_run
/// use cm_test_utils::{InMemoryRemote, fixtures};
///
/// let remote = InMemoryRemote::new().with_content_type(fixtures::article_remote());
/// assert_eq!(remote.content_type("article").unwrap().version(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryRemote {
    store: Mutex<Store>,
}

impl InMemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seed a content type. Its id comes from `sys`; the version is set to 1.
    pub fn with_content_type(self, mut model: RemoteContentModel) -> Self {
        let id = model
            .id()
            .expect("seeded content types need a sys id")
            .to_string();
        model.sys = Some(Sys::new(id.as_str(), 1));
        self.store().content_types.insert(id, model);
        self
    }

    /// Seed the editor interface of a content type at version 1.
    pub fn with_editor_interface(self, content_type_id: &str, mut ei: EditorInterface) -> Self {
        ei.sys = Some(Sys::new("default", 1));
        self.store()
            .editor_interfaces
            .insert(content_type_id.to_string(), ei);
        self
    }

    /// Make the next call, whatever it is, fail with `error`.
    pub fn fail_next(&self, error: RemoteError) {
        self.store().failures.push_back(error);
    }

    /// Simulate an out-of-band edit: bump the stored version without
    /// logging a write.
    pub fn touch_content_type(&self, id: &str) {
        if let Some(sys) = self
            .store()
            .content_types
            .get_mut(id)
            .and_then(|model| model.sys.as_mut())
        {
            sys.version += 1;
        }
    }

    /// Edit a stored content type in place and bump its version, as another
    /// client would.
    pub fn edit_content_type(&self, id: &str, edit: impl FnOnce(&mut RemoteContentModel)) {
        let mut store = self.store();
        if let Some(model) = store.content_types.get_mut(id) {
            edit(model);
            if let Some(sys) = model.sys.as_mut() {
                sys.version += 1;
            }
        }
    }

    /// The stored content type, without going through the API.
    pub fn content_type(&self, id: &str) -> Option<RemoteContentModel> {
        self.store().content_types.get(id).cloned()
    }

    /// The stored editor interface, without going through the API.
    pub fn editor_interface(&self, id: &str) -> Option<EditorInterface> {
        self.store().editor_interfaces.get(id).cloned()
    }

    /// Successful writes in order.
    pub fn writes(&self) -> Vec<WriteOp> {
        self.store().writes.clone()
    }

    fn injected_failure(store: &mut Store) -> RemoteResult<()> {
        match store.failures.pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn not_found(id: &str) -> RemoteError {
    RemoteError::NotFound { id: id.to_string() }
}

fn check_version(id: &str, submitted: u64, current: u64) -> RemoteResult<()> {
    if submitted == current {
        Ok(())
    } else {
        Err(RemoteError::Conflict {
            id: id.to_string(),
            submitted,
            current,
        })
    }
}

/// The remote side refuses settings on disabled sidebar widgets.
fn check_sidebar(ei: &EditorInterface) -> RemoteResult<()> {
    let details: Vec<ErrorDetail> = ei
        .sidebar
        .iter()
        .enumerate()
        .filter(|(_, widget)| widget.disabled && widget.settings.is_some())
        .map(|(index, _)| {
            ErrorDetail::new("Settings are not allowed on disabled widgets").at(vec![
                serde_json::json!("sidebar"),
                serde_json::json!(index),
                serde_json::json!("settings"),
            ])
        })
        .collect();

    if details.is_empty() {
        return Ok(());
    }

    let response = details
        .into_iter()
        .fold(ErrorResponse::new("Validation error"), ErrorResponse::with_detail);
    Err(RemoteError::Validation(response))
}

impl RemoteApi for InMemoryRemote {
    fn get_content_type(&self, id: &str) -> RemoteResult<RemoteContentModel> {
        let mut store = self.store();
        Self::injected_failure(&mut store)?;

        store.content_types.get(id).cloned().ok_or_else(|| not_found(id))
    }

    fn create_content_type(&self, model: &RemoteContentModel) -> RemoteResult<RemoteContentModel> {
        let mut store = self.store();
        Self::injected_failure(&mut store)?;

        let id = match model.id().filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => {
                store.next_id += 1;
                format!("ct-{}", store.next_id)
            }
        };

        if store.content_types.contains_key(&id) {
            return Err(RemoteError::Validation(ErrorResponse::new(format!(
                "Content type {id} already exists"
            ))));
        }

        let mut stored = model.clone();
        stored.sys = Some(Sys::new(id.as_str(), 1));
        store.content_types.insert(id.clone(), stored.clone());
        store.writes.push(WriteOp::CreateContentType { id });

        Ok(stored)
    }

    fn update_content_type(
        &self,
        id: &str,
        version: u64,
        model: &RemoteContentModel,
    ) -> RemoteResult<RemoteContentModel> {
        let mut store = self.store();
        Self::injected_failure(&mut store)?;

        let current = store
            .content_types
            .get(id)
            .ok_or_else(|| not_found(id))?
            .version();
        check_version(id, version, current)?;

        let mut stored = model.clone();
        stored.sys = Some(Sys::new(id, current + 1));
        store.content_types.insert(id.to_string(), stored.clone());
        store.writes.push(WriteOp::UpdateContentType {
            id: id.to_string(),
            version,
        });

        Ok(stored)
    }

    fn delete_content_type(&self, id: &str, version: u64) -> RemoteResult<()> {
        let mut store = self.store();
        Self::injected_failure(&mut store)?;

        let current = store
            .content_types
            .get(id)
            .ok_or_else(|| not_found(id))?
            .version();
        check_version(id, version, current)?;

        store.content_types.remove(id);
        store.editor_interfaces.remove(id);
        store.writes.push(WriteOp::DeleteContentType {
            id: id.to_string(),
            version,
        });

        Ok(())
    }

    fn get_editor_interface(&self, content_type_id: &str) -> RemoteResult<Option<EditorInterface>> {
        let mut store = self.store();
        Self::injected_failure(&mut store)?;

        if !store.content_types.contains_key(content_type_id) {
            return Err(not_found(content_type_id));
        }

        Ok(store.editor_interfaces.get(content_type_id).cloned())
    }

    fn update_editor_interface(
        &self,
        content_type_id: &str,
        version: u64,
        editor_interface: &EditorInterface,
    ) -> RemoteResult<EditorInterface> {
        let mut store = self.store();
        Self::injected_failure(&mut store)?;

        if !store.content_types.contains_key(content_type_id) {
            return Err(not_found(content_type_id));
        }

        let current = store
            .editor_interfaces
            .get(content_type_id)
            .map_or(0, EditorInterface::version);
        check_version(content_type_id, version, current)?;
        check_sidebar(editor_interface)?;

        let mut stored = editor_interface.clone();
        stored.sys = Some(Sys::new("default", current + 1));
        store
            .editor_interfaces
            .insert(content_type_id.to_string(), stored.clone());
        store.writes.push(WriteOp::UpdateEditorInterface {
            id: content_type_id.to_string(),
            version,
        });

        Ok(stored)
    }
}
