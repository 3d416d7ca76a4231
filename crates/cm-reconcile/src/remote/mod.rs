//! The remote management API seam
//!
//! The reconciler never talks to the network itself. It drives an
//! implementation of [`RemoteApi`] supplied by the caller, one call at a
//! time, and classifies its failures with [`RemoteError`].

mod error;

pub use error::{ErrorDetail, ErrorDetails, ErrorResponse, RemoteError, RemoteResult};

use std::sync::Arc;

use cm_model::{EditorInterface, RemoteContentModel};

/// Reads and writes against the remote system.
///
/// Every write takes the version last observed by a read. Implementations
/// must answer a stale version with [`RemoteError::Conflict`] and leave the
/// stored object untouched.
pub trait RemoteApi: Send + Sync {
    fn get_content_type(&self, id: &str) -> RemoteResult<RemoteContentModel>;

    /// Create a content type. When `model.sys` carries an id the remote side
    /// uses it, otherwise it assigns one. Returns the stored object.
    fn create_content_type(&self, model: &RemoteContentModel) -> RemoteResult<RemoteContentModel>;

    fn update_content_type(
        &self,
        id: &str,
        version: u64,
        model: &RemoteContentModel,
    ) -> RemoteResult<RemoteContentModel>;

    fn delete_content_type(&self, id: &str, version: u64) -> RemoteResult<()>;

    /// The editor interface of a content type, `None` if it was never written.
    fn get_editor_interface(&self, content_type_id: &str) -> RemoteResult<Option<EditorInterface>>;

    /// Write the editor interface. `version` is zero when none exists yet.
    fn update_editor_interface(
        &self,
        content_type_id: &str,
        version: u64,
        editor_interface: &EditorInterface,
    ) -> RemoteResult<EditorInterface>;
}

impl<T: RemoteApi + ?Sized> RemoteApi for Arc<T> {
    fn get_content_type(&self, id: &str) -> RemoteResult<RemoteContentModel> {
        (**self).get_content_type(id)
    }

    fn create_content_type(&self, model: &RemoteContentModel) -> RemoteResult<RemoteContentModel> {
        (**self).create_content_type(model)
    }

    fn update_content_type(
        &self,
        id: &str,
        version: u64,
        model: &RemoteContentModel,
    ) -> RemoteResult<RemoteContentModel> {
        (**self).update_content_type(id, version, model)
    }

    fn delete_content_type(&self, id: &str, version: u64) -> RemoteResult<()> {
        (**self).delete_content_type(id, version)
    }

    fn get_editor_interface(&self, content_type_id: &str) -> RemoteResult<Option<EditorInterface>> {
        (**self).get_editor_interface(content_type_id)
    }

    fn update_editor_interface(
        &self,
        content_type_id: &str,
        version: u64,
        editor_interface: &EditorInterface,
    ) -> RemoteResult<EditorInterface> {
        (**self).update_editor_interface(content_type_id, version, editor_interface)
    }
}
