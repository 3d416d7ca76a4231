//! Reconciliation engine for content-model-sync
//!
//! This crate keeps remote content types in line with their declarations,
//! implementing:
//!
//! - **Mapper**: draft declared content types into remote payloads and import
//!   remote state back into the declared form
//! - **Drift detection**: explicit per-entity comparison that tells moved
//!   fields and sidebar widgets apart from changed ones
//! - **Diagnostics**: translation of failures into ordered, severity-ranked
//!   messages
//! - **Reconciler**: check, plan, apply and destroy against a [`RemoteApi`]
//!
//! # Architecture
//!
//! ```text
//!            Reconciler (sync)
//!             /      |      \
//!        mapper    drift   diagnostics
//!             \      |      /
//!          cm-model      remote::RemoteApi
//! ```
//!
//! The mapper, the drift detector and the translator are pure. Only the
//! Reconciler talks to the remote side, one content type at a time.
//!
//! # Example
//!
//! ```ignore
//! use cm_reconcile::{Reconciler, Result};
//!
//! fn sync(remote: impl cm_reconcile::RemoteApi, model: &cm_model::ContentModel) -> Result<()> {
//!     let report = Reconciler::new(remote).apply(model)?;
//!     for action in report.actions {
//!         println!("{action}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod diagnostics;
pub mod drift;
pub mod error;
pub mod logging;
pub mod mapper;
pub mod remote;
pub mod sync;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use drift::{Difference, FieldAttribute};
pub use error::{Error, ErrorKind, Result};
pub use mapper::{
    draft_content_type, draft_editor_interface, draft_field, import_content_type, import_field,
};
pub use remote::{ErrorDetail, ErrorDetails, ErrorResponse, RemoteApi, RemoteError, RemoteResult};
pub use sync::{
    ApplyReport, CheckReport, CheckStatus, DriftItem, Fragment, Plan, PlannedAction,
    ReconcileOptions, Reconciler, RemoteState, SyncReport,
};
