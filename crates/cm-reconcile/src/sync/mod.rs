//! Reconciliation of declared content types with the remote API
//!
//! This module provides the `Reconciler` which drives the read, compare and
//! write cycle for each content type.

mod check;
mod engine;

pub use check::{CheckReport, CheckStatus, DriftItem, Fragment};
pub use engine::{
    ApplyReport, Plan, PlannedAction, ReconcileOptions, Reconciler, RemoteState, SyncReport,
};
