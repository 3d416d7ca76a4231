//! Shared test utilities for the content-model-sync workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`remote`]: [`InMemoryRemote`], a versioned store honouring the remote
//!   write contract
//! - [`fixtures`]: declared and wire-shaped content types
//! - [`manifest`]: [`TestManifest`] for writing manifests to a temp directory

pub mod fixtures;
pub mod manifest;
pub mod remote;

pub use manifest::TestManifest;
pub use remote::{InMemoryRemote, WriteOp};
