//! Configuration for content-model-sync.
//!
//! This crate loads the two inputs a reconciliation needs besides the remote
//! side itself:
//!
//! - [`ClientConfig`] - how to reach the remote management API, resolved
//!   from the manifest's `[client]` table with environment fallbacks
//! - [`Manifest`] - the declared content types (`[[content_type]]`), each
//!   validated on load

pub mod client;
pub mod env;
pub mod error;
pub mod manifest;

pub use client::{ClientConfig, ClientSection};
pub use env::{EnvSource, MapEnv, ProcessEnv};
pub use error::{Error, Result};
pub use manifest::{Manifest, load_manifest, parse_manifest};
