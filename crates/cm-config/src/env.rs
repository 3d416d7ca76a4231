//! Environment lookups
//!
//! Configuration resolution reads the environment through [`EnvSource`] so
//! callers (and tests) can supply a fixed set of variables instead of the
//! process environment.

use std::collections::HashMap;

pub const MANAGEMENT_TOKEN: &str = "CONTENTFUL_MANAGEMENT_TOKEN";
pub const ORGANIZATION_ID: &str = "CONTENTFUL_ORGANIZATION_ID";
pub const BASE_URL: &str = "CONTENTFUL_BASE_URL";
pub const SPACE_ID: &str = "CONTENTFUL_SPACE_ID";
pub const ENVIRONMENT: &str = "CONTENTFUL_ENVIRONMENT";
/// Any non-empty value turns on debug logging.
pub const DEBUG_LOG: &str = "TF_LOG";

pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// A fixed set of variables.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl EnvSource for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}
