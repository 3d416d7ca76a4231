//! Remote API client configuration
//!
//! Each setting resolves from the manifest's `[client]` table first, then
//! from the environment, then from a built-in default where one exists.
//!
//! ```toml
//! [client]
//! space_id = "abc123"
//! environment = "staging"
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::env::{self, EnvSource};
use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.contentful.com";
pub const DEFAULT_ENVIRONMENT: &str = "master";
pub const DEFAULT_USER_AGENT: &str = "content-model-sync";

/// The `[client]` table as written in a manifest; every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
}

/// Fully resolved settings handed to the transport.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub access_token: String,
    pub organization_id: Option<String>,
    pub space_id: String,
    pub environment: String,
    pub base_url: String,
    pub user_agent: String,
    pub debug: bool,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl ClientConfig {
    /// Resolve a `[client]` table against the environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSetting`] when neither the table nor the
    /// environment provides the access token or the space id.
    pub fn resolve(section: &ClientSection, env: &dyn EnvSource) -> Result<Self> {
        let lookup = |file: &Option<String>, key: &str| {
            non_empty(file.clone()).or_else(|| non_empty(env.var(key)))
        };

        let access_token =
            lookup(&section.access_token, env::MANAGEMENT_TOKEN).ok_or(Error::MissingSetting {
                setting: "access_token",
                env_var: env::MANAGEMENT_TOKEN,
            })?;

        let space_id = lookup(&section.space_id, env::SPACE_ID).ok_or(Error::MissingSetting {
            setting: "space_id",
            env_var: env::SPACE_ID,
        })?;

        let debug = section.debug.unwrap_or(false) || non_empty(env.var(env::DEBUG_LOG)).is_some();

        let config = Self {
            access_token,
            organization_id: lookup(&section.organization_id, env::ORGANIZATION_ID),
            space_id,
            environment: lookup(&section.environment, env::ENVIRONMENT)
                .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            base_url: lookup(&section.base_url, env::BASE_URL)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            debug,
        };

        tracing::debug!(
            space = %config.space_id,
            environment = %config.environment,
            base_url = %config.base_url,
            "Resolved client configuration"
        );

        Ok(config)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("access_token", &"<redacted>")
            .field("organization_id", &self.organization_id)
            .field("space_id", &self.space_id)
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("debug", &self.debug)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnv;

    #[test]
    fn test_defaults_apply() {
        let section = ClientSection {
            access_token: Some("token".to_string()),
            space_id: Some("space".to_string()),
            ..ClientSection::default()
        };

        let config = ClientConfig::resolve(&section, &MapEnv::new()).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.environment, DEFAULT_ENVIRONMENT);
        assert_eq!(config.organization_id, None);
        assert!(!config.debug);
    }

    #[test]
    fn test_debug_output_redacts_token() {
        let section = ClientSection {
            access_token: Some("secret-token".to_string()),
            space_id: Some("space".to_string()),
            ..ClientSection::default()
        };

        let config = ClientConfig::resolve(&section, &MapEnv::new()).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("secret-token"));
        assert!(printed.contains("<redacted>"));
    }
}
