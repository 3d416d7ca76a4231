//! Desired-state manifests
//!
//! A manifest is a TOML file declaring the client settings and every
//! content type that should exist remotely:
//!
//! ```toml
//! [client]
//! space_id = "abc123"
//!
//! [[content_type]]
//! id = "author"
//! name = "Author"
//! display_field = "name"
//!
//! [[content_type.fields]]
//! id = "name"
//! name = "Name"
//! type = "Symbol"
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use cm_model::ContentModel;
use serde::{Deserialize, Serialize};

use crate::client::{ClientConfig, ClientSection};
use crate::env::EnvSource;
use crate::error::{Error, Result};

/// Manifests larger than this are refused before parsing.
pub const MAX_MANIFEST_SIZE: u64 = 4 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub client: ClientSection,
    #[serde(default, rename = "content_type")]
    pub content_types: Vec<ContentModel>,
}

impl Manifest {
    pub fn client_config(&self, env: &dyn EnvSource) -> Result<ClientConfig> {
        ClientConfig::resolve(&self.client, env)
    }

    pub fn content_type(&self, id: &str) -> Option<&ContentModel> {
        self.content_types.iter().find(|model| model.id() == Some(id))
    }

    /// Validate every declared content type and reject duplicate ids.
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();

        for model in &self.content_types {
            model.validate().map_err(|source| Error::InvalidContentType {
                content_type: model.label().to_string(),
                source,
            })?;

            if let Some(id) = model.id()
                && !ids.insert(id)
            {
                return Err(Error::DuplicateContentType { id: id.to_string() });
            }
        }

        Ok(())
    }
}

/// Parse and validate manifest text.
///
/// `path` is only used for error messages.
pub fn parse_manifest(content: &str, path: &Path) -> Result<Manifest> {
    let manifest: Manifest = toml::from_str(content).map_err(|e| Error::InvalidConfig {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    manifest.validate()?;

    tracing::debug!(
        path = %path.display(),
        content_types = manifest.content_types.len(),
        "Loaded manifest"
    );

    Ok(manifest)
}

/// Load a manifest from disk.
///
/// # Errors
///
/// Returns an error if the file is missing, larger than
/// [`MAX_MANIFEST_SIZE`], unreadable, not valid TOML, or declares an invalid
/// content type.
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    if !path.exists() {
        return Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let size = fs::metadata(path)
        .map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?
        .len();
    if size > MAX_MANIFEST_SIZE {
        return Err(Error::ConfigTooLarge {
            path: path.to_path_buf(),
            size,
            max: MAX_MANIFEST_SIZE,
        });
    }

    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_manifest(&content, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_manifest_is_valid() {
        let manifest = parse_manifest("", Path::new("empty.toml")).unwrap();
        assert!(manifest.content_types.is_empty());
        assert_eq!(manifest.client, ClientSection::default());
    }

    #[test]
    fn test_unknown_client_key_rejected() {
        let err = parse_manifest("[client]\ntoken = \"x\"\n", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }
}
