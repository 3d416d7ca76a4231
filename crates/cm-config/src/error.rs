//! Error types for cm-config

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration at {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    #[error("Config file too large: {path} is {size} bytes (max {max})")]
    ConfigTooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("Missing setting {setting}: set it in [client] or via {env_var}")]
    MissingSetting {
        setting: &'static str,
        env_var: &'static str,
    },

    #[error("Invalid content type {content_type}: {source}")]
    InvalidContentType {
        content_type: String,
        #[source]
        source: cm_model::Error,
    },

    #[error("Duplicate content type id {id}")]
    DuplicateContentType { id: String },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
