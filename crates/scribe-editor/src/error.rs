//! Editor factory error types

use scribe_modules::ModuleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    /// A malformed variant or configuration; raised when defining, never when rendering
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Module(#[from] ModuleError),

    #[error("Editor {0} is not ready")]
    NotReady(String),

    #[error("Editor instance was unmounted")]
    Unmounted,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl EditorError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;
