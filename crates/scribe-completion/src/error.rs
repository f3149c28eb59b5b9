//! Completion error types

use thiserror::Error;

/// Errors raised while building keyword sets.
///
/// Queries never fail: a mode or prefix mismatch is an empty result.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Invalid keyword: {0}")]
    InvalidKeyword(String),

    #[error("Unsupported keyword file: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type CompletionResult<T> = Result<T, CompletionError>;
