//! Loading keyword lists from YAML and JSON files

use std::path::Path;

use serde::Deserialize;

use crate::error::{CompletionError, CompletionResult};
use crate::keyword::CompleterKeyword;

/// Keyword file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordFormat {
    Yaml,
    Json,
}

impl KeywordFormat {
    /// Pick a format from a file extension
    pub fn from_path(path: &Path) -> CompletionResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Ok(KeywordFormat::Yaml),
            Some("json") => Ok(KeywordFormat::Json),
            _ => Err(CompletionError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Either a bare list or `{ keywords: [...] }`
#[derive(Deserialize)]
#[serde(untagged)]
enum KeywordDocument {
    List(Vec<CompleterKeyword>),
    Wrapped { keywords: Vec<CompleterKeyword> },
}

/// Keyword list loader
pub struct KeywordLoader;

impl KeywordLoader {
    pub fn load_from_string(
        content: &str,
        format: KeywordFormat,
    ) -> CompletionResult<Vec<CompleterKeyword>> {
        let document: KeywordDocument = match format {
            KeywordFormat::Yaml => serde_yaml::from_str(content)?,
            KeywordFormat::Json => serde_json::from_str(content)?,
        };
        let keywords = match document {
            KeywordDocument::List(keywords) => keywords,
            KeywordDocument::Wrapped { keywords } => keywords,
        };
        Self::validate(&keywords)?;
        Ok(keywords)
    }

    pub fn load_from_path(path: &Path) -> CompletionResult<Vec<CompleterKeyword>> {
        let format = KeywordFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        let keywords = Self::load_from_string(&content, format)?;
        tracing::debug!(path = %path.display(), count = keywords.len(), "Loaded keywords");
        Ok(keywords)
    }

    fn validate(keywords: &[CompleterKeyword]) -> CompletionResult<()> {
        for (index, keyword) in keywords.iter().enumerate() {
            if keyword.name.trim().is_empty() {
                return Err(CompletionError::InvalidKeyword(format!(
                    "keyword #{index} has an empty name"
                )));
            }
        }
        Ok(())
    }
}
