//! Module loading error types

use thiserror::Error;

use crate::specifier::ModuleSpecifier;

/// Module loader errors.
///
/// Cloneable because one failed load is observed by every requester that
/// attached to it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModuleError {
    #[error("Failed to load module {specifier}: {message}")]
    LoadFailed {
        specifier: ModuleSpecifier,
        message: String,
    },

    #[error("Load task for module {specifier} was aborted")]
    Aborted { specifier: ModuleSpecifier },

    /// Loads run as tokio tasks; resolving outside a runtime cannot start one
    #[error("No async runtime available to load module {specifier}")]
    NoRuntime { specifier: ModuleSpecifier },

    #[error("Unknown module specifier: {0}")]
    UnknownSpecifier(String),
}

impl ModuleError {
    /// Create a load failure for a specifier
    pub fn load_failed(specifier: ModuleSpecifier, message: impl Into<String>) -> Self {
        Self::LoadFailed {
            specifier,
            message: message.into(),
        }
    }

    /// Configuration problems are programming errors, not load failures
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::UnknownSpecifier(_))
    }
}

pub type Result<T> = std::result::Result<T, ModuleError>;
