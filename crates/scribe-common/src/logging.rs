//! Logging initialisation shared by scribe binaries and tests.
//!
//! Library crates only emit `tracing` events. Whoever owns the process
//! installs a subscriber once through [`init_logging`].

use std::str::FromStr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Minimum log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive understood by `EnvFilter`
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(LoggingError::InvalidLevel(s.to_string())),
        }
    }
}

/// Logging errors
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("A global subscriber is already installed")]
    AlreadyInitialized,
}

/// Logging configuration options
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Minimum level when no filter is given
    pub level: LogLevel,
    /// Explicit `EnvFilter` directives; `RUST_LOG` wins over both when set
    pub filter: Option<String>,
    /// Emit span and target information
    pub verbose: bool,
}

impl LogOptions {
    /// Options for a given minimum level
    pub fn with_level(level: LogLevel) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    fn env_filter(&self) -> Result<EnvFilter, LoggingError> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        let directives = self
            .filter
            .clone()
            .unwrap_or_else(|| self.level.as_str().to_string());
        EnvFilter::try_new(&directives).map_err(|e| LoggingError::InvalidFilter(e.to_string()))
    }
}

/// Install the global fmt subscriber.
pub fn init_logging(options: &LogOptions) -> Result<(), LoggingError> {
    let filter = options.env_filter()?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(options.verbose)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!(matches!(
            "loud".parse::<LogLevel>(),
            Err(LoggingError::InvalidLevel(_))
        ));
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Error);
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn test_second_init_fails() {
        let options = LogOptions::with_level(LogLevel::Warn);
        let _ = init_logging(&options);
        assert!(matches!(
            init_logging(&options),
            Err(LoggingError::AlreadyInitialized)
        ));
    }
}
