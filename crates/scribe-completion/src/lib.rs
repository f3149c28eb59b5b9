//! # Scribe Completion
//!
//! Keyword autocomplete for editing sessions that share one completion
//! subsystem across several editor variants.
//!
//! A [`KeywordCompleter`] is a pure responder: `query(session_mode, prefix)`
//! yields the bound keyword list, or nothing when
//!
//! 1. the prefix begins with an integer (typing a numeric literal), or
//! 2. the session is not in the mode the responder was bound for.
//!
//! [`CompleterBinding`] owns the per-instance lifecycle: each keyword or mode
//! change builds a new responder and registers it with the
//! [`EditorSession`], last write wins.
//!
//! ```rust,ignore
//! use scribe_completion::*;
//! use std::sync::Arc;
//!
//! let session = Arc::new(InMemorySession::new(ModeId::for_mode("sql")));
//! let binding = CompleterBinding::attach(
//!     session.clone(),
//!     ModeId::for_mode("sql"),
//!     vec![CompleterKeyword::simple("SELECT", 100, "keyword")],
//! );
//! assert!(binding.candidates("SEL").is_some());
//! assert!(binding.candidates("123").is_none());
//! ```

pub mod binding;
pub mod completer;
pub mod config;
pub mod error;
pub mod keyword;
pub mod session;

pub use binding::CompleterBinding;
pub use completer::{parses_as_leading_integer, KeywordCompleter};
pub use config::{KeywordFormat, KeywordLoader};
pub use error::{CompletionError, CompletionResult};
pub use keyword::{CompleterKeyword, ModeId, MODE_NAMESPACE};
pub use session::{EditorSession, InMemorySession};
