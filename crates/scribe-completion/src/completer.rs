//! The keyword responder queried by an editing session

use std::sync::Arc;

use crate::keyword::{CompleterKeyword, ModeId};

/// Immutable keyword responder bound to one editing mode.
///
/// A new responder is built on every keyword or mode change; existing ones
/// are never mutated, so a session can only ever hold a complete snapshot.
#[derive(Debug, Clone)]
pub struct KeywordCompleter {
    mode: ModeId,
    keywords: Arc<[CompleterKeyword]>,
}

impl KeywordCompleter {
    pub fn new(mode: ModeId, keywords: impl Into<Arc<[CompleterKeyword]>>) -> Self {
        Self {
            mode,
            keywords: keywords.into(),
        }
    }

    /// Mode this responder answers for
    pub fn mode(&self) -> &ModeId {
        &self.mode
    }

    pub fn keywords(&self) -> &[CompleterKeyword] {
        &self.keywords
    }

    /// Candidates for `prefix` typed in a session currently in `session_mode`.
    ///
    /// Returns `None` when the prefix starts with an integer or the session
    /// is in another mode. Otherwise every keyword is returned; ranking
    /// against the prefix is left to the session.
    pub fn query(&self, session_mode: &str, prefix: &str) -> Option<Arc<[CompleterKeyword]>> {
        if parses_as_leading_integer(prefix) {
            return None;
        }
        if self.mode != *session_mode {
            return None;
        }
        Some(Arc::clone(&self.keywords))
    }
}

/// Whether a base-10 integer can be read from the start of `prefix`.
///
/// Leading whitespace and a single sign are skipped; trailing text is
/// ignored, so `"12abc"` counts while `"abc12"` does not.
pub fn parses_as_leading_integer(prefix: &str) -> bool {
    let trimmed = prefix.trim_start();
    let unsigned = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('+'))
        .unwrap_or(trimmed);
    unsigned.chars().next().is_some_and(|c| c.is_ascii_digit())
}
