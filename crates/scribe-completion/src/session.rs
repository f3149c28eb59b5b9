//! The completion boundary of a live editing session

use std::sync::Arc;

use parking_lot::RwLock;

use crate::completer::KeywordCompleter;
use crate::keyword::{CompleterKeyword, ModeId};

/// What the completer engine needs from a live editing session.
pub trait EditorSession: Send + Sync {
    /// The session's current mode id, e.g. `mode/sql`
    fn mode_id(&self) -> ModeId;

    /// Switch the session to another mode
    fn set_mode(&self, mode: ModeId);

    /// Replace every responder the session queries
    fn set_completers(&self, completers: Vec<Arc<KeywordCompleter>>);
}

/// Session adapter that keeps its state in memory.
///
/// `complete` plays the part of the editing library's completion popup:
/// it asks every registered responder, then filters and orders the
/// candidates against the typed prefix.
#[derive(Debug)]
pub struct InMemorySession {
    mode: RwLock<ModeId>,
    completers: RwLock<Vec<Arc<KeywordCompleter>>>,
}

impl InMemorySession {
    pub fn new(mode: ModeId) -> Self {
        Self {
            mode: RwLock::new(mode),
            completers: RwLock::new(Vec::new()),
        }
    }

    pub fn completers(&self) -> Vec<Arc<KeywordCompleter>> {
        self.completers.read().clone()
    }

    pub fn complete(&self, prefix: &str) -> Vec<CompleterKeyword> {
        let mode = self.mode_id();
        let needle = prefix.to_lowercase();
        let mut matches: Vec<CompleterKeyword> = self
            .completers
            .read()
            .iter()
            .filter_map(|completer| completer.query(mode.as_str(), prefix))
            .flat_map(|candidates| candidates.iter().cloned().collect::<Vec<_>>())
            .filter(|keyword| keyword.name.to_lowercase().starts_with(&needle))
            .collect();
        matches.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
        matches
    }
}

impl EditorSession for InMemorySession {
    fn mode_id(&self) -> ModeId {
        self.mode.read().clone()
    }

    fn set_mode(&self, mode: ModeId) {
        *self.mode.write() = mode;
    }

    fn set_completers(&self, completers: Vec<Arc<KeywordCompleter>>) {
        *self.completers.write() = completers;
    }
}
