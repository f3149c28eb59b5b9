//! Per-instance association between a session and a keyword set

use std::sync::Arc;

use tracing::debug;

use crate::completer::KeywordCompleter;
use crate::keyword::{CompleterKeyword, ModeId};
use crate::session::EditorSession;

/// Keeps a session's registered responder in sync with the current keyword
/// list and mode.
///
/// Every change builds a fresh [`KeywordCompleter`] and re-registers it, so
/// the session never queries a responder holding an outdated list or mode.
pub struct CompleterBinding {
    session: Arc<dyn EditorSession>,
    mode: ModeId,
    keywords: Arc<[CompleterKeyword]>,
    completer: Arc<KeywordCompleter>,
}

impl CompleterBinding {
    /// Bind `keywords` for `mode` and register the responder with `session`
    pub fn attach(
        session: Arc<dyn EditorSession>,
        mode: ModeId,
        keywords: impl Into<Arc<[CompleterKeyword]>>,
    ) -> Self {
        let keywords = keywords.into();
        let completer = Arc::new(KeywordCompleter::new(mode.clone(), Arc::clone(&keywords)));
        session.set_completers(vec![Arc::clone(&completer)]);
        debug!(%mode, keywords = keywords.len(), "Attached completer");
        Self {
            session,
            mode,
            keywords,
            completer,
        }
    }

    /// Replace the keyword list; the previous list is discarded entirely
    pub fn update_keywords(&mut self, keywords: impl Into<Arc<[CompleterKeyword]>>) {
        self.keywords = keywords.into();
        self.reregister();
    }

    /// Rebind to another mode
    pub fn update_mode(&mut self, mode: ModeId) {
        self.mode = mode;
        self.reregister();
    }

    pub fn mode(&self) -> &ModeId {
        &self.mode
    }

    /// The responder currently registered with the session
    pub fn completer(&self) -> &Arc<KeywordCompleter> {
        &self.completer
    }

    /// Query the current responder against the session's live mode
    pub fn candidates(&self, prefix: &str) -> Option<Arc<[CompleterKeyword]>> {
        let session_mode = self.session.mode_id();
        self.completer.query(session_mode.as_str(), prefix)
    }

    /// Remove the responder from the session
    pub fn detach(self) {
        self.session.set_completers(Vec::new());
        debug!(mode = %self.mode, "Detached completer");
    }

    fn reregister(&mut self) {
        self.completer = Arc::new(KeywordCompleter::new(
            self.mode.clone(),
            Arc::clone(&self.keywords),
        ));
        self.session.set_completers(vec![Arc::clone(&self.completer)]);
        debug!(mode = %self.mode, keywords = self.keywords.len(), "Re-registered completer");
    }
}

impl std::fmt::Debug for CompleterBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompleterBinding")
            .field("mode", &self.mode)
            .field("keywords", &self.keywords.len())
            .finish()
    }
}
