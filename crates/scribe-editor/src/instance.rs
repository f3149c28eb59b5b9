//! Per-widget resolution state machine
//!
//! ```text
//! Unresolved ──mount/resolve──▶ Resolving ──▶ Ready   (terminal)
//!                                        └──▶ Failed  (terminal)
//! ```
//!
//! There is no way back to `Unresolved`; retrying means creating a new
//! instance. The host re-renders whenever [`EditorInstance::subscribe`]
//! reports a transition.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use scribe_completion::{CompleterBinding, CompleterKeyword, EditorSession, ModeId};
use scribe_modules::ModuleError;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::{EditorError, Result};
use crate::factory::{EditorType, EditorWidget, LazyEditor};
use crate::props::EditorProps;

/// Observable phase of an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetPhase {
    Unresolved,
    Resolving,
    Ready,
    Failed,
}

#[derive(Debug, Clone)]
pub enum WidgetState {
    Unresolved,
    Resolving,
    Ready(Arc<EditorType>),
    Failed(ModuleError),
}

impl WidgetState {
    pub fn phase(&self) -> WidgetPhase {
        match self {
            WidgetState::Unresolved => WidgetPhase::Unresolved,
            WidgetState::Resolving => WidgetPhase::Resolving,
            WidgetState::Ready(_) => WidgetPhase::Ready,
            WidgetState::Failed(_) => WidgetPhase::Failed,
        }
    }
}

/// What the host should draw for an instance right now
#[derive(Debug, Clone, PartialEq)]
pub enum RenderNode {
    /// Output of the variant's placeholder renderer
    Placeholder(String),
    /// Generic loading indicator, for variants without a placeholder
    Loading,
    Editor(EditorWidget),
    /// Error indicator; the modules could not be loaded
    Failed(ModuleError),
}

struct LiveSession {
    session: Arc<dyn EditorSession>,
    binding: Option<CompleterBinding>,
}

struct Shared {
    state: Mutex<WidgetState>,
    props: Mutex<EditorProps>,
    live: Mutex<Option<LiveSession>>,
    unmounted: AtomicBool,
    phase_tx: watch::Sender<WidgetPhase>,
}

/// One rendered occurrence of an editor variant. Clones share state.
#[derive(Clone)]
pub struct EditorInstance {
    editor: LazyEditor,
    shared: Arc<Shared>,
}

impl EditorInstance {
    pub(crate) fn new(editor: LazyEditor, props: EditorProps) -> Self {
        let (phase_tx, _) = watch::channel(WidgetPhase::Unresolved);
        Self {
            editor,
            shared: Arc::new(Shared {
                state: Mutex::new(WidgetState::Unresolved),
                props: Mutex::new(props),
                live: Mutex::new(None),
                unmounted: AtomicBool::new(false),
                phase_tx,
            }),
        }
    }

    pub fn variant(&self) -> &str {
        self.editor.spec().name()
    }

    pub fn state(&self) -> WidgetState {
        self.shared.state.lock().clone()
    }

    pub fn phase(&self) -> WidgetPhase {
        self.shared.state.lock().phase()
    }

    /// Receiver that changes on every state transition
    pub fn subscribe(&self) -> watch::Receiver<WidgetPhase> {
        self.shared.phase_tx.subscribe()
    }

    pub fn props(&self) -> EditorProps {
        self.shared.props.lock().clone()
    }

    pub fn is_unmounted(&self) -> bool {
        self.shared.unmounted.load(Ordering::SeqCst)
    }

    /// Start resolution without blocking the caller.
    ///
    /// If the variant's type is already available the instance becomes
    /// Ready before this returns and no task is spawned. Returns the
    /// background task otherwise. Without a tokio runtime the instance stays
    /// Unresolved.
    pub fn mount(&self) -> Option<JoinHandle<()>> {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(variant = self.variant(), "No async runtime, editor stays unresolved");
            return None;
        };
        if !self.begin_resolving() {
            return None;
        }
        if let Some(ty) = self.editor.loaded() {
            self.finish(Ok(ty));
            return None;
        }

        let this = self.clone();
        Some(runtime.spawn(async move {
            let result = this.editor.load().await;
            this.finish(result);
        }))
    }

    /// Drive resolution inline and wait for a terminal state
    pub async fn resolve(&self) -> Result<Arc<EditorType>> {
        if self.begin_resolving() {
            let result = match self.editor.loaded() {
                Some(ty) => Ok(ty),
                None => self.editor.load().await,
            };
            self.finish(result);
        }
        self.wait_settled().await
    }

    /// The node to draw for the current state
    pub fn render(&self) -> RenderNode {
        if self.phase() == WidgetPhase::Unresolved && !self.is_unmounted() {
            // First render is what triggers loading
            let _ = self.mount();
        }

        let props = self.props();
        match self.state() {
            WidgetState::Unresolved | WidgetState::Resolving => {
                match self.editor.spec().placeholder() {
                    Some(placeholder) => RenderNode::Placeholder(placeholder(&props.placeholder_props())),
                    None => RenderNode::Loading,
                }
            }
            WidgetState::Ready(ty) => RenderNode::Editor(ty.render(&props)),
            WidgetState::Failed(error) => RenderNode::Failed(error),
        }
    }

    /// Wire the live editing session of the mounted widget.
    ///
    /// The session is forwarded into the caller's [`crate::EditorRef`], set
    /// to the effective mode, and given a completer when keywords exist.
    pub fn attach_session(&self, session: Arc<dyn EditorSession>) -> Result<()> {
        if self.is_unmounted() {
            return Err(EditorError::Unmounted);
        }
        let WidgetState::Ready(ty) = self.state() else {
            return Err(EditorError::NotReady(self.variant().to_string()));
        };

        if let Some(previous) = self.shared.live.lock().take() {
            if let Some(binding) = previous.binding {
                binding.detach();
            }
        }

        let props = self.props();
        let mode = ModeId::for_mode(&ty.effective_mode(&props));
        session.set_mode(mode.clone());
        if let Some(handle) = &props.handle {
            handle.set(Arc::clone(&session));
        }
        let binding = props
            .keywords
            .map(|keywords| CompleterBinding::attach(Arc::clone(&session), mode, keywords));

        *self.shared.live.lock() = Some(LiveSession { session, binding });
        Ok(())
    }

    /// Replace the props; re-attaches the completer when keywords or mode changed
    pub fn update(&self, props: EditorProps) {
        let previous = std::mem::replace(&mut *self.shared.props.lock(), props.clone());
        let WidgetState::Ready(ty) = self.state() else {
            return;
        };

        let mut live = self.shared.live.lock();
        let Some(live) = live.as_mut() else {
            return;
        };

        let old_mode = ty.effective_mode(&previous);
        let new_mode = ty.effective_mode(&props);
        let mode_changed = old_mode != new_mode;
        let mode_id = ModeId::for_mode(&new_mode);
        if mode_changed {
            live.session.set_mode(mode_id.clone());
        }

        match (&previous.handle, &props.handle) {
            (Some(old), Some(new)) if old.same_ref(new) => {}
            (old, new) => {
                if let Some(old) = old {
                    old.clear();
                }
                if let Some(new) = new {
                    new.set(Arc::clone(&live.session));
                }
            }
        }

        let keywords_changed = previous.keywords != props.keywords;
        if !keywords_changed && !mode_changed {
            return;
        }
        live.binding = match (live.binding.take(), props.keywords) {
            (Some(mut binding), Some(keywords)) => {
                if keywords_changed {
                    binding.update_keywords(keywords);
                }
                if mode_changed {
                    binding.update_mode(mode_id);
                }
                Some(binding)
            }
            (None, Some(keywords)) => Some(CompleterBinding::attach(
                Arc::clone(&live.session),
                mode_id,
                keywords,
            )),
            (Some(binding), None) => {
                binding.detach();
                None
            }
            (None, None) => None,
        };
        debug!(variant = self.variant(), %new_mode, "Completer refreshed");
    }

    /// Ask the attached completer for candidates through the live session
    pub fn candidates(&self, prefix: &str) -> Option<Arc<[CompleterKeyword]>> {
        let live = self.shared.live.lock();
        live.as_ref()?.binding.as_ref()?.candidates(prefix)
    }

    /// Tear down: detach completion, clear the caller's handle, and discard
    /// any resolution that finishes later
    pub fn unmount(&self) {
        {
            // Serialized with `finish` so no transition lands after this point
            let _state = self.shared.state.lock();
            if self.shared.unmounted.swap(true, Ordering::SeqCst) {
                return;
            }
        }
        if let Some(live) = self.shared.live.lock().take() {
            if let Some(binding) = live.binding {
                binding.detach();
            }
        }
        let handle = self.shared.props.lock().handle.clone();
        if let Some(handle) = handle {
            handle.clear();
        }
        // Wake anyone waiting in `resolve`
        let phase = self.phase();
        self.shared.phase_tx.send_replace(phase);
        debug!(variant = self.variant(), "Editor unmounted");
    }

    fn begin_resolving(&self) -> bool {
        {
            let mut state = self.shared.state.lock();
            if self.is_unmounted() || !matches!(*state, WidgetState::Unresolved) {
                return false;
            }
            *state = WidgetState::Resolving;
        }
        self.shared.phase_tx.send_replace(WidgetPhase::Resolving);
        true
    }

    fn finish(&self, result: std::result::Result<Arc<EditorType>, ModuleError>) {
        let phase = {
            let mut state = self.shared.state.lock();
            if self.is_unmounted() {
                warn!(variant = self.variant(), "Discarding resolution for unmounted editor");
                return;
            }
            let next = match result {
                Ok(ty) => WidgetState::Ready(ty),
                Err(error) => {
                    warn!(variant = self.variant(), %error, "Editor failed to load");
                    WidgetState::Failed(error)
                }
            };
            let phase = next.phase();
            *state = next;
            phase
        };
        self.shared.phase_tx.send_replace(phase);
    }

    async fn wait_settled(&self) -> Result<Arc<EditorType>> {
        let mut rx = self.shared.phase_tx.subscribe();
        loop {
            if self.is_unmounted() {
                return Err(EditorError::Unmounted);
            }
            let settled = match self.state() {
                WidgetState::Ready(ty) => Some(Ok(ty)),
                WidgetState::Failed(error) => Some(Err(EditorError::Module(error))),
                WidgetState::Unresolved | WidgetState::Resolving => None,
            };
            if let Some(result) = settled {
                return result;
            }
            if rx.changed().await.is_err() {
                return Err(EditorError::Unmounted);
            }
        }
    }
}

impl std::fmt::Debug for EditorInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorInstance")
            .field("variant", &self.variant())
            .field("phase", &self.phase())
            .field("unmounted", &self.is_unmounted())
            .finish()
    }
}
