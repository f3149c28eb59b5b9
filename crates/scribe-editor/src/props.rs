//! Widget host configuration and the caller-held control handle

use std::sync::Arc;

use parking_lot::RwLock;
use scribe_completion::{CompleterKeyword, EditorSession};
use serde::{Deserialize, Serialize};

/// Default widget width and height
pub const DEFAULT_DIMENSION: &str = "500px";

fn default_dimension() -> String {
    DEFAULT_DIMENSION.to_string()
}

/// Per-render configuration supplied by the caller.
///
/// Unset fields fall back to the config file, then to the variant defaults.
/// The required module set is not part of this: it is fixed per variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorProps {
    pub mode: Option<String>,
    pub theme: Option<String>,
    pub tab_size: Option<u32>,
    pub font_family: Option<String>,
    /// Initial content
    pub value: String,
    pub width: String,
    pub height: String,
    /// Keywords offered by autocomplete; `None` leaves completion untouched
    pub keywords: Option<Vec<CompleterKeyword>>,
    #[serde(skip)]
    pub handle: Option<EditorRef>,
}

impl Default for EditorProps {
    fn default() -> Self {
        Self {
            mode: None,
            theme: None,
            tab_size: None,
            font_family: None,
            value: String::new(),
            width: default_dimension(),
            height: default_dimension(),
            keywords: None,
            handle: None,
        }
    }
}

impl EditorProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn with_tab_size(mut self, tab_size: u32) -> Self {
        self.tab_size = Some(tab_size);
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_size(mut self, width: impl Into<String>, height: impl Into<String>) -> Self {
        self.width = width.into();
        self.height = height.into();
        self
    }

    pub fn with_keywords(mut self, keywords: Vec<CompleterKeyword>) -> Self {
        self.keywords = Some(keywords);
        self
    }

    pub fn with_handle(mut self, handle: EditorRef) -> Self {
        self.handle = Some(handle);
        self
    }

    /// Sizing handed to the placeholder
    pub fn placeholder_props(&self) -> PlaceholderProps {
        PlaceholderProps {
            width: self.width.clone(),
            height: self.height.clone(),
        }
    }
}

/// Layout constraints shared by the placeholder and the real widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderProps {
    pub width: String,
    pub height: String,
}

/// Caller-owned reference to the live editor.
///
/// Passed through the factory untouched; it is filled with the live session
/// once the real widget is mounted and cleared on unmount. Clones share the
/// same slot.
#[derive(Clone, Default)]
pub struct EditorRef {
    slot: Arc<RwLock<Option<Arc<dyn EditorSession>>>>,
}

impl EditorRef {
    pub fn new() -> Self {
        Self::default()
    }

    /// The live session, if the editor is mounted
    pub fn get(&self) -> Option<Arc<dyn EditorSession>> {
        self.slot.read().clone()
    }

    pub fn is_attached(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Whether both references share one slot
    pub fn same_ref(&self, other: &EditorRef) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }

    pub(crate) fn set(&self, session: Arc<dyn EditorSession>) {
        *self.slot.write() = Some(session);
    }

    pub(crate) fn clear(&self) {
        *self.slot.write() = None;
    }
}

impl PartialEq for EditorRef {
    fn eq(&self, other: &Self) -> bool {
        self.same_ref(other)
    }
}

impl std::fmt::Debug for EditorRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorRef")
            .field("attached", &self.is_attached())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_props_from_json_defaults() {
        let props: EditorProps =
            serde_json::from_str(r#"{"mode":"sql","tabSize":4,"value":"SELECT 1"}"#).unwrap();
        assert_eq!(props.mode.as_deref(), Some("sql"));
        assert_eq!(props.tab_size, Some(4));
        assert_eq!(props.width, DEFAULT_DIMENSION);
        assert!(props.keywords.is_none());
        assert!(props.handle.is_none());
    }

    #[test]
    fn test_placeholder_props_follow_size() {
        let props = EditorProps::new().with_size("100%", "300px");
        assert_eq!(
            props.placeholder_props(),
            PlaceholderProps {
                width: "100%".to_string(),
                height: "300px".to_string()
            }
        );
    }

    #[test]
    fn test_editor_ref_clones_share_slot() {
        let handle = EditorRef::new();
        let copy = handle.clone();
        assert!(handle.same_ref(&copy));
        assert!(!handle.same_ref(&EditorRef::new()));
        assert!(!copy.is_attached());
    }
}
