//! # Scribe Editor
//!
//! Editor variants (SQL, Markdown, JSON, ...) that assemble themselves on
//! first use. Defining a variant costs nothing; its modules are resolved
//! through the shared [`scribe_modules::ModuleCache`] the first time an
//! instance renders, while a placeholder or loading indicator is shown.
//!
//! ```rust,ignore
//! use scribe_editor::*;
//! use scribe_modules::ModuleCache;
//!
//! let factory = EditorFactory::new(ModuleCache::builtin());
//! let catalog = EditorCatalog::new(&factory)?;
//!
//! let instance = catalog
//!     .get(BuiltinVariant::SqlEditor)
//!     .instance(EditorProps::new().with_value("SELECT 1"));
//! instance.resolve().await?;
//! assert!(matches!(instance.render(), RenderNode::Editor(_)));
//! ```

pub mod config;
pub mod error;
pub mod factory;
pub mod instance;
pub mod props;
pub mod truncation;
pub mod variant;
pub mod variants;

pub use config::{ConfigFormat, ConfigLoader, EditorConfig, VariantOverrides};
pub use error::{EditorError, Result};
pub use factory::{EditorFactory, EditorType, EditorWidget, LazyEditor};
pub use instance::{EditorInstance, RenderNode, WidgetPhase, WidgetState};
pub use props::{EditorProps, EditorRef, PlaceholderProps, DEFAULT_DIMENSION};
pub use truncation::{
    is_truncated, ElementExtent, Measurable, TrackAxes, TruncationRef, TruncationTracker,
};
pub use variant::{
    EditorVariantSpec, PlaceholderRenderer, VariantBuilder, DEFAULT_FONT_FAMILY, DEFAULT_TAB_SIZE,
};
pub use variants::{BuiltinVariant, EditorCatalog};
