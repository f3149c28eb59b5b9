//! Lazily synthesized editor types
//!
//! [`EditorFactory::define`] turns a variant spec into a [`LazyEditor`]. The
//! first time anything needs to render it, the variant's modules are
//! resolved through the shared [`ModuleCache`] and an [`EditorType`] is
//! synthesized. That type is kept and reused by every later instance.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Utc};
use scribe_completion::ModeId;
use scribe_modules::{LoadedModuleSet, ModuleCache, ModuleCategory, ModuleError, ModuleSpecifier};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::error::Result;
use crate::instance::EditorInstance;
use crate::props::{EditorProps, EditorRef};
use crate::variant::EditorVariantSpec;

/// Defines editor variants over one shared module cache
#[derive(Debug, Clone)]
pub struct EditorFactory {
    cache: ModuleCache,
    config: EditorConfig,
}

impl EditorFactory {
    pub fn new(cache: ModuleCache) -> Self {
        Self {
            cache,
            config: EditorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn cache(&self) -> &ModuleCache {
        &self.cache
    }

    /// Define a variant; configuration overrides are applied and checked here
    pub fn define(&self, spec: EditorVariantSpec) -> Result<LazyEditor> {
        let spec = match self.config.overrides_for(&spec) {
            Some(overrides) => spec.with_overrides(&overrides)?,
            None => spec,
        };
        debug!(variant = spec.name(), modules = spec.modules().len(), "Defined editor variant");
        Ok(LazyEditor {
            inner: Arc::new(LazyInner {
                spec,
                cache: self.cache.clone(),
                synthesized: OnceLock::new(),
                synthesis_count: AtomicUsize::new(0),
            }),
        })
    }
}

struct LazyInner {
    spec: EditorVariantSpec,
    cache: ModuleCache,
    synthesized: OnceLock<Arc<EditorType>>,
    synthesis_count: AtomicUsize,
}

/// A deferred editor definition. Clones share the synthesized type.
#[derive(Clone)]
pub struct LazyEditor {
    inner: Arc<LazyInner>,
}

impl LazyEditor {
    pub fn spec(&self) -> &EditorVariantSpec {
        &self.inner.spec
    }

    /// The synthesized type, if modules already resolved
    pub fn loaded(&self) -> Option<Arc<EditorType>> {
        if let Some(ty) = self.inner.synthesized.get() {
            return Some(Arc::clone(ty));
        }
        // Another variant may already have pulled in everything we need
        let modules = self.inner.cache.peek(self.inner.spec.modules())?;
        Some(self.synthesize(modules))
    }

    /// Resolve the variant's modules and return the synthesized type.
    ///
    /// Concurrent callers share the module loads; a failure is returned to
    /// each of them and nothing is cached.
    pub async fn load(&self) -> std::result::Result<Arc<EditorType>, ModuleError> {
        if let Some(ty) = self.inner.synthesized.get() {
            return Ok(Arc::clone(ty));
        }
        let modules = self.inner.cache.resolve(self.inner.spec.modules()).await?;
        Ok(self.synthesize(modules))
    }

    /// How many times a type was synthesized; at most one
    pub fn synthesis_count(&self) -> usize {
        self.inner.synthesis_count.load(Ordering::Relaxed)
    }

    /// A new widget instance rendering this variant
    pub fn instance(&self, props: EditorProps) -> EditorInstance {
        EditorInstance::new(self.clone(), props)
    }

    fn synthesize(&self, modules: LoadedModuleSet) -> Arc<EditorType> {
        let ty = self.inner.synthesized.get_or_init(|| {
            self.inner.synthesis_count.fetch_add(1, Ordering::Relaxed);
            info!(variant = self.inner.spec.name(), "Synthesized editor type");
            Arc::new(EditorType::new(&self.inner.spec, modules))
        });
        Arc::clone(ty)
    }
}

impl std::fmt::Debug for LazyEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyEditor")
            .field("variant", &self.inner.spec.name())
            .field("synthesized", &self.inner.synthesized.get().is_some())
            .finish()
    }
}

/// The concrete editor type of a variant, available once its modules loaded
#[derive(Debug)]
pub struct EditorType {
    variant: String,
    modules: LoadedModuleSet,
    default_mode: String,
    default_theme: Option<String>,
    tab_size: u32,
    font_family: String,
    synthesized_at: DateTime<Utc>,
}

impl EditorType {
    fn new(spec: &EditorVariantSpec, modules: LoadedModuleSet) -> Self {
        Self {
            variant: spec.name().to_string(),
            modules,
            default_mode: spec.default_mode().to_string(),
            default_theme: spec.default_theme().map(str::to_string),
            tab_size: spec.tab_size(),
            font_family: spec.font_family().to_string(),
            synthesized_at: Utc::now(),
        }
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }

    pub fn modules(&self) -> &LoadedModuleSet {
        &self.modules
    }

    pub fn synthesized_at(&self) -> DateTime<Utc> {
        self.synthesized_at
    }

    /// Mode used for `props`, falling back to the variant default
    pub fn effective_mode(&self, props: &EditorProps) -> String {
        props
            .mode
            .clone()
            .unwrap_or_else(|| self.default_mode.clone())
    }

    /// Build the fully configured widget for `props`
    pub fn render(&self, props: &EditorProps) -> EditorWidget {
        let mode = self.effective_mode(props);
        if !self.supports_mode(&mode) {
            warn!(variant = %self.variant, %mode, "Mode module not loaded for this variant");
        }
        let theme = props.theme.clone().or_else(|| self.default_theme.clone());
        if let Some(theme) = theme.as_deref().filter(|theme| !self.supports_theme(theme)) {
            warn!(variant = %self.variant, theme, "Theme module not loaded for this variant");
        }

        EditorWidget {
            variant: self.variant.clone(),
            mode_id: ModeId::for_mode(&mode),
            mode,
            theme,
            tab_size: props.tab_size.unwrap_or(self.tab_size),
            font_family: props
                .font_family
                .clone()
                .unwrap_or_else(|| self.font_family.clone()),
            value: props.value.clone(),
            width: props.width.clone(),
            height: props.height.clone(),
            modules: self.modules.specifiers().collect(),
            completion_enabled: props.keywords.is_some(),
            handle: props.handle.clone(),
        }
    }

    pub fn supports_mode(&self, mode: &str) -> bool {
        self.has_module(ModuleCategory::Mode, mode)
    }

    pub fn supports_theme(&self, theme: &str) -> bool {
        self.has_module(ModuleCategory::Theme, theme)
    }

    fn has_module(&self, category: ModuleCategory, name: &str) -> bool {
        ModuleSpecifier::find(category, name).is_some_and(|spec| self.modules.contains(spec))
    }
}

/// A fully configured editor, ready to hand to the editing library
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorWidget {
    pub variant: String,
    pub mode: String,
    pub mode_id: ModeId,
    pub theme: Option<String>,
    pub tab_size: u32,
    pub font_family: String,
    pub value: String,
    pub width: String,
    pub height: String,
    pub modules: Vec<ModuleSpecifier>,
    /// Keyword completion is wired to the session once it is live
    pub completion_enabled: bool,
    /// The caller's control handle, forwarded unchanged
    #[serde(skip)]
    pub handle: Option<EditorRef>,
}
