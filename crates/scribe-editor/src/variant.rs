//! Editor variant definitions

use std::sync::Arc;

use scribe_modules::{ModuleCategory, ModuleSpecifier};

use crate::config::VariantOverrides;
use crate::error::{EditorError, Result};
use crate::props::PlaceholderProps;

pub const DEFAULT_TAB_SIZE: u32 = 2;

pub const DEFAULT_FONT_FAMILY: &str =
    "Menlo, Consolas, Courier New, Ubuntu Mono, source-code-pro, Lucida Console, monospace";

/// Renders stand-in content while a variant's modules load
pub type PlaceholderRenderer = Arc<dyn Fn(&PlaceholderProps) -> String + Send + Sync>;

/// A named, immutable editor flavor (SQL, Markdown, JSON, ...)
#[derive(Clone)]
pub struct EditorVariantSpec {
    name: String,
    modules: Vec<ModuleSpecifier>,
    default_mode: String,
    default_theme: Option<String>,
    tab_size: u32,
    font_family: String,
    placeholder: Option<PlaceholderRenderer>,
}

impl EditorVariantSpec {
    pub fn builder(name: impl Into<String>) -> VariantBuilder {
        VariantBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every module to resolve, the editing library first
    pub fn modules(&self) -> &[ModuleSpecifier] {
        &self.modules
    }

    pub fn default_mode(&self) -> &str {
        &self.default_mode
    }

    pub fn default_theme(&self) -> Option<&str> {
        self.default_theme.as_deref()
    }

    pub fn tab_size(&self) -> u32 {
        self.tab_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn placeholder(&self) -> Option<&PlaceholderRenderer> {
        self.placeholder.as_ref()
    }

    /// Whether the `category` module called `name` is required
    pub fn requires(&self, category: ModuleCategory, name: &str) -> bool {
        ModuleSpecifier::find(category, name).is_some_and(|spec| self.modules.contains(&spec))
    }

    /// A copy with configuration overrides applied and re-validated
    pub fn with_overrides(&self, overrides: &VariantOverrides) -> Result<Self> {
        let mut spec = self.clone();
        if let Some(tab_size) = overrides.tab_size {
            spec.tab_size = tab_size;
        }
        if let Some(font_family) = &overrides.font_family {
            spec.font_family = font_family.clone();
        }
        if let Some(theme) = &overrides.theme {
            spec.default_theme = Some(theme.clone());
        }
        spec.validate()?;
        Ok(spec)
    }

    fn validate(&self) -> Result<()> {
        if self.tab_size == 0 {
            return Err(EditorError::configuration(format!(
                "{}: tab size must be positive",
                self.name
            )));
        }
        if self.font_family.trim().is_empty() {
            return Err(EditorError::configuration(format!(
                "{}: font family must not be empty",
                self.name
            )));
        }
        require_module(&self.name, &self.modules, ModuleCategory::Mode, &self.default_mode)?;
        if let Some(theme) = &self.default_theme {
            require_module(&self.name, &self.modules, ModuleCategory::Theme, theme)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for EditorVariantSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorVariantSpec")
            .field("name", &self.name)
            .field("modules", &self.modules)
            .field("default_mode", &self.default_mode)
            .field("default_theme", &self.default_theme)
            .field("tab_size", &self.tab_size)
            .field("placeholder", &self.placeholder.is_some())
            .finish()
    }
}

fn require_module(
    variant: &str,
    modules: &[ModuleSpecifier],
    category: ModuleCategory,
    name: &str,
) -> Result<()> {
    match ModuleSpecifier::find(category, name) {
        Some(spec) if modules.contains(&spec) => Ok(()),
        Some(spec) => Err(EditorError::configuration(format!(
            "{variant}: default {name} needs module {spec}, which is not required"
        ))),
        None => Err(EditorError::configuration(format!(
            "{variant}: no {}{name} module exists",
            category.prefix()
        ))),
    }
}

/// Builds and validates an [`EditorVariantSpec`].
///
/// Every problem surfaces from [`VariantBuilder::build`], i.e. when the
/// variant is defined, never when it is rendered.
#[derive(Default)]
pub struct VariantBuilder {
    name: String,
    modules: Vec<ModuleSpecifier>,
    unknown: Vec<String>,
    default_mode: Option<String>,
    default_theme: Option<String>,
    tab_size: Option<u32>,
    font_family: Option<String>,
    placeholder: Option<PlaceholderRenderer>,
}

impl VariantBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn module(mut self, specifier: ModuleSpecifier) -> Self {
        self.modules.push(specifier);
        self
    }

    pub fn modules(mut self, specifiers: impl IntoIterator<Item = ModuleSpecifier>) -> Self {
        self.modules.extend(specifiers);
        self
    }

    /// Add a module by its string form (`mode/sql`)
    pub fn module_str(mut self, specifier: &str) -> Self {
        match specifier.parse() {
            Ok(parsed) => self.modules.push(parsed),
            Err(_) => self.unknown.push(specifier.to_string()),
        }
        self
    }

    pub fn default_mode(mut self, mode: impl Into<String>) -> Self {
        self.default_mode = Some(mode.into());
        self
    }

    pub fn default_theme(mut self, theme: impl Into<String>) -> Self {
        self.default_theme = Some(theme.into());
        self
    }

    pub fn tab_size(mut self, tab_size: u32) -> Self {
        self.tab_size = Some(tab_size);
        self
    }

    pub fn font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = Some(font_family.into());
        self
    }

    pub fn placeholder<F>(mut self, render: F) -> Self
    where
        F: Fn(&PlaceholderProps) -> String + Send + Sync + 'static,
    {
        self.placeholder = Some(Arc::new(render));
        self
    }

    pub fn build(self) -> Result<EditorVariantSpec> {
        if self.name.trim().is_empty() {
            return Err(EditorError::configuration("variant name must not be empty"));
        }
        if let Some(unknown) = self.unknown.first() {
            return Err(EditorError::configuration(format!(
                "{}: unknown module specifier {unknown}",
                self.name
            )));
        }

        let mut modules = vec![ModuleSpecifier::Core];
        for specifier in self.modules {
            if specifier == ModuleSpecifier::Core {
                continue;
            }
            if modules.contains(&specifier) {
                return Err(EditorError::configuration(format!(
                    "{}: module {specifier} listed twice",
                    self.name
                )));
            }
            modules.push(specifier);
        }

        let default_mode = match self.default_mode {
            Some(mode) => mode,
            None => infer_name(&modules, ModuleCategory::Mode).ok_or_else(|| {
                EditorError::configuration(format!("{}: no mode module required", self.name))
            })?,
        };
        let default_theme = self
            .default_theme
            .or_else(|| infer_name(&modules, ModuleCategory::Theme));

        let spec = EditorVariantSpec {
            name: self.name,
            modules,
            default_mode,
            default_theme,
            tab_size: self.tab_size.unwrap_or(DEFAULT_TAB_SIZE),
            font_family: self
                .font_family
                .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string()),
            placeholder: self.placeholder,
        };
        spec.validate()?;
        Ok(spec)
    }
}

/// Name of the first required module in `category`
fn infer_name(modules: &[ModuleSpecifier], category: ModuleCategory) -> Option<String> {
    modules
        .iter()
        .find(|spec| spec.category() == category)
        .map(|spec| spec.name().to_string())
}
