//! Editor configuration files
//!
//! Global defaults and per-variant overrides. Precedence, highest first:
//! render props, the variant's entry, the global entry, the variant's own
//! defaults.

use std::collections::HashMap;
use std::path::Path;

use scribe_modules::{ModuleCategory, ModuleSpecifier};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EditorError, Result};
use crate::variant::EditorVariantSpec;

/// Overridable variant defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantOverrides {
    pub tab_size: Option<u32>,
    pub font_family: Option<String>,
    pub theme: Option<String>,
}

impl VariantOverrides {
    /// Fields set in `other` replace ours
    fn merged_with(&self, other: &VariantOverrides) -> VariantOverrides {
        VariantOverrides {
            tab_size: other.tab_size.or(self.tab_size),
            font_family: other.font_family.clone().or_else(|| self.font_family.clone()),
            theme: other.theme.clone().or_else(|| self.theme.clone()),
        }
    }

    fn is_empty(&self) -> bool {
        self == &VariantOverrides::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Applied to every variant
    #[serde(flatten)]
    pub global: VariantOverrides,
    /// Keyed by variant name
    pub variants: HashMap<String, VariantOverrides>,
}

impl EditorConfig {
    /// Effective overrides for one variant, `None` when nothing applies.
    ///
    /// The global theme only reaches variants that load that theme; a theme
    /// in the variant's own entry always applies and is validated on define.
    pub fn overrides_for(&self, variant: &EditorVariantSpec) -> Option<VariantOverrides> {
        let mut global = self.global.clone();
        if let Some(theme) = global.theme.as_deref() {
            if !variant.requires(ModuleCategory::Theme, theme) {
                debug!(variant = variant.name(), theme, "Global theme not loaded by variant, skipped");
                global.theme = None;
            }
        }
        let merged = match self.variants.get(variant.name()) {
            Some(specific) => global.merged_with(specific),
            None => global,
        };
        (!merged.is_empty()).then_some(merged)
    }
}

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("json") => Ok(ConfigFormat::Json),
            Some("toml") => Ok(ConfigFormat::Toml),
            _ => Err(EditorError::configuration(format!(
                "unsupported config file: {}",
                path.display()
            ))),
        }
    }
}

/// Editor configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load_from_string(content: &str, format: ConfigFormat) -> Result<EditorConfig> {
        let config: EditorConfig = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        };
        Self::validate_config(&config)?;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<EditorConfig> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        let config = Self::load_from_string(&content, format)?;
        debug!(path = %path.display(), variants = config.variants.len(), "Loaded editor config");
        Ok(config)
    }

    fn validate_config(config: &EditorConfig) -> Result<()> {
        let entries = std::iter::once(("global", &config.global))
            .chain(config.variants.iter().map(|(name, o)| (name.as_str(), o)));
        for (scope, overrides) in entries {
            if overrides.tab_size == Some(0) {
                return Err(EditorError::configuration(format!(
                    "{scope}: tab_size must be positive"
                )));
            }
            if overrides
                .font_family
                .as_deref()
                .is_some_and(|font| font.trim().is_empty())
            {
                return Err(EditorError::configuration(format!(
                    "{scope}: font_family must not be empty"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(name: &str, modules: &[ModuleSpecifier]) -> EditorVariantSpec {
        EditorVariantSpec::builder(name)
            .modules(modules.iter().copied())
            .build()
            .unwrap()
    }

    fn sql() -> EditorVariantSpec {
        variant("SqlEditor", &[ModuleSpecifier::ModeSql, ModuleSpecifier::ThemeGithub])
    }

    fn markdown() -> EditorVariantSpec {
        variant(
            "MarkdownEditor",
            &[ModuleSpecifier::ModeMarkdown, ModuleSpecifier::ThemeTextmate],
        )
    }

    #[test]
    fn test_yaml_with_variant_section() {
        let yaml = r#"
tab_size: 4
variants:
  SqlEditor:
    font_family: Fira Code
"#;
        let config = ConfigLoader::load_from_string(yaml, ConfigFormat::Yaml).unwrap();
        let sql = config.overrides_for(&sql()).unwrap();
        assert_eq!(sql.tab_size, Some(4));
        assert_eq!(sql.font_family.as_deref(), Some("Fira Code"));

        let other = config.overrides_for(&markdown()).unwrap();
        assert_eq!(other.font_family, None);
    }

    #[test]
    fn test_variant_entry_beats_global() {
        let toml = r#"
tab_size = 4

[variants.MarkdownEditor]
tab_size = 8
"#;
        let config = ConfigLoader::load_from_string(toml, ConfigFormat::Toml).unwrap();
        assert_eq!(config.overrides_for(&markdown()).unwrap().tab_size, Some(8));
    }

    #[test]
    fn test_global_theme_only_reaches_variants_loading_it() {
        let config = ConfigLoader::load_from_string("theme: github\n", ConfigFormat::Yaml).unwrap();

        assert_eq!(
            config.overrides_for(&sql()).unwrap().theme.as_deref(),
            Some("github")
        );
        assert!(config.overrides_for(&markdown()).is_none());
    }

    #[test]
    fn test_variant_theme_kept_even_when_not_loaded() {
        let json = r#"{"variants":{"MarkdownEditor":{"theme":"github"}}}"#;
        let config = ConfigLoader::load_from_string(json, ConfigFormat::Json).unwrap();
        let overrides = config.overrides_for(&markdown()).unwrap();
        assert_eq!(overrides.theme.as_deref(), Some("github"));
        assert!(markdown().with_overrides(&overrides).is_err());
    }

    #[test]
    fn test_empty_config_has_no_overrides() {
        let config = ConfigLoader::load_from_string("{}", ConfigFormat::Json).unwrap();
        assert!(config.overrides_for(&sql()).is_none());
    }

    #[test]
    fn test_zero_tab_size_rejected() {
        let json = r#"{"variants":{"CssEditor":{"tab_size":0}}}"#;
        assert!(matches!(
            ConfigLoader::load_from_string(json, ConfigFormat::Json),
            Err(EditorError::Configuration(_))
        ));
    }

    #[test]
    fn test_load_from_path_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.yml");
        std::fs::write(&path, "font_family: Iosevka\n").unwrap();

        let config = ConfigLoader::load_from_path(&path).unwrap();
        assert_eq!(config.global.font_family.as_deref(), Some("Iosevka"));

        let unsupported = dir.path().join("editor.ini");
        std::fs::write(&unsupported, "font_family = Iosevka").unwrap();
        assert!(matches!(
            ConfigLoader::load_from_path(&unsupported),
            Err(EditorError::Configuration(_))
        ));
    }
}
