//! Built-in editor variants

use std::collections::HashMap;

use scribe_modules::ModuleSpecifier;

use crate::error::{EditorError, Result};
use crate::factory::{EditorFactory, LazyEditor};
use crate::props::PlaceholderProps;
use crate::variant::EditorVariantSpec;

/// Variants every host gets out of the box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinVariant {
    SqlEditor,
    /// SQL editor that shows a sized text block while loading
    FullSqlEditor,
    MarkdownEditor,
    /// Plain text area that can switch between several languages
    TextAreaEditor,
    CssEditor,
    JsonEditor,
    ConfigEditor,
}

impl BuiltinVariant {
    pub const ALL: [BuiltinVariant; 7] = [
        BuiltinVariant::SqlEditor,
        BuiltinVariant::FullSqlEditor,
        BuiltinVariant::MarkdownEditor,
        BuiltinVariant::TextAreaEditor,
        BuiltinVariant::CssEditor,
        BuiltinVariant::JsonEditor,
        BuiltinVariant::ConfigEditor,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BuiltinVariant::SqlEditor => "SqlEditor",
            BuiltinVariant::FullSqlEditor => "FullSqlEditor",
            BuiltinVariant::MarkdownEditor => "MarkdownEditor",
            BuiltinVariant::TextAreaEditor => "TextAreaEditor",
            BuiltinVariant::CssEditor => "CssEditor",
            BuiltinVariant::JsonEditor => "JsonEditor",
            BuiltinVariant::ConfigEditor => "ConfigEditor",
        }
    }

    pub fn modules(&self) -> &'static [ModuleSpecifier] {
        use ModuleSpecifier::*;
        match self {
            BuiltinVariant::SqlEditor | BuiltinVariant::FullSqlEditor => {
                &[ModeSql, ThemeGithub, ExtLanguageTools, ExtSearchbox]
            }
            BuiltinVariant::MarkdownEditor => &[ModeMarkdown, ThemeTextmate],
            BuiltinVariant::TextAreaEditor => &[
                ModeMarkdown,
                ModeSql,
                ModeJson,
                ModeHtml,
                ModeJavascript,
                ThemeTextmate,
            ],
            BuiltinVariant::CssEditor => &[ModeCss, ThemeGithub],
            BuiltinVariant::JsonEditor => &[ModeJson, ThemeGithub],
            BuiltinVariant::ConfigEditor => &[ModeYaml, ThemeGithub],
        }
    }

    pub fn spec(&self) -> Result<EditorVariantSpec> {
        let builder = EditorVariantSpec::builder(self.name()).modules(self.modules().iter().copied());
        match self {
            BuiltinVariant::FullSqlEditor => builder.placeholder(sized_text_block).build(),
            _ => builder.build(),
        }
    }
}

impl std::fmt::Display for BuiltinVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for BuiltinVariant {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self> {
        BuiltinVariant::ALL
            .into_iter()
            .find(|variant| variant.name() == s)
            .ok_or_else(|| EditorError::configuration(format!("unknown editor variant: {s}")))
    }
}

fn sized_text_block(props: &PlaceholderProps) -> String {
    format!(
        "<textarea style=\"width: {}; height: {}\" readonly></textarea>",
        props.width, props.height
    )
}

/// Every built-in variant defined over one factory
#[derive(Debug, Clone)]
pub struct EditorCatalog {
    editors: HashMap<BuiltinVariant, LazyEditor>,
}

impl EditorCatalog {
    pub fn new(factory: &EditorFactory) -> Result<Self> {
        let editors = BuiltinVariant::ALL
            .into_iter()
            .map(|variant| -> Result<(BuiltinVariant, LazyEditor)> {
                Ok((variant, factory.define(variant.spec()?)?))
            })
            .collect::<Result<HashMap<_, _>>>()?;
        Ok(Self { editors })
    }

    pub fn get(&self, variant: BuiltinVariant) -> &LazyEditor {
        // Populated for every variant in `new`
        &self.editors[&variant]
    }

    pub fn iter(&self) -> impl Iterator<Item = (BuiltinVariant, &LazyEditor)> {
        BuiltinVariant::ALL
            .into_iter()
            .filter_map(|variant| self.editors.get(&variant).map(|editor| (variant, editor)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_modules::ModuleCache;

    #[test]
    fn test_builtin_specs_are_valid() {
        for variant in BuiltinVariant::ALL {
            let spec = variant.spec().unwrap();
            assert_eq!(spec.name(), variant.name());
            assert_eq!(spec.modules()[0], ModuleSpecifier::Core);
        }
    }

    #[test]
    fn test_default_modes() {
        assert_eq!(BuiltinVariant::SqlEditor.spec().unwrap().default_mode(), "sql");
        assert_eq!(BuiltinVariant::TextAreaEditor.spec().unwrap().default_mode(), "markdown");
        assert_eq!(BuiltinVariant::ConfigEditor.spec().unwrap().default_mode(), "yaml");
        assert_eq!(
            BuiltinVariant::MarkdownEditor.spec().unwrap().default_theme(),
            Some("textmate")
        );
    }

    #[test]
    fn test_only_full_sql_has_placeholder() {
        for variant in BuiltinVariant::ALL {
            let spec = variant.spec().unwrap();
            assert_eq!(
                spec.placeholder().is_some(),
                variant == BuiltinVariant::FullSqlEditor
            );
        }
        let spec = BuiltinVariant::FullSqlEditor.spec().unwrap();
        let html = (spec.placeholder().unwrap())(&PlaceholderProps {
            width: "100%".to_string(),
            height: "300px".to_string(),
        });
        assert!(html.contains("width: 100%"));
        assert!(html.contains("height: 300px"));
    }

    #[test]
    fn test_parse_variant_name() {
        assert_eq!("JsonEditor".parse::<BuiltinVariant>().unwrap(), BuiltinVariant::JsonEditor);
        assert!("XmlEditor".parse::<BuiltinVariant>().is_err());
    }

    #[test]
    fn test_catalog_defines_every_variant() {
        let catalog = EditorCatalog::new(&EditorFactory::new(ModuleCache::builtin())).unwrap();
        assert_eq!(catalog.iter().count(), BuiltinVariant::ALL.len());
        assert_eq!(catalog.get(BuiltinVariant::CssEditor).spec().name(), "CssEditor");
    }

    #[test]
    fn test_global_theme_applies_where_loaded() {
        let config = crate::ConfigLoader::load_from_string(
            "theme = \"github\"\n",
            crate::ConfigFormat::Toml,
        )
        .unwrap();
        let factory = EditorFactory::new(ModuleCache::builtin()).with_config(config);
        let catalog = EditorCatalog::new(&factory).unwrap();

        let css = catalog.get(BuiltinVariant::CssEditor).spec();
        assert_eq!(css.default_theme(), Some("github"));
        let markdown = catalog.get(BuiltinVariant::MarkdownEditor).spec();
        assert_eq!(markdown.default_theme(), Some("textmate"));
    }
}
