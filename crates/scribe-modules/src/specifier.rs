//! The closed vocabulary of loadable editor capability modules

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ModuleError;

/// What kind of capability a module provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleCategory {
    /// The underlying editing library itself
    Library,
    /// A language mode (syntax highlighting, indentation rules)
    Mode,
    /// A visual theme
    Theme,
    /// An editor extension (autocomplete tooling, search box)
    Extension,
}

impl ModuleCategory {
    /// Namespace prefix used in specifier strings
    pub fn prefix(&self) -> &'static str {
        match self {
            ModuleCategory::Library => "",
            ModuleCategory::Mode => "mode/",
            ModuleCategory::Theme => "theme/",
            ModuleCategory::Extension => "ext/",
        }
    }
}

/// Identifier of one loadable capability module.
///
/// The set is closed: a variant spec can only name modules that exist, and
/// string input is validated once by [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModuleSpecifier {
    Core,
    ModeSql,
    ModeMarkdown,
    ModeCss,
    ModeJson,
    ModeYaml,
    ModeHtml,
    ModeJavascript,
    ModeText,
    ThemeGithub,
    ThemeTextmate,
    ThemeMonokai,
    ExtLanguageTools,
    ExtSearchbox,
}

impl ModuleSpecifier {
    /// Every known specifier
    pub const ALL: [ModuleSpecifier; 14] = [
        ModuleSpecifier::Core,
        ModuleSpecifier::ModeSql,
        ModuleSpecifier::ModeMarkdown,
        ModuleSpecifier::ModeCss,
        ModuleSpecifier::ModeJson,
        ModuleSpecifier::ModeYaml,
        ModuleSpecifier::ModeHtml,
        ModuleSpecifier::ModeJavascript,
        ModuleSpecifier::ModeText,
        ModuleSpecifier::ThemeGithub,
        ModuleSpecifier::ThemeTextmate,
        ModuleSpecifier::ThemeMonokai,
        ModuleSpecifier::ExtLanguageTools,
        ModuleSpecifier::ExtSearchbox,
    ];

    pub fn category(&self) -> ModuleCategory {
        match self {
            ModuleSpecifier::Core => ModuleCategory::Library,
            ModuleSpecifier::ModeSql
            | ModuleSpecifier::ModeMarkdown
            | ModuleSpecifier::ModeCss
            | ModuleSpecifier::ModeJson
            | ModuleSpecifier::ModeYaml
            | ModuleSpecifier::ModeHtml
            | ModuleSpecifier::ModeJavascript
            | ModuleSpecifier::ModeText => ModuleCategory::Mode,
            ModuleSpecifier::ThemeGithub
            | ModuleSpecifier::ThemeTextmate
            | ModuleSpecifier::ThemeMonokai => ModuleCategory::Theme,
            ModuleSpecifier::ExtLanguageTools | ModuleSpecifier::ExtSearchbox => {
                ModuleCategory::Extension
            }
        }
    }

    /// Short name without the category prefix (`sql`, `github`)
    pub fn name(&self) -> &'static str {
        match self {
            ModuleSpecifier::Core => "core",
            ModuleSpecifier::ModeSql => "sql",
            ModuleSpecifier::ModeMarkdown => "markdown",
            ModuleSpecifier::ModeCss => "css",
            ModuleSpecifier::ModeJson => "json",
            ModuleSpecifier::ModeYaml => "yaml",
            ModuleSpecifier::ModeHtml => "html",
            ModuleSpecifier::ModeJavascript => "javascript",
            ModuleSpecifier::ModeText => "text",
            ModuleSpecifier::ThemeGithub => "github",
            ModuleSpecifier::ThemeTextmate => "textmate",
            ModuleSpecifier::ThemeMonokai => "monokai",
            ModuleSpecifier::ExtLanguageTools => "language_tools",
            ModuleSpecifier::ExtSearchbox => "searchbox",
        }
    }

    /// Full specifier string (`mode/sql`)
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleSpecifier::Core => "core",
            ModuleSpecifier::ModeSql => "mode/sql",
            ModuleSpecifier::ModeMarkdown => "mode/markdown",
            ModuleSpecifier::ModeCss => "mode/css",
            ModuleSpecifier::ModeJson => "mode/json",
            ModuleSpecifier::ModeYaml => "mode/yaml",
            ModuleSpecifier::ModeHtml => "mode/html",
            ModuleSpecifier::ModeJavascript => "mode/javascript",
            ModuleSpecifier::ModeText => "mode/text",
            ModuleSpecifier::ThemeGithub => "theme/github",
            ModuleSpecifier::ThemeTextmate => "theme/textmate",
            ModuleSpecifier::ThemeMonokai => "theme/monokai",
            ModuleSpecifier::ExtLanguageTools => "ext/language_tools",
            ModuleSpecifier::ExtSearchbox => "ext/searchbox",
        }
    }

    /// Look up a specifier by category and short name
    pub fn find(category: ModuleCategory, name: &str) -> Option<ModuleSpecifier> {
        Self::ALL
            .iter()
            .copied()
            .find(|spec| spec.category() == category && spec.name() == name)
    }

    pub fn is_mode(&self) -> bool {
        self.category() == ModuleCategory::Mode
    }

    pub fn is_theme(&self) -> bool {
        self.category() == ModuleCategory::Theme
    }
}

impl fmt::Display for ModuleSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleSpecifier {
    type Err = ModuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|spec| spec.as_str() == s)
            .ok_or_else(|| ModuleError::UnknownSpecifier(s.to_string()))
    }
}

impl Serialize for ModuleSpecifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ModuleSpecifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
