//! Keyword and mode identifier types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Namespace prefixed to a mode name to form a session mode id
pub const MODE_NAMESPACE: &str = "mode/";

/// One autocomplete suggestion supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleterKeyword {
    /// Text matched against what the user typed
    pub name: String,
    /// Text inserted on acceptance
    pub value: String,
    /// Higher sorts first
    #[serde(default)]
    pub score: i64,
    /// Category label shown next to the suggestion ("keyword", "table", ...)
    #[serde(default)]
    pub meta: String,
    /// Short plain-text documentation
    #[serde(
        default,
        rename = "docText",
        alias = "doc_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub doc_text: Option<String>,
    /// Long HTML documentation
    #[serde(
        default,
        rename = "docHTML",
        alias = "doc_html",
        skip_serializing_if = "Option::is_none"
    )]
    pub doc_html: Option<String>,
}

impl CompleterKeyword {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        score: i64,
        meta: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            score,
            meta: meta.into(),
            doc_text: None,
            doc_html: None,
        }
    }

    /// Keyword whose inserted value equals its name
    pub fn simple(name: impl Into<String>, score: i64, meta: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(name.clone(), name, score, meta)
    }

    pub fn with_doc_text(mut self, doc: impl Into<String>) -> Self {
        self.doc_text = Some(doc.into());
        self
    }

    pub fn with_doc_html(mut self, doc: impl Into<String>) -> Self {
        self.doc_html = Some(doc.into());
        self
    }
}

/// Mode identifier as reported by an editing session (`mode/sql`).
///
/// Bindings and sessions are matched by exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModeId(String);

impl ModeId {
    /// Session mode id for a bare mode name (`sql` becomes `mode/sql`)
    pub fn for_mode(mode: &str) -> Self {
        Self(format!("{MODE_NAMESPACE}{mode}"))
    }

    /// Wrap an id exactly as a session reported it
    pub fn from_raw(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Mode name without the namespace, if the id carries it
    pub fn mode_name(&self) -> Option<&str> {
        self.0.strip_prefix(MODE_NAMESPACE)
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for ModeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_id_namespacing() {
        let id = ModeId::for_mode("sql");
        assert_eq!(id.as_str(), "mode/sql");
        assert_eq!(id.mode_name(), Some("sql"));
        assert_eq!(ModeId::from_raw("sql").mode_name(), None);
        assert!(id == *"mode/sql");
    }

    #[test]
    fn test_keyword_accepts_camel_case_docs() {
        let json = r#"{"name":"SELECT","value":"SELECT","score":100,"meta":"keyword","docHTML":"<b>SELECT</b>"}"#;
        let keyword: CompleterKeyword = serde_json::from_str(json).unwrap();
        assert_eq!(keyword.doc_html.as_deref(), Some("<b>SELECT</b>"));
        assert!(keyword.doc_text.is_none());

        let out = serde_json::to_string(&keyword).unwrap();
        assert!(out.contains("docHTML"));
        assert!(!out.contains("docText"));
    }

    #[test]
    fn test_keyword_defaults() {
        let keyword: CompleterKeyword =
            serde_json::from_str(r#"{"name":"users","value":"users"}"#).unwrap();
        assert_eq!(keyword.score, 0);
        assert_eq!(keyword.meta, "");
    }
}
