/// Integration tests for binding keyword sets to editing sessions
use scribe_completion::{
    CompleterBinding, CompleterKeyword, EditorSession, InMemorySession, KeywordLoader, ModeId,
};
use std::io::Write;
use std::sync::Arc;

fn sql_keywords() -> Vec<CompleterKeyword> {
    vec![
        CompleterKeyword::simple("SELECT", 100, "keyword").with_doc_text("Query rows"),
        CompleterKeyword::simple("FROM", 90, "keyword"),
    ]
}

#[test]
fn test_select_suggested_in_sql_mode() {
    let session = Arc::new(InMemorySession::new(ModeId::for_mode("sql")));
    let binding = CompleterBinding::attach(session.clone(), ModeId::for_mode("sql"), sql_keywords());

    let candidates = binding.candidates("SEL").expect("candidates in sql mode");
    assert!(candidates.iter().any(|k| k.name == "SELECT"));

    let popup = session.complete("SEL");
    assert_eq!(popup.len(), 1);
    assert_eq!(popup[0].doc_text.as_deref(), Some("Query rows"));
}

#[test]
fn test_numeric_prefix_yields_nothing() {
    let session = Arc::new(InMemorySession::new(ModeId::for_mode("sql")));
    let binding = CompleterBinding::attach(session.clone(), ModeId::for_mode("sql"), sql_keywords());

    assert!(binding.candidates("123").is_none());
    assert!(session.complete("123").is_empty());
}

#[test]
fn test_last_keyword_list_wins() {
    let session = Arc::new(InMemorySession::new(ModeId::for_mode("sql")));
    let mut binding =
        CompleterBinding::attach(session.clone(), ModeId::for_mode("sql"), sql_keywords());

    binding.update_keywords(vec![CompleterKeyword::simple("orders", 10, "table")]);

    let candidates = binding.candidates("").unwrap();
    let names: Vec<&str> = candidates.iter().map(|k| k.name.as_str()).collect();
    assert_eq!(names, vec!["orders"]);

    let registered = session.completers();
    assert_eq!(registered.len(), 1);
    assert!(Arc::ptr_eq(&registered[0], binding.completer()));
}

#[test]
fn test_mode_change_reregisters() {
    let session = Arc::new(InMemorySession::new(ModeId::for_mode("sql")));
    let mut binding =
        CompleterBinding::attach(session.clone(), ModeId::for_mode("sql"), sql_keywords());
    let before = Arc::clone(binding.completer());

    session.set_mode(ModeId::for_mode("markdown"));
    assert!(binding.candidates("SEL").is_none());

    binding.update_mode(ModeId::for_mode("markdown"));
    assert!(!Arc::ptr_eq(&before, binding.completer()));
    assert!(binding.candidates("SEL").is_some());
    assert_eq!(session.completers()[0].mode(), &ModeId::for_mode("markdown"));
}

#[test]
fn test_detach_clears_session() {
    let session = Arc::new(InMemorySession::new(ModeId::for_mode("sql")));
    let binding = CompleterBinding::attach(session.clone(), ModeId::for_mode("sql"), sql_keywords());
    binding.detach();

    assert!(session.completers().is_empty());
    assert!(session.complete("SEL").is_empty());
}

#[test]
fn test_keywords_from_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(
        file,
        "keywords:\n  - name: WHERE\n    value: WHERE\n    score: 80\n    meta: keyword"
    )
    .unwrap();

    let keywords = KeywordLoader::load_from_path(file.path()).unwrap();
    let session = Arc::new(InMemorySession::new(ModeId::for_mode("sql")));
    let binding = CompleterBinding::attach(session, ModeId::for_mode("sql"), keywords);
    assert_eq!(binding.candidates("WH").unwrap()[0].name, "WHERE");
}
