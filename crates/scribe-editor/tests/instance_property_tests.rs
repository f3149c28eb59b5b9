/// Property-based tests for completer wiring across prop updates
use proptest::prelude::*;
use scribe_completion::{CompleterKeyword, EditorSession, InMemorySession, ModeId};
use scribe_editor::{BuiltinVariant, EditorCatalog, EditorFactory, EditorProps};
use scribe_modules::ModuleCache;
use std::sync::Arc;

fn mode_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["markdown", "sql", "json", "html", "javascript"])
        .prop_map(str::to_string)
}

fn props_strategy() -> impl Strategy<Value = EditorProps> {
    (
        mode_strategy(),
        prop::option::of(prop::collection::vec("[a-z]{1,8}", 0..5)),
    )
        .prop_map(|(mode, names)| {
            let props = EditorProps::new().with_mode(mode);
            match names {
                Some(names) => props.with_keywords(
                    names
                        .into_iter()
                        .map(|name| CompleterKeyword::simple(name, 1, "word"))
                        .collect(),
                ),
                None => props,
            }
        })
}

proptest! {
    /// Property: after any update sequence the session holds at most one
    /// responder, bound to the session's mode and the latest keyword list
    #[test]
    fn prop_registered_completer_tracks_latest_props(
        initial in props_strategy(),
        updates in prop::collection::vec(props_strategy(), 1..8),
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let catalog = EditorCatalog::new(&EditorFactory::new(ModuleCache::builtin())).unwrap();
        let instance = catalog.get(BuiltinVariant::TextAreaEditor).instance(initial);
        runtime.block_on(instance.resolve()).unwrap();

        let session = Arc::new(InMemorySession::new(ModeId::for_mode("text")));
        instance.attach_session(session.clone()).unwrap();

        let mut last = None;
        for props in updates {
            last = Some(props.clone());
            instance.update(props);
        }
        let last = last.unwrap();

        let expected_mode = ModeId::for_mode(last.mode.as_deref().unwrap());
        prop_assert_eq!(session.mode_id(), expected_mode.clone());

        let completers = session.completers();
        match &last.keywords {
            Some(keywords) => {
                prop_assert_eq!(completers.len(), 1);
                prop_assert_eq!(completers[0].mode(), &expected_mode);
                prop_assert_eq!(completers[0].keywords(), keywords.as_slice());
            }
            None => prop_assert!(completers.is_empty()),
        }
    }
}
