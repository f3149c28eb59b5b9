/// Property-based tests for idempotent resolution and cache persistence
use async_trait::async_trait;
use proptest::prelude::*;
use scribe_modules::{LoadedModule, ModuleCache, ModuleFetcher, ModuleSpecifier, Result};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingFetcher {
    calls: Mutex<HashMap<ModuleSpecifier, usize>>,
}

#[async_trait]
impl ModuleFetcher for RecordingFetcher {
    async fn fetch(&self, specifier: ModuleSpecifier) -> Result<LoadedModule> {
        *self.calls.lock().unwrap().entry(specifier).or_insert(0) += 1;
        tokio::task::yield_now().await;
        Ok(LoadedModule::new(specifier))
    }
}

fn specifier_strategy() -> impl Strategy<Value = ModuleSpecifier> {
    prop::sample::select(ModuleSpecifier::ALL.to_vec())
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    /// Property: two concurrent resolves of overlapping sets fetch each module exactly once
    #[test]
    fn prop_concurrent_resolution_fetches_once(
        first in prop::collection::vec(specifier_strategy(), 1..8),
        second in prop::collection::vec(specifier_strategy(), 1..8),
    ) {
        let fetcher = Arc::new(RecordingFetcher::default());
        let cache = ModuleCache::new(fetcher.clone());

        let (a, b) = runtime().block_on(async {
            tokio::join!(cache.resolve(&first), cache.resolve(&second))
        });
        prop_assert!(a.is_ok());
        prop_assert!(b.is_ok());

        let requested: HashSet<ModuleSpecifier> =
            first.iter().chain(second.iter()).copied().collect();
        let calls = fetcher.calls.lock().unwrap();
        prop_assert_eq!(calls.len(), requested.len());
        for specifier in &requested {
            prop_assert_eq!(calls.get(specifier).copied(), Some(1));
        }
    }

    /// Property: once a set resolved, any later request including it fetches only the new modules
    #[test]
    fn prop_loaded_modules_never_refetched(
        first in prop::collection::vec(specifier_strategy(), 1..8),
        later in prop::collection::vec(specifier_strategy(), 1..8),
    ) {
        let fetcher = Arc::new(RecordingFetcher::default());
        let cache = ModuleCache::new(fetcher.clone());
        let rt = runtime();

        rt.block_on(cache.resolve(&first)).unwrap();
        let mut combined = first.clone();
        combined.extend(later.iter().copied());
        let resolved = rt.block_on(cache.resolve(&combined)).unwrap();

        for specifier in &combined {
            prop_assert!(resolved.contains(*specifier));
            prop_assert_eq!(cache.fetch_count(*specifier), 1);
        }
        prop_assert!(cache.peek(&first).is_some());
    }
}
