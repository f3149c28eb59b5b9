//! Process-scoped, append-only module cache with request coalescing

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::error::{ModuleError, Result};
use crate::fetcher::{BuiltinFetcher, LoadedModule, LoadedModuleSet, ModuleFetcher};
use crate::metrics::{LoaderMetrics, LoaderStats};
use crate::specifier::ModuleSpecifier;

type SharedLoad = Shared<BoxFuture<'static, Result<Arc<LoadedModule>>>>;

enum Slot {
    Loading(SharedLoad),
    Ready(Arc<LoadedModule>),
}

struct Inner {
    fetcher: Arc<dyn ModuleFetcher>,
    slots: Mutex<HashMap<ModuleSpecifier, Slot>>,
    metrics: LoaderMetrics,
}

impl Inner {
    fn settle(&self, specifier: ModuleSpecifier, result: &Result<Arc<LoadedModule>>) {
        let mut slots = self.slots.lock();
        match result {
            Ok(module) => {
                slots.insert(specifier, Slot::Ready(Arc::clone(module)));
                info!(%specifier, "Module loaded");
            }
            Err(error) => {
                if matches!(slots.get(&specifier), Some(Slot::Loading(_))) {
                    slots.remove(&specifier);
                }
                self.metrics.record_failure();
                warn!(%specifier, %error, "Module load failed");
            }
        }
    }
}

/// Shared cache of loaded modules.
///
/// Starts empty and only ever grows. For any specifier at most one fetch is
/// in flight; every concurrent requester awaits that same fetch. Fetches run
/// as detached tokio tasks, so a requester going away never cancels a load
/// and a finished load always lands in the cache. A failed fetch leaves no
/// entry behind. Cloning the cache shares the same state.
#[derive(Clone)]
pub struct ModuleCache {
    inner: Arc<Inner>,
}

impl ModuleCache {
    /// Create an empty cache backed by `fetcher`
    pub fn new(fetcher: Arc<dyn ModuleFetcher>) -> Self {
        Self {
            inner: Arc::new(Inner {
                fetcher,
                slots: Mutex::new(HashMap::new()),
                metrics: LoaderMetrics::new(),
            }),
        }
    }

    /// Create an empty cache for the bundled modules
    pub fn builtin() -> Self {
        Self::new(Arc::new(BuiltinFetcher))
    }

    /// Resolve every requested module.
    ///
    /// All loads run in parallel and the call returns once each of them has
    /// settled. If any failed, the first failure in request order is
    /// returned. Modules that are not loaded yet need a tokio runtime to
    /// fetch; without one they fail with [`ModuleError::NoRuntime`].
    pub async fn resolve(&self, specifiers: &[ModuleSpecifier]) -> Result<LoadedModuleSet> {
        let mut requested: Vec<ModuleSpecifier> = Vec::with_capacity(specifiers.len());
        for specifier in specifiers {
            if !requested.contains(specifier) {
                requested.push(*specifier);
            }
        }

        let pending: Vec<SharedLoad> = requested.iter().map(|s| self.acquire(*s)).collect();
        let settled = future::join_all(pending).await;

        let mut set = LoadedModuleSet::new();
        for result in settled {
            set.insert(result?);
        }
        Ok(set)
    }

    /// Start loading modules without waiting for them
    pub fn prefetch(&self, specifiers: &[ModuleSpecifier]) {
        for specifier in specifiers {
            drop(self.acquire(*specifier));
        }
    }

    /// The resolved slice if every module is already loaded; never fetches
    pub fn peek(&self, specifiers: &[ModuleSpecifier]) -> Option<LoadedModuleSet> {
        let slots = self.inner.slots.lock();
        specifiers
            .iter()
            .map(|specifier| match slots.get(specifier) {
                Some(Slot::Ready(module)) => Some(Arc::clone(module)),
                _ => None,
            })
            .collect::<Option<LoadedModuleSet>>()
    }

    pub fn is_loaded(&self, specifier: ModuleSpecifier) -> bool {
        matches!(self.inner.slots.lock().get(&specifier), Some(Slot::Ready(_)))
    }

    pub fn is_loading(&self, specifier: ModuleSpecifier) -> bool {
        matches!(
            self.inner.slots.lock().get(&specifier),
            Some(Slot::Loading(_))
        )
    }

    pub fn loaded_specifiers(&self) -> Vec<ModuleSpecifier> {
        let mut loaded: Vec<ModuleSpecifier> = self
            .inner
            .slots
            .lock()
            .iter()
            .filter_map(|(specifier, slot)| match slot {
                Slot::Ready(_) => Some(*specifier),
                Slot::Loading(_) => None,
            })
            .collect();
        loaded.sort();
        loaded
    }

    /// Number of fetches ever started for `specifier`
    pub fn fetch_count(&self, specifier: ModuleSpecifier) -> u64 {
        self.inner.metrics.fetch_count(specifier)
    }

    pub fn stats(&self) -> LoaderStats {
        let loaded = self.loaded_specifiers().len();
        self.inner.metrics.snapshot(loaded)
    }

    fn acquire(&self, specifier: ModuleSpecifier) -> SharedLoad {
        let mut slots = self.inner.slots.lock();
        match slots.get(&specifier) {
            Some(Slot::Ready(module)) => {
                self.inner.metrics.record_hit();
                debug!(%specifier, "Module already loaded");
                future::ready(Ok(Arc::clone(module))).boxed().shared()
            }
            Some(Slot::Loading(load)) => {
                self.inner.metrics.record_coalesced();
                debug!(%specifier, "Joining in-flight module load");
                load.clone()
            }
            None => {
                let Ok(runtime) = Handle::try_current() else {
                    // Nothing is published, so a later call inside a runtime can fetch
                    self.inner.metrics.record_failure();
                    warn!(%specifier, "No async runtime, module not fetched");
                    return future::ready(Err(ModuleError::NoRuntime { specifier }))
                        .boxed()
                        .shared();
                };
                self.inner.metrics.record_fetch(specifier);
                info!(%specifier, "Fetching module");
                let load = self.spawn_load(&runtime, specifier);
                slots.insert(specifier, Slot::Loading(load.clone()));
                load
            }
        }
    }

    // The slot lock is held by the caller; the task settles only after
    // the caller has published the Loading slot and released it.
    fn spawn_load(&self, runtime: &Handle, specifier: ModuleSpecifier) -> SharedLoad {
        let task_inner = Arc::clone(&self.inner);
        let handle = runtime.spawn(async move {
            let result = task_inner.fetcher.fetch(specifier).await.map(Arc::new);
            task_inner.settle(specifier, &result);
            result
        });

        let inner = Arc::clone(&self.inner);
        async move {
            match handle.await {
                Ok(result) => result,
                Err(join_error) => {
                    let error = ModuleError::Aborted { specifier };
                    warn!(%specifier, %join_error, "Module load task did not complete");
                    inner.settle(specifier, &Err(error.clone()));
                    Err(error)
                }
            }
        }
        .boxed()
        .shared()
    }
}

impl std::fmt::Debug for ModuleCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleCache")
            .field("loaded", &self.loaded_specifiers())
            .finish()
    }
}
