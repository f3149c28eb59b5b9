//! Loaded module descriptors and the fetch seam

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::specifier::{ModuleCategory, ModuleSpecifier};

/// A resolved capability module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedModule {
    pub specifier: ModuleSpecifier,
    pub category: ModuleCategory,
    /// When the fetch completed
    pub loaded_at: DateTime<Utc>,
}

impl LoadedModule {
    pub fn new(specifier: ModuleSpecifier) -> Self {
        Self {
            specifier,
            category: specifier.category(),
            loaded_at: Utc::now(),
        }
    }
}

/// Fetches a single module.
///
/// Implementations perform the actual (possibly slow) load. They are never
/// called twice concurrently for the same specifier by [`crate::ModuleCache`].
#[async_trait]
pub trait ModuleFetcher: Send + Sync {
    async fn fetch(&self, specifier: ModuleSpecifier) -> Result<LoadedModule>;
}

/// Fetcher for modules bundled with the application
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFetcher;

#[async_trait]
impl ModuleFetcher for BuiltinFetcher {
    async fn fetch(&self, specifier: ModuleSpecifier) -> Result<LoadedModule> {
        tokio::task::yield_now().await;
        Ok(LoadedModule::new(specifier))
    }
}

/// The resolved slice for one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedModuleSet {
    modules: BTreeMap<ModuleSpecifier, Arc<LoadedModule>>,
}

impl LoadedModuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, module: Arc<LoadedModule>) {
        self.modules.insert(module.specifier, module);
    }

    pub fn get(&self, specifier: ModuleSpecifier) -> Option<&Arc<LoadedModule>> {
        self.modules.get(&specifier)
    }

    pub fn contains(&self, specifier: ModuleSpecifier) -> bool {
        self.modules.contains_key(&specifier)
    }

    pub fn specifiers(&self) -> impl Iterator<Item = ModuleSpecifier> + '_ {
        self.modules.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl FromIterator<Arc<LoadedModule>> for LoadedModuleSet {
    fn from_iter<I: IntoIterator<Item = Arc<LoadedModule>>>(iter: I) -> Self {
        let mut set = Self::new();
        for module in iter {
            set.insert(module);
        }
        set
    }
}
