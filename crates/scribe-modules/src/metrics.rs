//! Loader counters

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::specifier::ModuleSpecifier;

/// Snapshot of loader activity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoaderStats {
    /// Underlying fetches started
    pub fetches: u64,
    /// Requests answered from an already loaded module
    pub hits: u64,
    /// Requests that joined a load already in flight
    pub coalesced: u64,
    /// Fetches that failed
    pub failures: u64,
    /// Modules currently loaded
    pub loaded: usize,
}

impl LoaderStats {
    /// Share of requests that did not start a fetch, as a percentage
    pub fn reuse_rate(&self) -> f64 {
        let total = self.fetches + self.hits + self.coalesced;
        if total == 0 {
            0.0
        } else {
            ((self.hits + self.coalesced) as f64 / total as f64) * 100.0
        }
    }
}

/// Thread-safe loader metrics
#[derive(Debug, Default)]
pub struct LoaderMetrics {
    fetches: AtomicU64,
    hits: AtomicU64,
    coalesced: AtomicU64,
    failures: AtomicU64,
    per_module: Mutex<HashMap<ModuleSpecifier, u64>>,
}

impl LoaderMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_fetch(&self, specifier: ModuleSpecifier) {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        *self.per_module.lock().entry(specifier).or_insert(0) += 1;
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_coalesced(&self) {
        self.coalesced.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// How many times `specifier` was actually fetched
    pub fn fetch_count(&self, specifier: ModuleSpecifier) -> u64 {
        self.per_module.lock().get(&specifier).copied().unwrap_or(0)
    }

    pub fn snapshot(&self, loaded: usize) -> LoaderStats {
        LoaderStats {
            fetches: self.fetches.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            coalesced: self.coalesced.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            loaded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_module_fetch_count() {
        let metrics = LoaderMetrics::new();
        metrics.record_fetch(ModuleSpecifier::ModeSql);
        metrics.record_fetch(ModuleSpecifier::ModeSql);
        metrics.record_fetch(ModuleSpecifier::ThemeGithub);

        assert_eq!(metrics.fetch_count(ModuleSpecifier::ModeSql), 2);
        assert_eq!(metrics.fetch_count(ModuleSpecifier::ThemeGithub), 1);
        assert_eq!(metrics.fetch_count(ModuleSpecifier::ModeCss), 0);
        assert_eq!(metrics.snapshot(0).fetches, 3);
    }

    #[test]
    fn test_reuse_rate() {
        let metrics = LoaderMetrics::new();
        assert_eq!(metrics.snapshot(0).reuse_rate(), 0.0);

        metrics.record_fetch(ModuleSpecifier::ModeSql);
        metrics.record_hit();
        metrics.record_coalesced();
        metrics.record_hit();
        assert_eq!(metrics.snapshot(1).reuse_rate(), 75.0);
    }
}
