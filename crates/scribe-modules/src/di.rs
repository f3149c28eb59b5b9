//! Service registration for scribe-modules

use std::sync::Arc;

use scribe_common::di::{ServiceEntry, ServiceFactory};

use crate::ModuleCache;

inventory::submit! {
    ServiceFactory::with_priority("modules", create_module_services, 10)
}

fn create_module_services() -> Vec<ServiceEntry> {
    vec![ServiceEntry::new::<ModuleCache>(Arc::new(ModuleCache::builtin()))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_common::di::{collect_all_services, find_service, list_discovered_factories};

    #[test]
    fn test_modules_factory_registered() {
        assert!(list_discovered_factories().contains(&"modules"));
    }

    #[test]
    fn test_collected_cache_starts_empty() {
        let services = collect_all_services();
        let cache = find_service::<ModuleCache>(&services).expect("module cache service");
        assert!(cache.loaded_specifiers().is_empty());
    }
}
