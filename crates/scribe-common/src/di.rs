//! Service registration through link-time discovery.
//!
//! Every scribe crate that owns a process-scoped service submits a
//! [`ServiceFactory`] with `inventory::submit!`. Hosts call
//! [`collect_all_services`] once at start-up and keep the returned entries in
//! whatever container they use; nothing here holds global mutable state.
//!
//! ```rust,ignore
//! use scribe_common::di::{ServiceEntry, ServiceFactory};
//! use std::sync::Arc;
//!
//! inventory::submit! {
//!     ServiceFactory::new("modules", create_module_services)
//! }
//!
//! fn create_module_services() -> Vec<ServiceEntry> {
//!     vec![ServiceEntry::new::<ModuleCache>(Arc::new(ModuleCache::builtin()))]
//! }
//! ```

use std::any::{Any, TypeId};
use std::sync::Arc;
use tracing::{debug, info};

/// A type-erased service instance produced by a factory.
pub struct ServiceEntry {
    /// Registration key
    pub type_id: TypeId,

    /// Human-readable type name for diagnostics
    pub type_name: &'static str,

    /// The service itself
    pub instance: Arc<dyn Any + Send + Sync>,
}

impl ServiceEntry {
    /// Wrap a concrete service
    pub fn new<T: Send + Sync + 'static>(instance: Arc<T>) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            instance: instance as Arc<dyn Any + Send + Sync>,
        }
    }

    /// Recover the concrete service if this entry holds a `T`
    pub fn downcast<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        if self.type_id != TypeId::of::<T>() {
            return None;
        }
        self.instance.clone().downcast::<T>().ok()
    }
}

impl std::fmt::Debug for ServiceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceEntry")
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// A named group of services contributed by one crate.
pub struct ServiceFactory {
    /// Group name (e.g. "modules", "editor")
    pub name: &'static str,

    /// Creates the group's services
    pub factory_fn: fn() -> Vec<ServiceEntry>,

    /// Lower runs earlier
    pub priority: u32,
}

impl ServiceFactory {
    /// Create a factory with the default priority
    pub const fn new(name: &'static str, factory_fn: fn() -> Vec<ServiceEntry>) -> Self {
        Self {
            name,
            factory_fn,
            priority: 100,
        }
    }

    /// Create a factory with an explicit priority
    pub const fn with_priority(
        name: &'static str,
        factory_fn: fn() -> Vec<ServiceEntry>,
        priority: u32,
    ) -> Self {
        Self {
            name,
            factory_fn,
            priority,
        }
    }
}

inventory::collect!(ServiceFactory);

/// Run every discovered factory in priority order and collect their services.
pub fn collect_all_services() -> Vec<ServiceEntry> {
    let mut factories: Vec<&ServiceFactory> = inventory::iter::<ServiceFactory>().collect();
    factories.sort_by_key(|f| f.priority);

    info!("Discovered {} service factories", factories.len());

    let mut all_services = Vec::new();
    for factory in factories {
        let services = (factory.factory_fn)();
        debug!(
            factory = factory.name,
            priority = factory.priority,
            count = services.len(),
            "Created services"
        );
        all_services.extend(services);
    }
    all_services
}

/// Find the first collected service of type `T`.
pub fn find_service<T: Send + Sync + 'static>(services: &[ServiceEntry]) -> Option<Arc<T>> {
    services.iter().find_map(|entry| entry.downcast::<T>())
}

/// Names of all discovered factories.
pub fn list_discovered_factories() -> Vec<&'static str> {
    inventory::iter::<ServiceFactory>().map(|f| f.name).collect()
}
