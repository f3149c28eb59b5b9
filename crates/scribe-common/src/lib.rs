//! Shared plumbing for scribe crates: logging set-up and service discovery.

pub mod di;
pub mod logging;

pub use di::{
    collect_all_services, find_service, list_discovered_factories, ServiceEntry, ServiceFactory,
};
pub use logging::{init_logging, LogLevel, LogOptions, LoggingError};
