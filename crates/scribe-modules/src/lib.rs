//! # Scribe Modules
//!
//! On-demand loading of editor capability modules (language modes, themes,
//! extensions and the editing library itself).
//!
//! - **Closed vocabulary**: [`ModuleSpecifier`] names every module that exists,
//!   so an unknown module cannot be requested by construction
//! - **Request coalescing**: concurrent requests for one module share a single
//!   in-flight fetch
//! - **Append-only cache**: a loaded module stays loaded for the life of the
//!   [`ModuleCache`]
//!
//! ```rust,ignore
//! use scribe_modules::{ModuleCache, ModuleSpecifier};
//!
//! let cache = ModuleCache::builtin();
//! let modules = cache
//!     .resolve(&[ModuleSpecifier::ModeSql, ModuleSpecifier::ThemeGithub])
//!     .await?;
//! assert!(modules.contains(ModuleSpecifier::ModeSql));
//! ```

pub mod cache;
pub mod di;
pub mod error;
pub mod fetcher;
pub mod metrics;
pub mod specifier;

pub use cache::ModuleCache;
pub use error::{ModuleError, Result};
pub use fetcher::{BuiltinFetcher, LoadedModule, LoadedModuleSet, ModuleFetcher};
pub use metrics::{LoaderMetrics, LoaderStats};
pub use specifier::{ModuleCategory, ModuleSpecifier};
