//! Read-only lookup of module source text by module path
//!
//! Struct resolution never reaches for ambient state: callers hand it a registry.

pub mod crate_registry;
pub mod in_memory;

pub use crate_registry::CrateModuleRegistry;
pub use in_memory::InMemoryModuleRegistry;

use crate::error::Result;
use std::path::PathBuf;

/// Source text backing a module path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSource {
    /// The module path that was requested
    pub module_path: String,
    pub source: String,
    /// File the source was read from, if any
    pub origin: Option<PathBuf>,
    /// Inline `mod` blocks to descend into, outermost first
    pub inline_path: Vec<String>,
}

/// Trait for module lookups used by the struct resolver
pub trait ModuleRegistry {
    /// Load the source of `module_path`, failing with `Error::ModuleNotFound`
    fn load(&self, module_path: &str) -> Result<ModuleSource>;
}

impl<R: ModuleRegistry + ?Sized> ModuleRegistry for &R {
    fn load(&self, module_path: &str) -> Result<ModuleSource> {
        (**self).load(module_path)
    }
}

/// Strip a trailing `as alias` and whitespace from a `use` path
pub fn normalize_module_path(path: &str) -> &str {
    let path = path.trim();
    match path.split_once(" as ") {
        Some((path, _)) => path.trim(),
        None => path,
    }
}

/// The name a `use` path binds: its `as` alias, or its last segment
pub fn binding_name(path: &str) -> &str {
    let path = path.trim();
    if let Some((_, alias)) = path.split_once(" as ") {
        return alias.trim();
    }
    path.rsplit("::").next().unwrap_or(path).trim()
}
