use super::{ModuleRegistry, ModuleSource, normalize_module_path};
use crate::error::{Error, Result};
use std::collections::HashMap;

/// Module registry backed by a map of module path to source text
#[derive(Debug, Clone, Default)]
pub struct InMemoryModuleRegistry {
    modules: HashMap<String, String>,
}

impl InMemoryModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module(mut self, module_path: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(module_path, source);
        self
    }

    pub fn insert(&mut self, module_path: impl Into<String>, source: impl Into<String>) {
        self.modules.insert(module_path.into(), source.into());
    }
}

impl ModuleRegistry for InMemoryModuleRegistry {
    fn load(&self, module_path: &str) -> Result<ModuleSource> {
        let requested = normalize_module_path(module_path);
        let segments: Vec<&str> = requested.split("::").collect();

        // Longest registered prefix wins; the rest names inline modules
        for split in (1..=segments.len()).rev() {
            let prefix = segments[..split].join("::");
            if let Some(source) = self.modules.get(&prefix) {
                return Ok(ModuleSource {
                    module_path: requested.to_string(),
                    source: source.clone(),
                    origin: None,
                    inline_path: segments[split..].iter().map(|s| s.to_string()).collect(),
                });
            }
        }

        Err(Error::ModuleNotFound {
            module_path: requested.to_string(),
            reason: "no such module registered".to_string(),
        })
    }
}
