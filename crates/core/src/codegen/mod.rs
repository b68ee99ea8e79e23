//! Rendering of generated implementations and writing them to disk

pub mod emitter;
pub mod persist;

pub use emitter::{MethodEmission, UnitEmission, emit_method, emit_unit};
pub use persist::persist;

use serde::Serialize;

/// One generated source file, ready to be persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedUnit {
    pub interface_name: String,
    pub impl_type_name: String,
    pub source: String,
}

impl GeneratedUnit {
    /// Lower-cased implementation type name with an `.rs` extension
    pub fn file_name(&self) -> String {
        file_name_for(&self.impl_type_name)
    }
}

pub fn file_name_for(impl_type_name: &str) -> String {
    format!("{}.rs", impl_type_name.to_lowercase())
}
