//! mapmap - generate field-mapping implementations for conversion traits
//!
//! This crate provides functionality to:
//! - Discover traits marked with `// mapmap:assembler` in Rust source files
//! - Parse `// mapmap:source:<field>,target:<field>` override directives
//! - Resolve source and target struct layouts through a module registry
//! - Emit and persist an implementation that copies matching fields
pub mod codegen;
pub mod config;
pub mod directive;
pub mod error;
pub mod generator;
pub mod parser;
pub mod registry;
pub mod resolve;
pub mod types;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use codegen::GeneratedUnit;
pub use config::Config;
pub use generator::{GenerationReport, MappingGenerator, UnitFailure};
pub use parser::scan_interfaces;
pub use registry::{CrateModuleRegistry, InMemoryModuleRegistry, ModuleRegistry};
