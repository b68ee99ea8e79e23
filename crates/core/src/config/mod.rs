//! Configuration management for mapmap

mod settings;

// Re-export main types
pub use crate::resolve::DependencyMatch;
pub use settings::Config;
