//! Field layout resolution and target/source correspondence

pub mod dependency_index;
pub mod mapping_engine;
pub mod struct_resolver;

pub use dependency_index::{Binding, DependencyIndex, DependencyMatch, IndexBuilder, build_index};
pub use mapping_engine::resolve_mapping;
pub use struct_resolver::StructResolver;
