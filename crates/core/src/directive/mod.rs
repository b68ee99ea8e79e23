//! Field override directives embedded in method comments
//!
//! A directive comment looks like `// mapmap:source:name,target:age`. One comment may
//! carry several groups (`mapmap:source:a,target:b mapmap:source:c,target:d`).

pub mod parser;

pub use parser::{MARKER, collect_explicit, parse_directives};
