//! Rust source parsing using tree-sitter

pub mod interface_scanner;
pub mod item_scanner;
pub mod rust_parser;
pub mod utils;

// Re-export commonly used items
pub use interface_scanner::{ASSEMBLER_MARKER, scan_interfaces};
pub use item_scanner::{ItemKind, TopLevelItem, find_items};
pub use rust_parser::RustParser;
pub use utils::{node_text, preceding_comments};
