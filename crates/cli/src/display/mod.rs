pub mod formatter;

pub use formatter::{format_report, print_report};
