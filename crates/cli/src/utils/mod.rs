pub mod file;

pub use file::collect_rust_files;
