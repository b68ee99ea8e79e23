use std::io;
use std::path::PathBuf;

/// Errors that can occur while resolving and emitting mappings
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Directive format error: comment `{comment}` does not start with `mapmap:`")]
    DirectiveFormat { comment: String },

    #[error("Invalid method shape for {interface}::{method}: {reason}")]
    InvalidMethodShape {
        interface: String,
        method: String,
        reason: String,
    },

    #[error("Module not found: {module_path} ({reason})")]
    ModuleNotFound { module_path: String, reason: String },

    #[error("Type `{type_name}` not found in module {module_path}")]
    TypeNotFound {
        module_path: String,
        type_name: String,
    },

    #[error("`{type_name}` in module {module_path} is a {kind}, not a struct with named fields")]
    NotARecordType {
        module_path: String,
        type_name: String,
        kind: String,
    },

    #[error("Ambiguous dependency for alias `{alias}`: {}", candidates.join(", "))]
    AmbiguousDependency {
        alias: String,
        candidates: Vec<String>,
    },

    #[error("Failed to write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{interface}::{method}: {source}")]
    Method {
        interface: String,
        method: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl Error {
    /// Attach the interface and method a failure belongs to
    pub fn in_method(self, interface: &str, method: &str) -> Self {
        Error::Method {
            interface: interface.to_string(),
            method: method.to_string(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for mapmap operations
pub type Result<T> = std::result::Result<T, Error>;
