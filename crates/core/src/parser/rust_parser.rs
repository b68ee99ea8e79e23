use crate::error::{Error, Result};
use tracing::debug;
use tree_sitter::{Parser, Tree};

/// Tree-sitter parser configured for Rust source
pub struct RustParser {
    parser: Parser,
}

impl RustParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_rust::LANGUAGE.into())
            .map_err(|e| Error::TreeSitterError(format!("Failed to set language: {e}")))?;
        Ok(Self { parser })
    }

    /// Parse a whole file. Syntax errors are tolerated; items around them still resolve.
    pub fn parse(&mut self, source: &str) -> Result<Tree> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| Error::ParseError("Failed to parse source code".to_string()))?;
        if tree.root_node().has_error() {
            debug!("Source contains syntax errors; continuing with a partial tree");
        }
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_parsing() {
        let mut parser = RustParser::new().unwrap();
        let source = r#"
pub struct User {
    pub name: String,
}
"#;
        let tree = parser.parse(source).unwrap();
        assert_eq!(tree.root_node().kind(), "source_file");
    }

    #[test]
    fn test_parse_empty_source() {
        let mut parser = RustParser::new().unwrap();
        let tree = parser.parse("").unwrap();
        assert_eq!(tree.root_node().named_child_count(), 0);
    }

    #[test]
    fn test_invalid_syntax_yields_partial_tree() {
        let mut parser = RustParser::new().unwrap();
        let source = "pub struct User { name: }";
        let tree = parser.parse(source).unwrap();
        assert!(tree.root_node().has_error());
    }
}
