use crate::error::{Error, Result};
use tree_sitter::Node;

/// Source text covered by a node
pub fn node_text<'s>(node: &Node, source: &'s str) -> Result<&'s str> {
    node.utf8_text(source.as_bytes())
        .map_err(|e| Error::ParseError(format!("Invalid UTF-8 in {}: {e}", node.kind())))
}

/// Text of the `name` field of an item
pub fn item_name<'s>(node: &Node, source: &'s str) -> Option<&'s str> {
    let name = node.child_by_field_name("name")?;
    node_text(&name, source).ok()
}

/// Whether an item is visible crate-wide: `pub`, `pub(crate)` or `pub(in crate)`.
///
/// `pub(self)`, `pub(super)` and other `pub(in ..)` paths are not.
pub fn is_exported(node: &Node, source: &str) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|child| child.kind() == "visibility_modifier")
        .filter_map(|child| node_text(&child, source).ok())
        .any(|text| {
            let text: String = text.split_whitespace().collect();
            matches!(text.as_str(), "pub" | "pub(crate)" | "pub(incrate)")
        })
}

/// Comments directly above `node`, top to bottom.
///
/// Attributes between the comments and the item are skipped; anything else stops the
/// scan, as does a blank line or a comment trailing the previous item on its line.
pub fn preceding_comments(node: &Node, source: &str) -> Vec<String> {
    let mut comments = Vec::new();
    let mut below_row = node.start_position().row;
    let mut current_sibling = node.prev_sibling();

    while let Some(sibling) = current_sibling {
        let is_comment = matches!(sibling.kind(), "line_comment" | "block_comment");
        if !is_comment && sibling.kind() != "attribute_item" {
            break;
        }
        if last_row(&sibling) + 1 < below_row {
            break;
        }
        if is_comment && trails_previous_item(&sibling) {
            break;
        }

        if is_comment {
            if let Ok(text) = node_text(&sibling, source) {
                comments.push(text.trim().to_string());
            }
        }
        below_row = sibling.start_position().row;
        current_sibling = sibling.prev_sibling();
    }

    comments.reverse();
    comments
}

/// Last row holding text of `node`; line comments may end at column 0 of the next row
fn last_row(node: &Node) -> usize {
    let start = node.start_position();
    let end = node.end_position();
    if end.column == 0 && end.row > start.row {
        end.row - 1
    } else {
        end.row
    }
}

/// `fn a(); // note` belongs to `a`, not to whatever follows
fn trails_previous_item(comment: &Node) -> bool {
    comment.prev_sibling().is_some_and(|prev| {
        !matches!(prev.kind(), "line_comment" | "block_comment")
            && last_row(&prev) == comment.start_position().row
    })
}
