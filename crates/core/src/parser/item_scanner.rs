use super::utils::{is_exported, item_name, node_text};
use crate::types::FieldDescriptor;
use std::fmt;
use tree_sitter::Node;

/// What a top-level declaration is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    /// A struct with named fields
    Record(Vec<FieldDescriptor>),
    TupleStruct,
    UnitStruct,
    Enum,
    Union,
    TypeAlias,
    Trait,
    Function,
    Const,
    Static,
    Module,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ItemKind::Record(_) => "struct",
            ItemKind::TupleStruct => "tuple struct",
            ItemKind::UnitStruct => "unit struct",
            ItemKind::Enum => "enum",
            ItemKind::Union => "union",
            ItemKind::TypeAlias => "type alias",
            ItemKind::Trait => "trait",
            ItemKind::Function => "function",
            ItemKind::Const => "const",
            ItemKind::Static => "static",
            ItemKind::Module => "module",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopLevelItem {
    pub name: String,
    pub kind: ItemKind,
    pub exported: bool,
}

/// List the named top-level items of a module, in source order.
///
/// `inline_path` descends into nested `mod name { .. }` blocks first; `None` means one of
/// those blocks does not exist.
pub fn find_items(root: &Node, source: &str, inline_path: &[String]) -> Option<Vec<TopLevelItem>> {
    let mut scope = *root;
    for segment in inline_path {
        scope = find_inline_module(&scope, source, segment)?;
    }

    let mut items = Vec::new();
    let mut cursor = scope.walk();
    for node in scope.named_children(&mut cursor) {
        let Some(kind) = classify(&node, source) else {
            continue;
        };
        let Some(name) = item_name(&node, source) else {
            continue;
        };
        items.push(TopLevelItem {
            name: name.to_string(),
            kind,
            exported: is_exported(&node, source),
        });
    }

    Some(items)
}

fn find_inline_module<'t>(scope: &Node<'t>, source: &str, name: &str) -> Option<Node<'t>> {
    let mut cursor = scope.walk();
    let found = scope
        .named_children(&mut cursor)
        .filter(|n| n.kind() == "mod_item")
        .filter(|n| item_name(n, source) == Some(name))
        .find_map(|n| n.child_by_field_name("body"));
    found
}

fn classify(node: &Node, source: &str) -> Option<ItemKind> {
    let kind = match node.kind() {
        "struct_item" => match node.child_by_field_name("body") {
            Some(body) if body.kind() == "field_declaration_list" => {
                ItemKind::Record(named_fields(&body, source))
            }
            Some(_) => ItemKind::TupleStruct,
            None => ItemKind::UnitStruct,
        },
        "enum_item" => ItemKind::Enum,
        "union_item" => ItemKind::Union,
        "type_item" => ItemKind::TypeAlias,
        "trait_item" => ItemKind::Trait,
        "function_item" => ItemKind::Function,
        "const_item" => ItemKind::Const,
        "static_item" => ItemKind::Static,
        "mod_item" => ItemKind::Module,
        _ => return None,
    };
    Some(kind)
}

fn named_fields(body: &Node, source: &str) -> Vec<FieldDescriptor> {
    let mut fields = Vec::new();
    let mut cursor = body.walk();
    for field in body.named_children(&mut cursor) {
        if field.kind() != "field_declaration" {
            continue;
        }
        let name = field
            .child_by_field_name("name")
            .and_then(|n| node_text(&n, source).ok());
        let ty = field
            .child_by_field_name("type")
            .and_then(|n| node_text(&n, source).ok());
        if let (Some(name), Some(ty)) = (name, ty) {
            fields.push(FieldDescriptor {
                name: name.to_string(),
                ty: ty.to_string(),
            });
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::RustParser;

    fn items_of(source: &str, inline_path: &[&str]) -> Option<Vec<TopLevelItem>> {
        let mut parser = RustParser::new().unwrap();
        let tree = parser.parse(source).unwrap();
        let path: Vec<String> = inline_path.iter().map(|s| s.to_string()).collect();
        find_items(&tree.root_node(), source, &path)
    }

    #[test]
    fn test_record_fields_in_declaration_order() {
        let items = items_of(
            r#"
pub struct User {
    /// display name
    pub name: String,
    #[serde(default)]
    pub age: u32,
    tags: Vec<String>,
}
"#,
            &[],
        )
        .unwrap();

        assert_eq!(items.len(), 1);
        assert!(items[0].exported);
        let ItemKind::Record(fields) = &items[0].kind else {
            panic!("expected a record, got {:?}", items[0].kind);
        };
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name", "age", "tags"]);
        assert_eq!(fields[2].ty, "Vec<String>");
    }

    #[test]
    fn test_classifies_non_record_items() {
        let items = items_of(
            r#"
pub struct Id(u64);
pub struct Marker;
pub enum Role { Admin }
pub type Alias = Id;
pub trait Convert {}
pub fn build() {}
pub const LIMIT: u32 = 1;
struct Hidden { a: u8 }
"#,
            &[],
        )
        .unwrap();

        let kinds: Vec<_> = items.iter().map(|i| (i.name.as_str(), i.kind.to_string())).collect();
        assert_eq!(
            kinds,
            vec![
                ("Id", "tuple struct".to_string()),
                ("Marker", "unit struct".to_string()),
                ("Role", "enum".to_string()),
                ("Alias", "type alias".to_string()),
                ("Convert", "trait".to_string()),
                ("build", "function".to_string()),
                ("LIMIT", "const".to_string()),
                ("Hidden", "struct".to_string()),
            ]
        );
        assert!(!items.last().unwrap().exported);
    }

    #[test]
    fn test_descends_into_inline_modules() {
        let source = r#"
pub mod dto {
    pub mod v1 {
        pub struct UserDto { pub id: u64 }
    }
}
"#;
        let items = items_of(source, &["dto", "v1"]).unwrap();
        assert_eq!(items[0].name, "UserDto");
        assert!(items_of(source, &["dto", "v2"]).is_none());
    }
}
