//! Discovery of traits marked for mapping generation

use super::{
    RustParser,
    utils::{item_name, node_text, preceding_comments},
};
use crate::{
    error::Result,
    types::{InterfaceDeclaration, MethodDeclaration, Param},
};
use tracing::debug;
use tree_sitter::Node;

/// Comment that marks a trait for generation
pub const ASSEMBLER_MARKER: &str = "mapmap:assembler";

/// Find every marked trait in a Rust file.
///
/// `module_path` is the path of the file's module (`crate::demo::asm`). Traits inside
/// inline modules get that module's path and `use` list.
pub fn scan_interfaces(source: &str, module_path: &str) -> Result<Vec<InterfaceDeclaration>> {
    let mut parser = RustParser::new()?;
    let tree = parser.parse(source)?;
    let mut interfaces = Vec::new();
    scan_scope(&tree.root_node(), source, module_path, &mut interfaces)?;
    Ok(interfaces)
}

fn scan_scope(
    scope: &Node,
    source: &str,
    module_path: &str,
    interfaces: &mut Vec<InterfaceDeclaration>,
) -> Result<()> {
    let dependencies = collect_uses(scope, source, module_path)?;

    let mut cursor = scope.walk();
    for node in scope.named_children(&mut cursor) {
        match node.kind() {
            "trait_item" if is_marked(&node, source) => {
                let interface = build_interface(&node, source, module_path, &dependencies)?;
                debug!(
                    "Found interface {} in {} with {} method(s)",
                    interface.name,
                    module_path,
                    interface.methods.len()
                );
                interfaces.push(interface);
            }
            "mod_item" => {
                let (Some(name), Some(body)) =
                    (item_name(&node, source), node.child_by_field_name("body"))
                else {
                    continue;
                };
                scan_scope(&body, source, &format!("{module_path}::{name}"), interfaces)?;
            }
            _ => {}
        }
    }

    Ok(())
}

fn is_marked(node: &Node, source: &str) -> bool {
    preceding_comments(node, source)
        .iter()
        .any(|comment| comment.contains(ASSEMBLER_MARKER))
}

fn build_interface(
    node: &Node,
    source: &str,
    module_path: &str,
    dependencies: &[String],
) -> Result<InterfaceDeclaration> {
    let name = item_name(node, source).unwrap_or_default();
    let mut interface = InterfaceDeclaration::new(name, module_path);
    interface.dependencies = dependencies.to_vec();

    let Some(body) = node.child_by_field_name("body") else {
        return Ok(interface);
    };

    let mut cursor = body.walk();
    for item in body.named_children(&mut cursor) {
        if item.kind() == "function_signature_item" {
            interface.methods.push(build_method(&item, source)?);
        }
    }

    Ok(interface)
}

fn build_method(node: &Node, source: &str) -> Result<MethodDeclaration> {
    let mut method = MethodDeclaration::new(item_name(node, source).unwrap_or_default());
    method.receiver = None;
    method.comments = preceding_comments(node, source);

    if let Some(parameters) = node.child_by_field_name("parameters") {
        let mut cursor = parameters.walk();
        for param in parameters.named_children(&mut cursor) {
            match param.kind() {
                "self_parameter" => method.receiver = Some(node_text(&param, source)?.to_string()),
                "parameter" => {
                    let pattern = param
                        .child_by_field_name("pattern")
                        .map(|p| node_text(&p, source))
                        .transpose()?
                        .unwrap_or_default();
                    let ty = param
                        .child_by_field_name("type")
                        .map(|t| node_text(&t, source))
                        .transpose()?
                        .unwrap_or_default();
                    method.params.push(Param {
                        name: pattern.trim_start_matches("mut ").trim().to_string(),
                        ty: ty.to_string(),
                    });
                }
                _ => {}
            }
        }
    }

    if let Some(return_type) = node.child_by_field_name("return_type") {
        method.return_type = Some(node_text(&return_type, source)?.to_string());
        let (results, fallible) = split_results(&return_type, source)?;
        method.results = results;
        method.fallible = fallible;
    }

    Ok(method)
}

/// `T` -> [T]; `Result<T, E>` -> [T] (fallible); `(A, B)` -> [A, B]; `()` -> []
fn split_results(return_type: &Node, source: &str) -> Result<(Vec<String>, bool)> {
    match return_type.kind() {
        "generic_type" => {
            let base = return_type
                .child_by_field_name("type")
                .map(|t| node_text(&t, source))
                .transpose()?
                .unwrap_or_default();
            let arguments = return_type.child_by_field_name("type_arguments");
            if base == "Result" || base.ends_with("::Result") {
                if let Some(arguments) = arguments {
                    let mut cursor = arguments.walk();
                    let first = arguments
                        .named_children(&mut cursor)
                        .find(|n| n.kind() != "lifetime" && !n.kind().ends_with("comment"));
                    if let Some(first) = first {
                        return Ok((vec![node_text(&first, source)?.to_string()], true));
                    }
                }
            }
            Ok((vec![node_text(return_type, source)?.to_string()], false))
        }
        "tuple_type" => {
            let mut cursor = return_type.walk();
            let results = return_type
                .named_children(&mut cursor)
                .map(|n| node_text(&n, source).map(str::to_string))
                .collect::<Result<Vec<_>>>()?;
            Ok((results, false))
        }
        "unit_type" => Ok((Vec::new(), false)),
        _ => Ok((vec![node_text(return_type, source)?.to_string()], false)),
    }
}

/// Flattened, absolute `use` paths declared directly in `scope`
fn collect_uses(scope: &Node, source: &str, module_path: &str) -> Result<Vec<String>> {
    let mut paths = Vec::new();
    let mut cursor = scope.walk();
    for node in scope.named_children(&mut cursor) {
        if node.kind() != "use_declaration" {
            continue;
        }
        if let Some(argument) = node.child_by_field_name("argument") {
            expand_use(&argument, source, "", &mut paths)?;
        }
    }

    Ok(paths
        .into_iter()
        .map(|path| absolutize(&path, module_path))
        .collect())
}

fn expand_use(node: &Node, source: &str, prefix: &str, paths: &mut Vec<String>) -> Result<()> {
    match node.kind() {
        "use_as_clause" => {
            let path = field_path(node, "path", source)?;
            let alias = field_path(node, "alias", source)?;
            paths.push(format!("{} as {}", join_path(prefix, &path), alias));
        }
        "scoped_use_list" => {
            let path = field_path(node, "path", source)?;
            let prefix = join_path(prefix, &path);
            if let Some(list) = node.child_by_field_name("list") {
                expand_use(&list, source, &prefix, paths)?;
            }
        }
        "use_list" => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                expand_use(&child, source, prefix, paths)?;
            }
        }
        "line_comment" | "block_comment" => {}
        _ => {
            let text = compact(node_text(node, source)?);
            if text == "self" && !prefix.is_empty() {
                paths.push(prefix.to_string());
            } else {
                paths.push(join_path(prefix, &text));
            }
        }
    }
    Ok(())
}

fn field_path(node: &Node, field: &str, source: &str) -> Result<String> {
    node.child_by_field_name(field)
        .map(|n| node_text(&n, source).map(compact))
        .transpose()
        .map(Option::unwrap_or_default)
}

fn compact(text: &str) -> String {
    text.split_whitespace().collect()
}

fn join_path(prefix: &str, path: &str) -> String {
    match (prefix.is_empty(), path.is_empty()) {
        (true, _) => path.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{prefix}::{path}"),
    }
}

/// Rewrite `self::` and `super::` prefixes against the declaring module
fn absolutize(path: &str, module_path: &str) -> String {
    let mut base: Vec<&str> = module_path.split("::").collect();
    let mut rest = path;

    if let Some(stripped) = rest.strip_prefix("self::") {
        rest = stripped;
    } else if rest.starts_with("super::") {
        while let Some(stripped) = rest.strip_prefix("super::") {
            if base.len() > 1 {
                base.pop();
            }
            rest = stripped;
        }
    } else {
        return path.to_string();
    }

    format!("{}::{}", base.join("::"), rest)
}
