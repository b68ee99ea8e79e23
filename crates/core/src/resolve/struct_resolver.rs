use crate::{
    error::{Error, Result},
    parser::{ItemKind, RustParser, find_items},
    registry::ModuleRegistry,
    types::StructDescriptor,
};
use tracing::debug;

/// Loads struct field layouts through a module registry.
///
/// Nothing is cached: every call reloads and reparses the module.
pub struct StructResolver<R> {
    registry: R,
}

impl<R: ModuleRegistry> StructResolver<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Field layout of the exported struct `type_name` in `module_path`
    pub fn resolve(&self, module_path: &str, type_name: &str) -> Result<StructDescriptor> {
        let module = self.registry.load(module_path)?;
        let mut parser = RustParser::new()?;
        let tree = parser.parse(&module.source)?;

        let items = find_items(&tree.root_node(), &module.source, &module.inline_path)
            .ok_or_else(|| Error::ModuleNotFound {
                module_path: module.module_path.clone(),
                reason: format!("no inline module `{}`", module.inline_path.join("::")),
            })?;

        let mut other_kind = None;
        for item in items.into_iter().filter(|item| item.name == type_name) {
            if !item.exported {
                debug!("Skipping private `{}` in {}", type_name, module_path);
                continue;
            }
            match item.kind {
                ItemKind::Record(fields) => {
                    debug!(
                        "Resolved {}::{} with {} field(s)",
                        module_path,
                        type_name,
                        fields.len()
                    );
                    return Ok(StructDescriptor {
                        name: type_name.to_string(),
                        fields,
                    });
                }
                kind => {
                    other_kind.get_or_insert(kind);
                }
            }
        }

        match other_kind {
            Some(kind) => Err(Error::NotARecordType {
                module_path: module_path.to_string(),
                type_name: type_name.to_string(),
                kind: kind.to_string(),
            }),
            None => Err(Error::TypeNotFound {
                module_path: module_path.to_string(),
                type_name: type_name.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::InMemoryModuleRegistry;

    fn resolver() -> StructResolver<InMemoryModuleRegistry> {
        let registry = InMemoryModuleRegistry::new()
            .with_module(
                "crate::domain",
                r#"
pub struct User {
    pub name: String,
    pub age: u32,
}

pub struct UserId(pub u64);
pub enum Role { Admin, Member }
struct Secret { key: String }

pub mod audit {
    pub struct Entry { pub at: u64 }
}
"#,
            );
        StructResolver::new(registry)
    }

    #[test]
    fn test_resolves_record_fields() {
        let descriptor = resolver().resolve("crate::domain", "User").unwrap();
        assert_eq!(
            descriptor,
            StructDescriptor::new("User")
                .with_field("name", "String")
                .with_field("age", "u32")
        );
    }

    #[test]
    fn test_resolves_inside_inline_module() {
        let descriptor = resolver().resolve("crate::domain::audit", "Entry").unwrap();
        assert_eq!(descriptor.fields[0].name, "at");
    }

    #[test]
    fn test_missing_module() {
        let err = resolver().resolve("crate::dto", "User").unwrap_err();
        assert!(matches!(err, Error::ModuleNotFound { .. }));

        let err = resolver().resolve("crate::domain::missing", "User").unwrap_err();
        assert!(matches!(err, Error::ModuleNotFound { .. }));
    }

    #[test]
    fn test_missing_type() {
        let err = resolver().resolve("crate::domain", "Order").unwrap_err();
        assert!(matches!(err, Error::TypeNotFound { .. }));
    }

    #[test]
    fn test_private_type_is_not_found() {
        let err = resolver().resolve("crate::domain", "Secret").unwrap_err();
        assert!(matches!(err, Error::TypeNotFound { .. }));
    }

    #[test]
    fn test_non_record_types() {
        let err = resolver().resolve("crate::domain", "UserId").unwrap_err();
        match err {
            Error::NotARecordType { kind, .. } => assert_eq!(kind, "tuple struct"),
            other => panic!("unexpected error: {other}"),
        }

        let err = resolver().resolve("crate::domain", "Role").unwrap_err();
        assert!(matches!(err, Error::NotARecordType { .. }));
    }
}
