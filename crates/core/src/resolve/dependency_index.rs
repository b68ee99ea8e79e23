use crate::{
    error::{Error, Result},
    registry::{binding_name, normalize_module_path},
    types::QualifiedTypeRef,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How a type's alias is matched against `use` paths
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyMatch {
    /// The first dependency containing the alias as a substring wins
    #[default]
    Substring,
    /// The dependency's bound name must equal the alias's first segment;
    /// several matches are an error
    Segment,
}

/// A type name bound to the module that declares it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub type_name: String,
    pub module_path: String,
}

/// Where the source and target types of one method live
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyIndex {
    source: Option<Binding>,
    target: Option<Binding>,
}

impl DependencyIndex {
    pub fn source(&self) -> Option<&Binding> {
        self.source.as_ref()
    }

    pub fn target(&self) -> Option<&Binding> {
        self.target.as_ref()
    }

    /// Module path bound to a bare type name
    pub fn lookup(&self, type_name: &str) -> Option<&str> {
        [&self.source, &self.target]
            .into_iter()
            .flatten()
            .find(|b| b.type_name == type_name)
            .map(|b| b.module_path.as_str())
    }

    pub fn is_complete(&self) -> bool {
        self.source.is_some() && self.target.is_some()
    }
}

/// Bind source and target types using the substring heuristic. Never fails;
/// unmatched types are simply absent from the index.
pub fn build_index(
    dependencies: &[String],
    source: &QualifiedTypeRef,
    target: &QualifiedTypeRef,
) -> DependencyIndex {
    let mut index = DependencyIndex::default();
    bind_by_substring(&mut index, dependencies, source, target);
    index
}

/// Index builder with a match policy and a home module for unqualified types
#[derive(Debug, Clone, Default)]
pub struct IndexBuilder<'a> {
    policy: DependencyMatch,
    home_module: Option<&'a str>,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(policy: DependencyMatch) -> Self {
        Self {
            policy,
            home_module: None,
        }
    }

    /// Unqualified types resolve to this module
    pub fn with_home_module(mut self, module_path: &'a str) -> Self {
        self.home_module = Some(module_path);
        self
    }

    pub fn build(
        &self,
        dependencies: &[String],
        source: &QualifiedTypeRef,
        target: &QualifiedTypeRef,
    ) -> Result<DependencyIndex> {
        let mut index = DependencyIndex {
            source: self.bind_unqualified(dependencies, source),
            target: self.bind_unqualified(dependencies, target),
        };

        match self.policy {
            DependencyMatch::Substring => {
                bind_by_substring(&mut index, dependencies, source, target);
            }
            DependencyMatch::Segment => {
                if index.source.is_none() {
                    index.source = bind_by_segment(dependencies, source)?;
                }
                if index.target.is_none() {
                    index.target = bind_by_segment(dependencies, target)?;
                }
            }
        }

        debug!(
            "Dependency index for {} -> {}: source={:?} target={:?}",
            source, target, index.source, index.target
        );
        Ok(index)
    }

    /// Bind `crate::` paths to themselves and bare names to a `use` that imports them,
    /// falling back to the home module
    fn bind_unqualified(
        &self,
        dependencies: &[String],
        type_ref: &QualifiedTypeRef,
    ) -> Option<Binding> {
        if type_ref.is_crate_path() {
            return Some(bind(type_ref, &type_ref.alias));
        }
        if type_ref.is_qualified() {
            return None;
        }
        if let Some(binding) = bind_imported_type(dependencies, type_ref) {
            return Some(binding);
        }
        self.home_module.map(|home| bind(type_ref, home))
    }
}

/// `use crate::domain::User;` (or `User as Account`) binds the bare name to `crate::domain`
fn bind_imported_type(dependencies: &[String], type_ref: &QualifiedTypeRef) -> Option<Binding> {
    dependencies
        .iter()
        .filter(|dependency| binding_name(dependency) == type_ref.name)
        .find_map(|dependency| {
            let (module_path, declared_name) =
                normalize_module_path(dependency).rsplit_once("::")?;
            Some(Binding {
                type_name: declared_name.to_string(),
                module_path: module_path.to_string(),
            })
        })
}

fn bind(type_ref: &QualifiedTypeRef, module_path: &str) -> Binding {
    Binding {
        type_name: type_ref.name.clone(),
        module_path: module_path.to_string(),
    }
}

fn bind_by_substring(
    index: &mut DependencyIndex,
    dependencies: &[String],
    source: &QualifiedTypeRef,
    target: &QualifiedTypeRef,
) {
    let wants_source = index.source.is_none() && source.is_qualified();
    let wants_target = index.target.is_none() && target.is_qualified();
    let shared_alias = source.alias == target.alias;

    for dependency in dependencies {
        let source_open = wants_source && index.source.is_none();
        let target_open = wants_target && index.target.is_none();
        if !source_open && !target_open {
            break;
        }

        let module_path = normalize_module_path(dependency);
        if source_open && dependency.contains(source.alias.as_str()) {
            index.source = Some(bind(source, module_path));
            if shared_alias && target_open {
                index.target = Some(bind(target, module_path));
            }
        } else if target_open && dependency.contains(target.alias.as_str()) {
            index.target = Some(bind(target, module_path));
        }
    }
}

fn bind_by_segment(dependencies: &[String], type_ref: &QualifiedTypeRef) -> Result<Option<Binding>> {
    if !type_ref.is_qualified() {
        return Ok(None);
    }

    let (head, rest) = match type_ref.alias.split_once("::") {
        Some((head, rest)) => (head, Some(rest)),
        None => (type_ref.alias.as_str(), None),
    };

    let mut candidates: Vec<String> = Vec::new();
    for dependency in dependencies {
        if binding_name(dependency) != head {
            continue;
        }
        let base = normalize_module_path(dependency);
        let module_path = match rest {
            Some(rest) => format!("{base}::{rest}"),
            None => base.to_string(),
        };
        if !candidates.contains(&module_path) {
            candidates.push(module_path);
        }
    }

    match candidates.len() {
        0 => Ok(None),
        1 => Ok(Some(bind(type_ref, &candidates[0]))),
        _ => Err(Error::AmbiguousDependency {
            alias: type_ref.alias.clone(),
            candidates,
        }),
    }
}
