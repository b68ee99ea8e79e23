//! Per-interface orchestration: resolve every method, emit, persist

use crate::{
    codegen::{GeneratedUnit, MethodEmission, UnitEmission, emit_method, emit_unit, persist},
    config::Config,
    directive::collect_explicit,
    error::{Error, Result},
    registry::ModuleRegistry,
    resolve::{Binding, DependencyMatch, IndexBuilder, StructResolver, resolve_mapping},
    types::{InterfaceDeclaration, MethodDeclaration, QualifiedTypeRef},
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Outcome of a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub generated: Vec<PathBuf>,
    pub failures: Vec<UnitFailure>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// An interface that produced no file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitFailure {
    pub interface: String,
    pub module_path: String,
    pub error: String,
}

pub struct MappingGenerator<R> {
    resolver: StructResolver<R>,
    dependency_match: DependencyMatch,
    impl_suffix: String,
}

impl<R: ModuleRegistry> MappingGenerator<R> {
    pub fn new(registry: R) -> Self {
        Self::with_config(registry, &Config::default())
    }

    pub fn with_config(registry: R, config: &Config) -> Self {
        Self {
            resolver: StructResolver::new(registry),
            dependency_match: config.dependency_match,
            impl_suffix: config.impl_suffix.clone(),
        }
    }

    pub fn impl_type_name(&self, interface: &InterfaceDeclaration) -> String {
        format!("{}{}", interface.name, self.impl_suffix)
    }

    /// Generate the whole file for one interface. Any failing method fails the unit.
    pub fn generate_interface(&self, interface: &InterfaceDeclaration) -> Result<GeneratedUnit> {
        debug!("Processing interface: {}", interface.name);
        let impl_type_name = self.impl_type_name(interface);

        if interface.methods.is_empty() {
            warn!("Interface {} declares no methods", interface.name);
        }

        let methods = interface
            .methods
            .iter()
            .map(|method| self.generate_method(interface, &impl_type_name, method))
            .collect::<Result<Vec<_>>>()?;

        let source = emit_unit(&UnitEmission {
            interface_name: &interface.name,
            interface_module: &interface.module_path,
            impl_type_name: &impl_type_name,
            dependencies: &interface.dependencies,
            methods: &methods,
        });

        Ok(GeneratedUnit {
            interface_name: interface.name.clone(),
            impl_type_name,
            source,
        })
    }

    /// Render one method, tagging any failure with the interface and method names
    pub fn generate_method(
        &self,
        interface: &InterfaceDeclaration,
        impl_type_name: &str,
        method: &MethodDeclaration,
    ) -> Result<String> {
        self.try_generate_method(interface, impl_type_name, method)
            .map_err(|e| e.in_method(&interface.name, &method.name))
    }

    fn try_generate_method(
        &self,
        interface: &InterfaceDeclaration,
        impl_type_name: &str,
        method: &MethodDeclaration,
    ) -> Result<String> {
        check_shape(interface, method)?;
        let param = &method.params[0];
        let target_type = &method.results[0];

        let source_ref = QualifiedTypeRef::parse(&param.ty);
        let target_ref = QualifiedTypeRef::parse(target_type);

        let index = IndexBuilder::new(self.dependency_match)
            .with_home_module(&interface.module_path)
            .build(&interface.dependencies, &source_ref, &target_ref)?;

        let target_binding = bound(index.target(), &target_ref)?;
        let source_binding = bound(index.source(), &source_ref)?;

        let target = self
            .resolver
            .resolve(&target_binding.module_path, &target_binding.type_name)?;
        let source = self
            .resolver
            .resolve(&source_binding.module_path, &source_binding.type_name)?;

        let explicit = collect_explicit(&method.comments);
        let mapping = resolve_mapping(&target, &source, &explicit);
        debug!(
            "{}::{} maps {} of {} target field(s)",
            interface.name,
            method.name,
            mapping.len(),
            target.fields.len()
        );

        let return_type = method.return_type.as_deref().unwrap_or(target_type);
        Ok(emit_method(&MethodEmission {
            interface_name: &interface.name,
            impl_type_name,
            method_name: &method.name,
            receiver: method.receiver.as_deref(),
            param_name: &param.name,
            source_type_name: &param.ty,
            target_type_name: target_type,
            return_type,
            fallible: method.fallible,
            mapping: &mapping,
        }))
    }

    /// Generate and write every interface, continuing past failures
    pub fn generate_all(
        &self,
        interfaces: &[InterfaceDeclaration],
        output_dir: &Path,
    ) -> GenerationReport {
        let mut report = GenerationReport::default();

        for interface in interfaces {
            let outcome = self
                .generate_interface(interface)
                .and_then(|unit| persist(&unit, output_dir));
            match outcome {
                Ok(path) => report.generated.push(path),
                Err(e) => {
                    warn!("Failed to process interface {}: {}", interface.name, e);
                    report.failures.push(UnitFailure {
                        interface: interface.name.clone(),
                        module_path: interface.module_path.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Generated {} file(s), {} interface(s) failed",
            report.generated.len(),
            report.failures.len()
        );
        report
    }
}

fn check_shape(interface: &InterfaceDeclaration, method: &MethodDeclaration) -> Result<()> {
    let reason = match (method.params.len(), method.results.len()) {
        (1, 1) => return Ok(()),
        (0, 0) => "needs a parameter and a return type".to_string(),
        (0, _) => "needs a source parameter".to_string(),
        (_, 0) => "needs a target return type".to_string(),
        (params, 1) => format!("takes {params} parameters; expected exactly one"),
        (_, results) => format!("returns {results} values; expected exactly one"),
    };
    Err(Error::InvalidMethodShape {
        interface: interface.name.clone(),
        method: method.name.clone(),
        reason,
    })
}

fn bound<'i>(binding: Option<&'i Binding>, type_ref: &QualifiedTypeRef) -> Result<&'i Binding> {
    binding.ok_or_else(|| Error::ModuleNotFound {
        module_path: type_ref.alias.clone(),
        reason: format!("no dependency provides `{type_ref}`"),
    })
}
