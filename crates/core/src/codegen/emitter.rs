use crate::types::{FieldMapping, type_ref::is_reference};
use std::collections::HashMap;
use std::fmt::Write;

/// First line of every generated file
pub const GENERATED_HEADER: &str = "// Code generated by mapmap. DO NOT EDIT.";

const INDENT: &str = "    ";

/// Everything needed to render one conversion method
#[derive(Debug, Clone)]
pub struct MethodEmission<'a> {
    pub interface_name: &'a str,
    pub impl_type_name: &'a str,
    pub method_name: &'a str,
    /// `&self`, `&mut self`, `self`, or none for associated functions
    pub receiver: Option<&'a str>,
    pub param_name: &'a str,
    /// Parameter type as written, e.g. `&domain::User`
    pub source_type_name: &'a str,
    /// Type the body constructs, e.g. `dto::UserAddDto`
    pub target_type_name: &'a str,
    /// Return type as written; differs from the target for `Result<T, E>`
    pub return_type: &'a str,
    pub fallible: bool,
    pub mapping: &'a FieldMapping,
}

/// Render one trait method implementation, indented for an `impl` block
pub fn emit_method(method: &MethodEmission<'_>) -> String {
    let mut out = String::new();

    let mut params = Vec::new();
    if let Some(receiver) = method.receiver {
        params.push(receiver.to_string());
    }
    params.push(format!("{}: {}", method.param_name, method.source_type_name));

    let _ = writeln!(
        out,
        "{INDENT}fn {}({}) -> {} {{",
        method.method_name,
        params.join(", "),
        method.return_type
    );

    let binding = if method.mapping.is_empty() {
        "let"
    } else {
        "let mut"
    };
    let _ = writeln!(
        out,
        "{INDENT}{INDENT}{binding} target = {}::default();",
        method.target_type_name
    );

    let borrowed = is_reference(method.source_type_name);
    let mut remaining_reads: HashMap<&str, usize> = HashMap::new();
    for assignment in method.mapping.assignments() {
        *remaining_reads.entry(assignment.source.as_str()).or_default() += 1;
    }

    for assignment in method.mapping.assignments() {
        let reads = remaining_reads
            .get_mut(assignment.source.as_str())
            .map(|count| {
                *count -= 1;
                *count
            })
            .unwrap_or_default();
        let clone = if borrowed || reads > 0 { ".clone()" } else { "" };
        let _ = writeln!(
            out,
            "{INDENT}{INDENT}target.{} = {}.{}{clone};",
            assignment.target, method.param_name, assignment.source
        );
    }

    let result = if method.fallible { "Ok(target)" } else { "target" };
    let _ = writeln!(out, "{INDENT}{INDENT}{result}");
    let _ = writeln!(out, "{INDENT}}}");
    out
}

/// Everything needed to render one generated file
#[derive(Debug, Clone)]
pub struct UnitEmission<'a> {
    pub interface_name: &'a str,
    pub interface_module: &'a str,
    pub impl_type_name: &'a str,
    pub dependencies: &'a [String],
    /// Rendered method bodies, in trait order
    pub methods: &'a [String],
}

/// Render a complete source file: imports, the implementation type and its trait impl
pub fn emit_unit(unit: &UnitEmission<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{GENERATED_HEADER}");
    let _ = writeln!(out, "#![allow(unused_imports)]");
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "use {}::{};",
        unit.interface_module, unit.interface_name
    );
    for dependency in unit.dependencies {
        let _ = writeln!(out, "use {dependency};");
    }
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "/// Generated implementation of [`{}`].",
        unit.interface_name
    );
    let _ = writeln!(out, "#[derive(Debug, Default, Clone, Copy)]");
    let _ = writeln!(out, "pub struct {};", unit.impl_type_name);
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "impl {} for {} {{",
        unit.interface_name, unit.impl_type_name
    );
    let _ = write!(out, "{}", unit.methods.join("\n"));
    let _ = writeln!(out, "}}");
    out
}
