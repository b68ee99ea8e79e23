use crate::types::{
    DirectiveMap, FieldAssignment, FieldMapping, MappingOrigin, StructDescriptor,
};
use tracing::{debug, warn};

/// Merge explicit directives with same-name matching for one method.
///
/// Explicit entries win and are never replaced. Every other target field takes the
/// first source field with an identical name, or stays unmapped. The result follows
/// the target's field declaration order.
pub fn resolve_mapping(
    target: &StructDescriptor,
    source: &StructDescriptor,
    explicit: &DirectiveMap,
) -> FieldMapping {
    let mut mapping = FieldMapping::new();

    for (target_field, source_field) in explicit.iter() {
        if target_field.is_empty() || source_field.is_empty() {
            debug!(
                "Dropping incomplete directive `{}` -> `{}`",
                source_field, target_field
            );
        } else if target.field(target_field).is_none() {
            warn!(
                "Directive targets `{}`, which {} does not declare",
                target_field, target.name
            );
        } else if source.field(source_field).is_none() {
            warn!(
                "Directive reads `{}`, which {} does not declare",
                source_field, source.name
            );
        }
    }

    for field in &target.fields {
        let explicit_source = explicit
            .get(&field.name)
            .filter(|source_field| !source_field.is_empty());

        let assignment = match explicit_source {
            Some(source_field) => Some(FieldAssignment {
                target: field.name.clone(),
                source: source_field.to_string(),
                origin: MappingOrigin::Explicit,
            }),
            None => source
                .fields
                .iter()
                .find(|candidate| candidate.name == field.name)
                .map(|candidate| FieldAssignment {
                    target: field.name.clone(),
                    source: candidate.name.clone(),
                    origin: MappingOrigin::Implicit,
                }),
        };

        match assignment {
            Some(assignment) => {
                mapping.push(assignment);
            }
            None => debug!("{}.{} has no source; left at default", target.name, field.name),
        }
    }

    mapping
}
