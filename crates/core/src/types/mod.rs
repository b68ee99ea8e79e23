pub mod declaration;
pub mod descriptor;
pub mod mapping;
pub mod type_ref;

// Re-export commonly used types
pub use declaration::{InterfaceDeclaration, MethodDeclaration, Param};
pub use descriptor::{FieldDescriptor, StructDescriptor};
pub use mapping::{DirectiveMap, FieldAssignment, FieldMapping, MappingOrigin};
pub use type_ref::QualifiedTypeRef;
