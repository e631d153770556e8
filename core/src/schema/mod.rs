mod definition;
mod registry;

pub use definition::{
    object_reference_type, ComplexTypeDefinition, ContainerDefinition, DefinitionKind, ItemDefinition, PropertyDefinition, ReferenceDefinition,
    SimpleTypeDefinition,
};
pub use registry::{MemorySchemaRegistry, MemorySchemaRegistryBuilder, SchemaRegistry};
