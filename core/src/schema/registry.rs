use super::definition::{object_reference_type, ComplexTypeDefinition, ItemDefinition, SimpleTypeDefinition};
use crate::qname::QName;
use std::collections::HashMap;
use std::sync::Arc;

/// Read-only schema oracle consulted while building filters
pub trait SchemaRegistry: Send + Sync {
    fn find_complex_type_definition_by_type(&self, type_name: &QName) -> Option<Arc<ComplexTypeDefinition>>;

    /// Definition of a top-level object of the given type
    fn find_object_definition_by_type(&self, type_name: &QName) -> Option<ItemDefinition>;

    fn find_simple_type_definition(&self, type_name: &QName) -> Option<Arc<SimpleTypeDefinition>>;

    /// The narrower of two related types, `None` when neither extends the other
    fn select_more_specific(&self, first: &QName, second: &QName) -> Option<QName>;

    /// Container definition for values of the given type (objects are containers too)
    fn find_container_definition_by_type(&self, type_name: &QName) -> Option<ItemDefinition> {
        if let Some(object) = self.find_object_definition_by_type(type_name) {
            return Some(object);
        }
        let complex_type = self.find_complex_type_definition_by_type(type_name)?;
        Some(ItemDefinition::container(complex_type.type_name.clone(), complex_type))
    }

    fn find_item_definition_by_type(&self, type_name: &QName) -> Option<ItemDefinition> { self.find_container_definition_by_type(type_name) }

    fn is_reference_type(&self, type_name: &QName) -> bool { type_name.matches(&object_reference_type()) }
}

/// Schema registry held entirely in memory
#[derive(Debug, Default)]
pub struct MemorySchemaRegistry {
    complex_types: HashMap<QName, Arc<ComplexTypeDefinition>>,
    objects: HashMap<QName, ItemDefinition>,
    simple_types: HashMap<QName, Arc<SimpleTypeDefinition>>,
}

impl MemorySchemaRegistry {
    pub fn builder() -> MemorySchemaRegistryBuilder { MemorySchemaRegistryBuilder::default() }

    /// Exact match first, then loose (local name) match
    fn lookup<'a, T>(map: &'a HashMap<QName, T>, name: &QName) -> Option<&'a T> {
        map.get(name).or_else(|| map.iter().find(|(key, _)| key.matches(name)).map(|(_, value)| value))
    }

    pub fn is_subtype(&self, sub: &QName, sup: &QName) -> bool {
        let mut current = Self::lookup(&self.complex_types, sub).cloned();
        while let Some(def) = current {
            if def.type_name.matches(sup) {
                return true;
            }
            current = def.super_type.as_ref().and_then(|parent| Self::lookup(&self.complex_types, parent).cloned());
        }
        false
    }
}

impl SchemaRegistry for MemorySchemaRegistry {
    fn find_complex_type_definition_by_type(&self, type_name: &QName) -> Option<Arc<ComplexTypeDefinition>> {
        Self::lookup(&self.complex_types, type_name).cloned()
    }

    fn find_object_definition_by_type(&self, type_name: &QName) -> Option<ItemDefinition> { Self::lookup(&self.objects, type_name).cloned() }

    fn find_simple_type_definition(&self, type_name: &QName) -> Option<Arc<SimpleTypeDefinition>> { Self::lookup(&self.simple_types, type_name).cloned() }

    fn select_more_specific(&self, first: &QName, second: &QName) -> Option<QName> {
        if self.is_subtype(first, second) {
            Some(first.clone())
        } else if self.is_subtype(second, first) {
            Some(second.clone())
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
pub struct MemorySchemaRegistryBuilder {
    registry: MemorySchemaRegistry,
}

impl MemorySchemaRegistryBuilder {
    /// Register a complex type. A registered super type contributes its items.
    pub fn complex_type(mut self, mut definition: ComplexTypeDefinition) -> Self {
        if let Some(parent) = definition.super_type.as_ref().and_then(|name| MemorySchemaRegistry::lookup(&self.registry.complex_types, name)) {
            let parent = parent.clone();
            definition.inherit_from(&parent);
        }
        self.registry.complex_types.insert(definition.type_name.clone(), Arc::new(definition));
        self
    }

    /// Register a complex type and make it a top-level object type with the given element name
    pub fn object_type(mut self, element_name: QName, definition: ComplexTypeDefinition) -> Self {
        let type_name = definition.type_name.clone();
        self = self.complex_type(definition);
        if let Some(complex_type) = self.registry.complex_types.get(&type_name).cloned() {
            self.registry.objects.insert(type_name, ItemDefinition::object(element_name, complex_type));
        }
        self
    }

    pub fn simple_type(mut self, definition: SimpleTypeDefinition) -> Self {
        self.registry.simple_types.insert(definition.type_name.clone(), Arc::new(definition));
        self
    }

    /// Registered complex type, for wiring it into a container item of another type
    pub fn get(&self, type_name: &QName) -> Option<Arc<ComplexTypeDefinition>> { MemorySchemaRegistry::lookup(&self.registry.complex_types, type_name).cloned() }

    pub fn build(self) -> MemorySchemaRegistry { self.registry }
}
