use crate::path::{ItemPath, PathSegment};
use crate::qname::{QName, TYPES_NS};
use crate::value::ValueType;
use std::sync::Arc;

/// Which definition kinds a lookup accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    Any,
    Property,
    Reference,
    Container,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDefinition {
    pub item_name: QName,
    pub type_name: QName,
    /// Known runtime representation. When absent, literals go through the value parser.
    pub runtime_type: Option<ValueType>,
}

impl PropertyDefinition {
    pub fn new(item_name: QName, type_name: QName) -> Self {
        let runtime_type = ValueType::from_type_name(&type_name);
        Self { item_name, type_name, runtime_type }
    }

    pub fn is_polystring(&self) -> bool { self.runtime_type == Some(ValueType::PolyString) }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceDefinition {
    pub item_name: QName,
    pub target_type_name: Option<QName>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContainerDefinition {
    pub item_name: QName,
    pub complex_type: Arc<ComplexTypeDefinition>,
    /// Top-level object rather than a nested container value
    pub is_object: bool,
}

/// A named schema item. Cheap to clone.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemDefinition {
    Property(Arc<PropertyDefinition>),
    Reference(Arc<ReferenceDefinition>),
    Container(Arc<ContainerDefinition>),
}

pub fn object_reference_type() -> QName { QName::new(TYPES_NS, "ObjectReferenceType") }

impl ItemDefinition {
    pub fn property(item_name: QName, type_name: QName) -> Self { ItemDefinition::Property(Arc::new(PropertyDefinition::new(item_name, type_name))) }

    pub fn reference(item_name: QName, target_type_name: Option<QName>) -> Self {
        ItemDefinition::Reference(Arc::new(ReferenceDefinition { item_name, target_type_name }))
    }

    pub fn container(item_name: QName, complex_type: Arc<ComplexTypeDefinition>) -> Self {
        ItemDefinition::Container(Arc::new(ContainerDefinition { item_name, complex_type, is_object: false }))
    }

    pub fn object(item_name: QName, complex_type: Arc<ComplexTypeDefinition>) -> Self {
        ItemDefinition::Container(Arc::new(ContainerDefinition { item_name, complex_type, is_object: true }))
    }

    pub fn item_name(&self) -> &QName {
        match self {
            ItemDefinition::Property(p) => &p.item_name,
            ItemDefinition::Reference(r) => &r.item_name,
            ItemDefinition::Container(c) => &c.item_name,
        }
    }

    pub fn type_name(&self) -> QName {
        match self {
            ItemDefinition::Property(p) => p.type_name.clone(),
            ItemDefinition::Reference(_) => object_reference_type(),
            ItemDefinition::Container(c) => c.complex_type.type_name.clone(),
        }
    }

    pub fn kind(&self) -> DefinitionKind {
        match self {
            ItemDefinition::Property(_) => DefinitionKind::Property,
            ItemDefinition::Reference(_) => DefinitionKind::Reference,
            ItemDefinition::Container(_) => DefinitionKind::Container,
        }
    }

    pub fn is_kind(&self, kind: DefinitionKind) -> bool { kind == DefinitionKind::Any || kind == self.kind() }

    pub fn as_property(&self) -> Option<&Arc<PropertyDefinition>> {
        match self {
            ItemDefinition::Property(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&Arc<ReferenceDefinition>> {
        match self {
            ItemDefinition::Reference(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_container(&self) -> Option<&Arc<ContainerDefinition>> {
        match self {
            ItemDefinition::Container(c) => Some(c),
            _ => None,
        }
    }

    pub fn complex_type(&self) -> Option<&Arc<ComplexTypeDefinition>> { self.as_container().map(|c| &c.complex_type) }

    /// Path-relative lookup. References and properties have no items of their own,
    /// so only the empty path resolves for them.
    pub fn find_item_definition(&self, path: &ItemPath, kind: DefinitionKind) -> Option<ItemDefinition> {
        if path.is_empty() {
            return self.is_kind(kind).then(|| self.clone());
        }
        match self {
            ItemDefinition::Container(c) => c.complex_type.find_item_definition(path, kind),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComplexTypeDefinition {
    pub type_name: QName,
    pub super_type: Option<QName>,
    items: Vec<ItemDefinition>,
}

impl ComplexTypeDefinition {
    pub fn new(type_name: QName) -> Self { Self { type_name, super_type: None, items: Vec::new() } }

    pub fn with_super_type(mut self, super_type: QName) -> Self {
        self.super_type = Some(super_type);
        self
    }

    pub fn with_item(mut self, item: ItemDefinition) -> Self {
        self.items.push(item);
        self
    }

    pub fn property(self, name: &str, type_name: QName) -> Self { self.with_item(ItemDefinition::property(QName::local(name), type_name)) }

    pub fn reference(self, name: &str, target_type: Option<QName>) -> Self { self.with_item(ItemDefinition::reference(QName::local(name), target_type)) }

    pub fn container(self, name: &str, complex_type: Arc<ComplexTypeDefinition>) -> Self {
        self.with_item(ItemDefinition::container(QName::local(name), complex_type))
    }

    pub fn items(&self) -> &[ItemDefinition] { &self.items }

    /// Items of `parent` that this type does not redefine come first
    pub(crate) fn inherit_from(&mut self, parent: &ComplexTypeDefinition) {
        let mut items: Vec<ItemDefinition> =
            parent.items.iter().filter(|inherited| !self.items.iter().any(|own| own.item_name().matches(inherited.item_name()))).cloned().collect();
        items.append(&mut self.items);
        self.items = items;
    }

    pub fn find_local_item(&self, name: &QName) -> Option<&ItemDefinition> { self.items.iter().find(|item| item.item_name().matches(name)) }

    /// Resolve a multi-segment path, descending through containers
    pub fn find_item_definition(&self, path: &ItemPath, kind: DefinitionKind) -> Option<ItemDefinition> {
        let name = match path.first()? {
            PathSegment::Name(name) => name,
            _ => return None,
        };
        let item = self.find_local_item(name)?;
        item.find_item_definition(&path.rest(), kind)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimpleTypeDefinition {
    pub type_name: QName,
    pub base_type: QName,
    /// Allowed values. Empty when the type is not an enumeration.
    pub enumeration: Vec<String>,
}

impl SimpleTypeDefinition {
    pub fn enumeration(type_name: QName, values: &[&str]) -> Self {
        Self { type_name, base_type: QName::local("string"), enumeration: values.iter().map(|v| v.to_string()).collect() }
    }
}
