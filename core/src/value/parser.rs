//! Value parsing for properties whose runtime type is not known up front.

use crate::error::ConversionError;
use crate::qname::{NamespaceContext, QName};
use crate::schema::{PropertyDefinition, SchemaRegistry};
use crate::value::{convert, Value, ValueType};
use std::sync::Arc;

/// A single text value as it would appear under the property's element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimitiveNode {
    pub element_name: QName,
    pub text: String,
}

pub trait ValueParser: Send + Sync {
    fn parse_value(&self, node: &PrimitiveNode, definition: &PropertyDefinition, namespaces: &NamespaceContext) -> Result<Value, ConversionError>;
}

/// Parses against simple type definitions from the schema registry
pub struct SchemaValueParser {
    schema: Arc<dyn SchemaRegistry>,
}

impl SchemaValueParser {
    pub fn new(schema: Arc<dyn SchemaRegistry>) -> Self { Self { schema } }
}

impl ValueParser for SchemaValueParser {
    fn parse_value(&self, node: &PrimitiveNode, definition: &PropertyDefinition, namespaces: &NamespaceContext) -> Result<Value, ConversionError> {
        if let Some(value_type) = ValueType::from_type_name(&definition.type_name) {
            return convert(&node.text, value_type, namespaces);
        }
        let simple = self.schema.find_simple_type_definition(&definition.type_name).ok_or_else(|| ConversionError::NoDefinition(definition.type_name.clone()))?;
        if !simple.enumeration.is_empty() {
            return match simple.enumeration.iter().any(|allowed| *allowed == node.text) {
                true => Ok(Value::Enum(node.text.clone())),
                false => Err(ConversionError::NotAllowed(simple.type_name.clone())),
            };
        }
        let base = ValueType::from_type_name(&simple.base_type).ok_or_else(|| ConversionError::NoDefinition(simple.base_type.clone()))?;
        convert(&node.text, base, namespaces)
    }
}
