use crate::error::SchemaError;
use crate::qname::{NamespaceContext, QName};
use crate::schema::PropertyDefinition;
use crate::value::{convert, PrimitiveNode, Value, ValueParser, ValueType};
use prismql::ast::{Literal, SingleValue};

/// Converts literal tokens to typed values in the builder's namespace context
#[derive(Clone, Copy)]
pub struct LiteralConverter<'a> {
    namespaces: &'a NamespaceContext,
    value_parser: &'a dyn ValueParser,
}

impl<'a> LiteralConverter<'a> {
    pub fn new(namespaces: &'a NamespaceContext, value_parser: &'a dyn ValueParser) -> Self { Self { namespaces, value_parser } }

    pub fn namespaces(&self) -> &'a NamespaceContext { self.namespaces }

    pub fn to_type(&self, literal: &Literal, target_type: ValueType) -> Result<Value, SchemaError> {
        let text = literal.text_form();
        convert(&text, target_type, self.namespaces).map_err(|e| SchemaError::conversion(text, e))
    }

    /// Uses the declared runtime type when there is one, otherwise parses the text against the definition.
    pub fn for_definition(&self, literal: &Literal, definition: &PropertyDefinition) -> Result<Value, SchemaError> {
        if let Some(runtime_type) = definition.runtime_type {
            return self.to_type(literal, runtime_type);
        }
        let node = PrimitiveNode { element_name: definition.item_name.clone(), text: literal.text_form() };
        self.value_parser.parse_value(&node, definition, self.namespaces).map_err(|e| SchemaError::conversion(node.text.clone(), e))
    }

    /// Type names are written as paths (`UserType`, `c:UserType`). Only the first segment is the name.
    pub fn qname(&self, value: &SingleValue) -> Result<QName, SchemaError> {
        let text = match value {
            SingleValue::Path(path) => path.first_segment().to_string(),
            SingleValue::Literal(Literal::String(s)) => s.clone(),
            SingleValue::Literal(_) => return Err(SchemaError::invalid("Invalid value for QName")),
        };
        self.namespaces.parse_qname(&text).map_err(|e| SchemaError::conversion(text, e))
    }
}
