use crate::error::SchemaError;
use crate::path::ItemPath;
use crate::qname::{NamespaceContext, QName};
use serde::{Deserialize, Serialize};

/// Opaque expression handed back by an [`ExpressionParser`]; evaluated later, outside of filter construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionWrapper {
    pub element_name: QName,
    pub expression: serde_json::Value,
}

impl ExpressionWrapper {
    pub fn new(element_name: QName, expression: serde_json::Value) -> Self { Self { element_name, expression } }
}

/// Turns variable paths, scripts and constants into expressions
pub trait ExpressionParser: Send + Sync {
    fn parse_path(&self, path: &ItemPath) -> Result<ExpressionWrapper, SchemaError>;

    /// Constants arrive here with language `const` and the constant name as the script text.
    fn parse_script(&self, namespaces: &NamespaceContext, language: Option<&str>, script: &str) -> Result<ExpressionWrapper, SchemaError>;
}

pub const CONST_LANGUAGE: &str = "const";
