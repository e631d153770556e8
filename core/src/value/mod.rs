mod cast;
pub mod parser;
mod polystring;

pub use cast::convert;
pub use parser::{PrimitiveNode, SchemaValueParser, ValueParser};
pub use polystring::PolyString;

use crate::path::ItemPath;
use crate::qname::{QName, TYPES_NS, XSD_NS};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A typed filter operand
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    QName(QName),
    DateTime(DateTime<FixedOffset>),
    PolyString(PolyString),
    ItemPath(ItemPath),
    /// Member of an enumerated simple type
    Enum(String),
    Reference(ReferenceValue),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    String,
    Int,
    Long,
    Float,
    Double,
    Boolean,
    QName,
    DateTime,
    PolyString,
    ItemPath,
    Enum,
    Reference,
}

impl ValueType {
    pub fn of(v: &Value) -> Self {
        match v {
            Value::String(_) => ValueType::String,
            Value::Int(_) => ValueType::Int,
            Value::Long(_) => ValueType::Long,
            Value::Float(_) => ValueType::Float,
            Value::Double(_) => ValueType::Double,
            Value::Boolean(_) => ValueType::Boolean,
            Value::QName(_) => ValueType::QName,
            Value::DateTime(_) => ValueType::DateTime,
            Value::PolyString(_) => ValueType::PolyString,
            Value::ItemPath(_) => ValueType::ItemPath,
            Value::Enum(_) => ValueType::Enum,
            Value::Reference(_) => ValueType::Reference,
        }
    }

    /// Runtime type for a built-in XSD or prism type name
    pub fn from_type_name(type_name: &QName) -> Option<Self> {
        let builtin = |namespace: &str| !type_name.is_qualified() || type_name.namespace == namespace;
        if builtin(XSD_NS) {
            let value_type = match type_name.local.as_str() {
                "string" | "anyURI" => ValueType::String,
                "int" | "short" => ValueType::Int,
                "long" | "integer" => ValueType::Long,
                "float" => ValueType::Float,
                "double" | "decimal" => ValueType::Double,
                "boolean" => ValueType::Boolean,
                "QName" => ValueType::QName,
                "dateTime" => ValueType::DateTime,
                _ => return Self::from_prism_type(type_name),
            };
            return Some(value_type);
        }
        if builtin(TYPES_NS) {
            return Self::from_prism_type(type_name);
        }
        None
    }

    fn from_prism_type(type_name: &QName) -> Option<Self> {
        match type_name.local.as_str() {
            "PolyStringType" => Some(ValueType::PolyString),
            "ItemPathType" => Some(ValueType::ItemPath),
            _ => None,
        }
    }
}

/// Target of a reference: any part may be left open
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceValue {
    pub oid: Option<String>,
    pub target_type: Option<QName>,
    pub relation: Option<QName>,
}

impl ReferenceValue {
    pub fn new(oid: Option<String>, target_type: Option<QName>) -> Self { Self { oid, target_type, relation: None } }

    pub fn with_relation(mut self, relation: Option<QName>) -> Self {
        self.relation = relation;
        self
    }
}

/// Rust types that a positional filter argument can be read as
pub trait ArgumentType: Sized + Clone {
    const VALUE_TYPE: ValueType;

    fn from_value(value: &Value) -> Option<Self>;
}

impl ArgumentType for String {
    const VALUE_TYPE: ValueType = ValueType::String;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl ArgumentType for i32 {
    const VALUE_TYPE: ValueType = ValueType::Int;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl ArgumentType for f32 {
    const VALUE_TYPE: ValueType = ValueType::Float;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl ArgumentType for bool {
    const VALUE_TYPE: ValueType = ValueType::Boolean;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl ArgumentType for QName {
    const VALUE_TYPE: ValueType = ValueType::QName;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::QName(q) => Some(q.clone()),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) | Value::Enum(s) => write!(f, "\"{}\"", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Long(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Double(x) => write!(f, "{}", x),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::QName(q) => write!(f, "{}", q),
            Value::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Value::PolyString(p) => write!(f, "{}", p),
            Value::ItemPath(p) => write!(f, "{}", p),
            Value::Reference(r) => {
                write!(f, "ref(oid={}", r.oid.as_deref().unwrap_or("*"))?;
                if let Some(target_type) = &r.target_type {
                    write!(f, ", type={}", target_type)?;
                }
                if let Some(relation) = &r.relation {
                    write!(f, ", relation={}", relation)?;
                }
                write!(f, ")")
            }
        }
    }
}
