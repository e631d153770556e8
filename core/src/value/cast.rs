use crate::{
    error::ConversionError,
    path::ItemPath,
    qname::NamespaceContext,
    value::{PolyString, Value, ValueType},
};
use chrono::DateTime;

/// Convert the lexical form of a literal to a value of the target type
pub fn convert(text: &str, target_type: ValueType, namespaces: &NamespaceContext) -> Result<Value, ConversionError> {
    let invalid = || ConversionError::InvalidFormat { target_type };
    match target_type {
        ValueType::String => Ok(Value::String(text.to_string())),
        ValueType::Enum => Ok(Value::Enum(text.to_string())),
        ValueType::Int => text.trim().parse::<i32>().map(Value::Int).map_err(|_| invalid()),
        ValueType::Long => text.trim().parse::<i64>().map(Value::Long).map_err(|_| invalid()),
        ValueType::Float => parse_float(text).map(|f| Value::Float(f as f32)).ok_or_else(invalid),
        ValueType::Double => parse_float(text).map(Value::Double).ok_or_else(invalid),
        ValueType::Boolean => match text.trim() {
            "true" | "1" => Ok(Value::Boolean(true)),
            "false" | "0" => Ok(Value::Boolean(false)),
            _ => Err(invalid()),
        },
        ValueType::QName => namespaces.parse_qname(text).map(Value::QName),
        ValueType::DateTime => DateTime::parse_from_rfc3339(text.trim()).map(Value::DateTime).map_err(|_| invalid()),
        ValueType::PolyString => Ok(Value::PolyString(PolyString::normalized(text))),
        ValueType::ItemPath => ItemPath::parse(text, namespaces).map(Value::ItemPath),
        // References are assembled from clauses, never from a single literal
        ValueType::Reference => Err(invalid()),
    }
}

/// xsd:float / xsd:double lexical space, including INF and NaN
fn parse_float(text: &str) -> Option<f64> {
    match text.trim() {
        "INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        other => other.parse::<f64>().ok(),
    }
}
