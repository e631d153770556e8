//! Error types for filter construction.
//!
//! `SchemaError` is what every builder and factory operation returns. Parse failures and
//! caller misuse are only added on top of it at the public entry points, in `QueryError`.

use crate::qname::QName;
use crate::value::ValueType;
use thiserror::Error;

/// The query text does not fit the schema it is being built against.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("Unknown filter {0}")]
    UnknownFilter(String),

    #[error("Path {path} is not present in type {type_name}")]
    MissingDefinition { path: String, type_name: String },

    #[error("Only references and containers are supported")]
    UnsupportedContext,

    #[error("Definition of {0} is not property")]
    NotAProperty(String),

    #[error("Value or subfilter is missing for {0}")]
    MissingValue(String),

    #[error("Multiple values are not supported by {0}")]
    MultipleValuesNotSupported(String),

    #[error("{0}")]
    Invalid(String),

    #[error("Unknown type {0}")]
    UnknownType(QName),

    #[error("Clause {0} is specified more than once")]
    DuplicateClause(String),

    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error("Cannot convert '{value}': {source}")]
    Conversion {
        value: String,
        #[source]
        source: ConversionError,
    },

    #[error("{0}")]
    UnsupportedFeature(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl SchemaError {
    pub fn invalid(message: impl Into<String>) -> Self { SchemaError::Invalid(message.into()) }

    pub fn conversion(value: impl Into<String>, source: ConversionError) -> Self { SchemaError::Conversion { value: value.into(), source } }
}

/// Positional argument extraction failures for function-like filters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgumentError {
    #[error("Required argument {name} is not specified")]
    Missing { name: &'static str },

    #[error("Argument {name} should be {expected:?}, got {actual:?}")]
    TypeMismatch { name: &'static str, expected: ValueType, actual: ValueType },

    #[error("Argument {name} must be a literal, paths are not supported")]
    UnsupportedPath { name: &'static str },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("Invalid format for type {target_type:?}")]
    InvalidFormat { target_type: ValueType },

    #[error("Unknown namespace prefix {0}")]
    UnknownPrefix(String),

    #[error("Value is not one of the allowed values of {0}")]
    NotAllowed(QName),

    #[error("No definition for type {0}")]
    NoDefinition(QName),
}

/// Error returned from the public `parse_filter*` entry points
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("parse error: {0}")]
    Parse(prismql::error::ParseError),

    #[error("invalid filter: {0}")]
    Schema(SchemaError),

    #[error("illegal argument: {0}")]
    IllegalArgument(String),
}

impl From<prismql::error::ParseError> for QueryError {
    fn from(err: prismql::error::ParseError) -> Self { QueryError::Parse(err) }
}

impl From<SchemaError> for QueryError {
    fn from(err: SchemaError) -> Self { QueryError::Schema(err) }
}

impl From<ArgumentError> for QueryError {
    fn from(err: ArgumentError) -> Self { QueryError::Schema(SchemaError::Argument(err)) }
}

impl QueryError {
    /// The schema-level cause, if this is not a syntax or caller error
    pub fn schema_error(&self) -> Option<&SchemaError> {
        match self {
            QueryError::Schema(err) => Some(err),
            _ => None,
        }
    }
}
