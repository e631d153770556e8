//! Positional arguments of function-like filters, e.g. `name levenshtein ("ancor", 2, true)`.

use crate::error::{ArgumentError, SchemaError};
use crate::literal::LiteralConverter;
use crate::value::{ArgumentType, Value, ValueType};
use prismql::ast::SingleValue;
use std::collections::HashMap;

/// A named, typed argument. Optional arguments carry their default.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterArgumentSpec<T> {
    pub name: &'static str,
    pub required: bool,
    pub default: Option<T>,
}

impl<T> FilterArgumentSpec<T> {
    pub const fn required(name: &'static str) -> Self { Self { name, required: true, default: None } }

    pub const fn optional(name: &'static str, default: T) -> Self { Self { name, required: false, default: Some(default) } }
}

/// Type-erased view of a [`FilterArgumentSpec`] so differently typed specs fit in one list
pub trait ArgumentSpec: Sync {
    fn name(&self) -> &'static str;
    fn required(&self) -> bool;
    fn value_type(&self) -> ValueType;
}

impl<T: ArgumentType + Sync> ArgumentSpec for FilterArgumentSpec<T> {
    fn name(&self) -> &'static str { self.name }

    fn required(&self) -> bool { self.required }

    fn value_type(&self) -> ValueType { T::VALUE_TYPE }
}

/// Extracted arguments by spec name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: HashMap<&'static str, Value>,
}

impl Arguments {
    pub fn insert(&mut self, name: &'static str, value: Value) { self.values.insert(name, value); }

    pub fn get(&self, name: &str) -> Option<&Value> { self.values.get(name) }

    pub fn len(&self) -> usize { self.values.len() }

    pub fn is_empty(&self) -> bool { self.values.is_empty() }
}

/// Bind `values` to `specs` by position.
pub fn extract_positional(specs: &[&dyn ArgumentSpec], values: &[SingleValue], literals: &LiteralConverter) -> Result<Arguments, SchemaError> {
    let mut arguments = Arguments::default();
    let mut supplied = values.iter();
    for spec in specs {
        match supplied.next() {
            None if spec.required() => return Err(ArgumentError::Missing { name: spec.name() }.into()),
            None => {}
            Some(SingleValue::Literal(literal)) => {
                let value = literals.to_type(literal, spec.value_type())?;
                arguments.insert(spec.name(), value);
            }
            Some(SingleValue::Path(_)) => return Err(ArgumentError::UnsupportedPath { name: spec.name() }.into()),
        }
    }
    let extra = supplied.count();
    if extra > 0 {
        tracing::warn!(extra, expected = specs.len(), "ignoring positional arguments beyond the declared ones");
    }
    Ok(arguments)
}

/// Typed argument value, or the spec default when it was not supplied
pub fn get_argument<T: ArgumentType>(spec: &FilterArgumentSpec<T>, arguments: &Arguments) -> Result<T, ArgumentError> {
    let Some(value) = arguments.get(spec.name) else {
        return spec.default.clone().ok_or(ArgumentError::Missing { name: spec.name });
    };
    T::from_value(value).ok_or(ArgumentError::TypeMismatch { name: spec.name, expected: T::VALUE_TYPE, actual: ValueType::of(value) })
}

/// All values of an argument. Absent is empty, a scalar is a single element.
pub fn get_values<T: ArgumentType>(spec: &FilterArgumentSpec<T>, arguments: &Arguments) -> Result<Vec<T>, ArgumentError> {
    arguments
        .get(spec.name)
        .into_iter()
        .map(|value| T::from_value(value).ok_or(ArgumentError::TypeMismatch { name: spec.name, expected: T::VALUE_TYPE, actual: ValueType::of(value) }))
        .collect()
}
