//! Helpers for picking well-known clauses (`@type = ...`, `oid = ...`) out of a conjunction.

use super::FilterTreeBuilder;
use crate::error::SchemaError;
use crate::names::{self, FilterName};
use crate::path::ItemPath;
use crate::qname::QName;
use prismql::ast::{FilterNode, ItemFilterNode, Literal, PathExpr, SingleValue, SubfilterOrValue};

impl FilterTreeBuilder {
    fn is_filter(&self, item: &ItemFilterNode, name: FilterName) -> bool {
        names::resolve(&item.filter_name, &self.namespaces).map(|resolved| resolved == name.qname()).unwrap_or(false)
    }

    /// `node` as a non-negated `path name ...` clause
    pub(crate) fn matching_clause<'n>(&self, node: &'n FilterNode, path: &str, name: FilterName) -> Option<&'n ItemFilterNode> {
        node.as_item_filter().filter(|item| !item.negated && item.path.text == path && self.is_filter(item, name))
    }

    /// Removes and returns the first non-negated clause using filter `name`, whatever its path
    pub(crate) fn take_first<'n>(&self, clauses: &mut Vec<&'n FilterNode>, name: FilterName) -> Option<&'n ItemFilterNode> {
        let position = clauses.iter().position(|node| node.as_item_filter().is_some_and(|item| !item.negated && self.is_filter(item, name)))?;
        clauses.remove(position).as_item_filter()
    }

    /// Removes the `path name ...` clause from `clauses`. A second one is an error.
    pub(crate) fn consume_from_and<'n>(&self, clauses: &mut Vec<&'n FilterNode>, path: &str, name: FilterName) -> Result<Option<&'n ItemFilterNode>, SchemaError> {
        let mut found = None;
        let mut remaining = Vec::with_capacity(clauses.len());
        for node in clauses.drain(..) {
            match self.matching_clause(node, path, name) {
                Some(_) if found.is_some() => return Err(SchemaError::DuplicateClause(path.to_string())),
                Some(item) => found = Some(item),
                None => remaining.push(node),
            }
        }
        *clauses = remaining;
        Ok(found)
    }

    /// Whether any clause, of any filter kind, is on `path`
    pub(crate) fn and_contains(&self, clauses: &[&FilterNode], path: &str) -> bool {
        clauses.iter().any(|node| node.as_item_filter().is_some_and(|item| item.path.text == path))
    }

    fn single_value<'n>(&self, item: &'n ItemFilterNode) -> Result<&'n SingleValue, SchemaError> {
        match &item.payload {
            Some(SubfilterOrValue::SingleValue(value)) => Ok(value),
            Some(SubfilterOrValue::ValueSet(_)) => Err(SchemaError::MultipleValuesNotSupported(item.path.text.clone())),
            Some(SubfilterOrValue::Expression(_)) => Err(SchemaError::invalid(format!("Constant value required for {}", item.path.text))),
            _ => Err(SchemaError::MissingValue(item.path.text.clone())),
        }
    }

    pub(crate) fn extract_string(&self, item: &ItemFilterNode) -> Result<String, SchemaError> {
        match self.single_value(item)? {
            SingleValue::Literal(literal) => Ok(literal.text_form()),
            SingleValue::Path(_) => Err(SchemaError::invalid(format!("Literal value required for {}", item.path.text))),
        }
    }

    pub(crate) fn extract_qname(&self, item: &ItemFilterNode) -> Result<QName, SchemaError> { self.literals().qname(self.single_value(item)?) }

    pub(crate) fn extract_path(&self, item: &ItemFilterNode) -> Result<ItemPath, SchemaError> {
        match self.single_value(item)? {
            SingleValue::Path(path) => self.item_path(path),
            SingleValue::Literal(Literal::String(text)) => self.item_path(&PathExpr::new(text.as_str())),
            SingleValue::Literal(_) => Err(SchemaError::invalid(format!("Path value required for {}", item.path.text))),
        }
    }
}
