use super::{ItemFilterFactory, ItemFilterRequest};
use crate::builder::{FilterContext, FilterTreeBuilder};
use crate::error::SchemaError;
use crate::filter::{ObjectFilter, OwnedByFilter, ReferencedByFilter};
use crate::names::FilterName;
use crate::qname::QName;
use crate::schema::{ComplexTypeDefinition, ItemDefinition};
use prismql::ast::{FilterNode, ItemFilterNode};
use std::sync::Arc;

const TYPE_CLAUSE: &str = "@type";
const PATH_CLAUSE: &str = "@path";
const RELATION_CLAUSE: &str = "@relation";

fn subfilter<'a>(request: &ItemFilterRequest<'a>) -> Result<&'a FilterNode, SchemaError> {
    request.require_payload()?.subfilter().ok_or_else(|| SchemaError::invalid(format!("Filter {} requires subfilter", request.name())))
}

fn required<'n>(clause: Option<&'n ItemFilterNode>, filter: &str, name: &str) -> Result<&'n ItemFilterNode, SchemaError> {
    clause.ok_or_else(|| SchemaError::invalid(format!("{} filter requires {} clause", filter, name)))
}

/// `. referencedBy (@type = AssignmentType and @path = targetRef and ...)`
#[derive(Debug, Clone, Copy)]
pub struct ReferencedByFactory;

impl ItemFilterFactory for ReferencedByFactory {
    fn create(&self, builder: &FilterTreeBuilder, request: &ItemFilterRequest<'_>) -> Result<ObjectFilter, SchemaError> {
        request.require_self_path()?;
        let mut clauses = builder.and_clauses(subfilter(request)?);

        let type_clause = required(builder.consume_from_and(&mut clauses, TYPE_CLAUSE, FilterName::Equal)?, request.name(), TYPE_CLAUSE)?;
        let path_clause = builder.consume_from_and(&mut clauses, PATH_CLAUSE, FilterName::Equal)?;
        let relation_clause = builder.consume_from_and(&mut clauses, RELATION_CLAUSE, FilterName::Equal)?;

        let type_name = builder.extract_qname(type_clause)?;
        let path = path_clause.map(|clause| builder.extract_path(clause)).transpose()?;
        let relation = relation_clause.map(|clause| builder.extract_qname(clause)).transpose()?;

        let (definition, complex_type) = referrer(builder, &type_name)?;
        let context = FilterContext::new(Some(&definition), Some(&complex_type));
        let filter = builder.and_filter(context, clauses)?.non_trivial();

        Ok(ObjectFilter::ReferencedBy(ReferencedByFilter { type_name, path, relation, filter: filter.map(Box::new) }))
    }
}

/// `. ownedBy (@type = UserType and @path = assignment and ...)`
#[derive(Debug, Clone, Copy)]
pub struct OwnedByFactory;

impl ItemFilterFactory for OwnedByFactory {
    fn create(&self, builder: &FilterTreeBuilder, request: &ItemFilterRequest<'_>) -> Result<ObjectFilter, SchemaError> {
        request.require_self_path()?;
        let mut clauses = builder.and_clauses(subfilter(request)?);

        let type_clause = required(builder.consume_from_and(&mut clauses, TYPE_CLAUSE, FilterName::Equal)?, request.name(), TYPE_CLAUSE)?;
        let path_clause = builder.consume_from_and(&mut clauses, PATH_CLAUSE, FilterName::Equal)?;

        let type_name = builder.extract_qname(type_clause)?;
        let path = path_clause.map(|clause| builder.extract_path(clause)).transpose()?;

        let (_, complex_type) = referrer(builder, &type_name)?;
        let context = FilterContext::new(None, Some(&complex_type));
        let filter = builder.and_filter(context, clauses)?.non_trivial();

        Ok(ObjectFilter::OwnedBy(OwnedByFilter { type_name, path, filter: filter.map(Box::new) }))
    }
}

fn referrer(builder: &FilterTreeBuilder, type_name: &QName) -> Result<(ItemDefinition, Arc<ComplexTypeDefinition>), SchemaError> {
    let complex_type = builder.schema().find_complex_type_definition_by_type(type_name).ok_or_else(|| SchemaError::UnknownType(type_name.clone()))?;
    let definition = builder.schema().find_container_definition_by_type(type_name).ok_or_else(|| SchemaError::UnknownType(type_name.clone()))?;
    Ok((definition, complex_type))
}
