use super::{ItemFilterFactory, ItemFilterRequest};
use crate::builder::FilterTreeBuilder;
use crate::error::SchemaError;
use crate::filter::{ExistsFilter, FullTextFilter, InOidFilter, ObjectFilter, OrgFilter, OrgScope, RightHandSide, TypeFilter, ValueFilter};
use prismql::ast::{SingleValue, SubfilterOrValue};

#[derive(Debug, Clone, Copy)]
pub struct ExistsFactory;

impl ItemFilterFactory for ExistsFactory {
    fn create(&self, _builder: &FilterTreeBuilder, request: &ItemFilterRequest<'_>) -> Result<ObjectFilter, SchemaError> {
        Ok(ObjectFilter::Exists(ExistsFilter::new(request.path.clone(), request.parent.cloned(), None)))
    }
}

/// `not exists` on a property is "equals no value"; anything else is a negated exists
#[derive(Debug, Clone, Copy)]
pub struct NotExistsFactory;

impl ItemFilterFactory for NotExistsFactory {
    fn create(&self, builder: &FilterTreeBuilder, request: &ItemFilterRequest<'_>) -> Result<ObjectFilter, SchemaError> {
        if request.definition.as_property().is_some() {
            let empty = ValueFilter::new(request.path.clone(), request.definition.clone(), request.matching_rule.cloned(), RightHandSide::Values(Vec::new()));
            return Ok(ObjectFilter::Equal(empty));
        }
        Ok(ObjectFilter::not(ExistsFactory.create(builder, request)?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfFilterKind {
    FullText,
    InOid,
    OwnedByOid,
    InOrg,
    IsRoot,
    Type,
}

/// Filters on the context object itself, written as `. filterName value`
#[derive(Debug, Clone, Copy)]
pub struct SelfFilterFactory {
    kind: SelfFilterKind,
}

impl SelfFilterFactory {
    pub const fn new(kind: SelfFilterKind) -> Self { Self { kind } }
}

impl ItemFilterFactory for SelfFilterFactory {
    fn create(&self, builder: &FilterTreeBuilder, request: &ItemFilterRequest<'_>) -> Result<ObjectFilter, SchemaError> {
        request.require_self_path()?;
        match self.kind {
            SelfFilterKind::FullText => Ok(ObjectFilter::FullText(FullTextFilter { values: strings(request)? })),
            SelfFilterKind::InOid => Ok(ObjectFilter::InOid(InOidFilter { oids: strings(request)?, consider_owner: false })),
            SelfFilterKind::OwnedByOid => Ok(ObjectFilter::InOid(InOidFilter { oids: strings(request)?, consider_owner: true })),
            SelfFilterKind::InOrg => {
                let scope = match request.matching_rule {
                    None => OrgScope::Subtree,
                    Some(rule) => OrgScope::from_name(&rule.local).ok_or_else(|| SchemaError::invalid(format!("Unknown org scope {}", rule.local)))?,
                };
                let base_oid = match strings(request)?.as_slice() {
                    [oid] => oid.clone(),
                    _ => return Err(SchemaError::MultipleValuesNotSupported(request.name().to_string())),
                };
                Ok(ObjectFilter::InOrg(OrgFilter { base_oid, scope }))
            }
            SelfFilterKind::IsRoot => Ok(ObjectFilter::IsRoot),
            SelfFilterKind::Type => {
                let value = match request.require_payload()? {
                    SubfilterOrValue::SingleValue(value) => value,
                    SubfilterOrValue::ValueSet(_) => return Err(SchemaError::MultipleValuesNotSupported(request.name().to_string())),
                    _ => return Err(SchemaError::invalid(format!("Value required for filter {}", request.name()))),
                };
                let type_name = builder.literals().qname(value)?;
                Ok(ObjectFilter::Type(TypeFilter::new(type_name, ObjectFilter::All)))
            }
        }
    }
}

/// Literal text of a single value or of every member of a value set
fn strings(request: &ItemFilterRequest<'_>) -> Result<Vec<String>, SchemaError> {
    let literal = |value: &SingleValue| match value {
        SingleValue::Literal(literal) => Ok(literal.text_form()),
        SingleValue::Path(path) => Err(SchemaError::invalid(format!("Literal value required for filter {}, got path {}", request.name(), path.text))),
    };
    match request.require_payload()? {
        SubfilterOrValue::SingleValue(value) => Ok(vec![literal(value)?]),
        SubfilterOrValue::ValueSet(values) => values.iter().map(literal).collect(),
        _ => Err(SchemaError::invalid(format!("Value required for filter {}", request.name()))),
    }
}
