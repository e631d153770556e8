use super::{FilterContext, FilterTreeBuilder};
use crate::error::SchemaError;
use crate::filter::{ObjectFilter, RefFilter, RightHandSide, ValueFilter};
use crate::names::{self, FilterName};
use crate::path::ItemPath;
use crate::qname::{QName, MATCHING_RULE_NS};
use crate::schema::ItemDefinition;
use crate::value::{PolyString, ReferenceValue, Value};
use prismql::ast::FilterNode;

const OID: &str = "oid";
const RELATION: &str = "relation";
const TARGET_TYPE: &str = "targetType";
const TYPE: &str = "type";
const TARGET_ALIASES: [&str; 2] = ["@", "target"];

const ORIG: &str = "orig";
const NORM: &str = "norm";
const POLYSTRING_STRICT: &str = "polyStringStrict";
const POLYSTRING_ORIG: &str = "polyStringOrig";
const POLYSTRING_NORM: &str = "polyStringNorm";

impl FilterTreeBuilder {
    /// `targetRef matches (oid = "..." and relation = org:manager and targetType = RoleType and @ matches (...))`
    ///
    /// An absent `oid` or target type clause matches any value, not just a missing one.
    pub(crate) fn matches_reference_filter(&self, path: &ItemPath, definition: &ItemDefinition, subfilter: &FilterNode) -> Result<ObjectFilter, SchemaError> {
        let mut clauses = self.and_clauses(subfilter);
        let oid_null_as_any = !self.and_contains(&clauses, OID);
        let type_null_as_any = !self.and_contains(&clauses, TARGET_TYPE) && !self.and_contains(&clauses, TYPE);

        let oid = self.consume_from_and(&mut clauses, OID, FilterName::Equal)?.map(|clause| self.extract_string(clause)).transpose()?;
        let relation = self.consume_from_and(&mut clauses, RELATION, FilterName::Equal)?.map(|clause| self.extract_qname(clause)).transpose()?;
        let target_type_clause = self.consume_from_and(&mut clauses, TARGET_TYPE, FilterName::Equal)?;
        let type_clause = self.consume_from_and(&mut clauses, TYPE, FilterName::Equal)?;
        let type_clause = match (target_type_clause, type_clause) {
            (Some(_), Some(_)) => return Err(SchemaError::DuplicateClause(TARGET_TYPE.to_string())),
            (target_type, type_) => target_type.or(type_),
        };
        let target_type = type_clause.map(|clause| self.extract_qname(clause)).transpose()?;

        let declared = definition.as_reference().and_then(|reference| reference.target_type_name.clone());
        let effective_type = match (&target_type, &declared) {
            (Some(clause), Some(declared)) => Some(
                self.schema
                    .select_more_specific(clause, declared)
                    .ok_or_else(|| SchemaError::invalid(format!("Type {} is not compatible with target type {}", clause, declared)))?,
            ),
            (clause, declared) => clause.clone().or_else(|| declared.clone()),
        };

        let target_filter = match clauses.as_slice() {
            [] => None,
            [clause] => {
                let nested = TARGET_ALIASES
                    .iter()
                    .find_map(|alias| self.matching_clause(clause, alias, FilterName::Matches))
                    .ok_or_else(|| SchemaError::invalid(format!("Additional unsupported filter specified: {}", clause)))?;
                let nested = nested.payload.as_ref().and_then(|payload| payload.subfilter()).ok_or_else(|| SchemaError::invalid("matches filter requires subfilter"))?;
                let target = effective_type.ok_or_else(|| SchemaError::invalid(format!("Target type of {} is not known", path)))?;
                let target_definition = self.schema.find_container_definition_by_type(&target).ok_or(SchemaError::UnknownType(target))?;
                Some(self.parse_node(FilterContext::of(&target_definition), nested)?)
            }
            more => {
                let unsupported = more.iter().map(|clause| clause.to_string()).collect::<Vec<_>>().join(", ");
                return Err(SchemaError::invalid(format!("Additional unsupported filters specified: {}", unsupported)));
            }
        };

        let value = ReferenceValue::new(oid, target_type).with_relation(relation);
        let filter = RefFilter::builder(path.clone(), definition.clone())
            .values(vec![value])
            .oid_null_as_any(oid_null_as_any)
            .target_type_null_as_any(type_null_as_any)
            .target_filter(target_filter)
            .build();
        Ok(ObjectFilter::Ref(filter))
    }

    /// `name matches (orig = "Bob" and norm = "bob")`
    pub(crate) fn matches_polystring_filter(&self, path: &ItemPath, definition: &ItemDefinition, subfilter: &FilterNode) -> Result<ObjectFilter, SchemaError> {
        let mut parts = PolyStringParts::default();
        self.collect_polystring(subfilter, &mut parts)?;

        let (value, rule) = match (parts.orig, parts.norm) {
            (Some(orig), Some(norm)) => (PolyString::with_norm(orig, norm), POLYSTRING_STRICT),
            (Some(orig), None) => (PolyString::new(orig), POLYSTRING_ORIG),
            (None, Some(norm)) => (PolyString::with_norm(norm.clone(), norm), POLYSTRING_NORM),
            (None, None) => return Err(SchemaError::invalid("orig or norm must be defined in matches polystring filter.")),
        };
        let rule = QName::new(MATCHING_RULE_NS, rule);
        Ok(ObjectFilter::Equal(ValueFilter::new(path.clone(), definition.clone(), Some(rule), RightHandSide::Values(vec![Value::PolyString(value)]))))
    }

    fn collect_polystring(&self, node: &FilterNode, parts: &mut PolyStringParts) -> Result<(), SchemaError> {
        match node {
            FilterNode::And { left, right } => {
                self.collect_polystring(left, parts)?;
                self.collect_polystring(right, parts)
            }
            FilterNode::Sub(inner) => self.collect_polystring(inner, parts),
            FilterNode::Generic(item) if !item.negated && names::resolve(&item.filter_name, &self.namespaces)? == FilterName::Equal.qname() => {
                let slot = match item.path.text.as_str() {
                    ORIG => &mut parts.orig,
                    NORM => &mut parts.norm,
                    other => return Err(SchemaError::invalid(format!("Unknown property {} for PolyString", other))),
                };
                *slot = Some(self.extract_string(item)?);
                Ok(())
            }
            _ => Err(SchemaError::invalid("Only 'equals' and 'and' filters are supported.")),
        }
    }
}

#[derive(Default)]
struct PolyStringParts {
    orig: Option<String>,
    norm: Option<String>,
}
