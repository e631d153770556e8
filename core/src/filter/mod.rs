//! Typed filter tree produced by the builder.
//!
//! Leaves are built in one step through their constructors (or [`RefFilterBuilder`]) and the
//! tree is not modified afterwards.

mod combine;
mod display;

use crate::expression::ExpressionWrapper;
use crate::path::ItemPath;
use crate::qname::QName;
use crate::schema::ItemDefinition;
use crate::value::{ReferenceValue, Value};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectFilter {
    /// Matches everything; identity of AND
    All,
    /// Matches nothing; identity of OR
    None,
    And(Vec<ObjectFilter>),
    Or(Vec<ObjectFilter>),
    Not(Box<ObjectFilter>),
    Equal(ValueFilter),
    AnyIn(ValueFilter),
    Greater(ComparisonFilter),
    Less(ComparisonFilter),
    Substring(SubstringFilter),
    FuzzyMatch(FuzzyStringMatchFilter),
    Exists(ExistsFilter),
    FullText(FullTextFilter),
    InOid(InOidFilter),
    InOrg(OrgFilter),
    IsRoot,
    Type(TypeFilter),
    ReferencedBy(ReferencedByFilter),
    OwnedBy(OwnedByFilter),
    Ref(RefFilter),
}

impl ObjectFilter {
    pub fn not(inner: ObjectFilter) -> Self { ObjectFilter::Not(Box::new(inner)) }

    pub fn is_all(&self) -> bool { matches!(self, ObjectFilter::All) }

    /// `None` for a match-all filter, which leaves that only optionally carry a filter treat as absent
    pub fn non_trivial(self) -> Option<ObjectFilter> {
        match self {
            ObjectFilter::All => None,
            other => Some(other),
        }
    }
}

/// Right side of a property comparison
#[derive(Debug, Clone, PartialEq)]
pub enum RightHandSide {
    /// Literal values; empty means "has no value"
    Values(Vec<Value>),
    /// Another property of the same object
    Path { path: ItemPath, definition: ItemDefinition },
    Expression(ExpressionWrapper),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueFilter {
    pub path: ItemPath,
    pub definition: ItemDefinition,
    pub matching_rule: Option<QName>,
    pub right: RightHandSide,
}

impl ValueFilter {
    pub fn new(path: ItemPath, definition: ItemDefinition, matching_rule: Option<QName>, right: RightHandSide) -> Self {
        Self { path, definition, matching_rule, right }
    }

    pub fn values(&self) -> &[Value] {
        match &self.right {
            RightHandSide::Values(values) => values,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonFilter {
    pub value: ValueFilter,
    pub or_equal: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubstringFilter {
    pub value: ValueFilter,
    pub anchor_start: bool,
    pub anchor_end: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FuzzyMatchingMethod {
    Levenshtein { threshold: i32, inclusive: bool },
    Similarity { threshold: f32, inclusive: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyStringMatchFilter {
    pub path: ItemPath,
    pub definition: ItemDefinition,
    pub matching_rule: Option<QName>,
    pub method: FuzzyMatchingMethod,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExistsFilter {
    pub path: ItemPath,
    /// Definition the path is resolved against, absent inside owner clauses
    pub parent: Option<ItemDefinition>,
    pub filter: Option<Box<ObjectFilter>>,
}

impl ExistsFilter {
    pub fn new(path: ItemPath, parent: Option<ItemDefinition>, filter: Option<ObjectFilter>) -> Self { Self { path, parent, filter: filter.map(Box::new) } }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FullTextFilter {
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InOidFilter {
    pub oids: Vec<String>,
    /// Match the oid of the owning object instead (`ownedByOid`)
    pub consider_owner: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrgScope {
    OneLevel,
    Subtree,
    Ancestors,
}

impl OrgScope {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ONE_LEVEL" => Some(OrgScope::OneLevel),
            "SUBTREE" => Some(OrgScope::Subtree),
            "ANCESTORS" => Some(OrgScope::Ancestors),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrgFilter {
    pub base_oid: String,
    pub scope: OrgScope,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeFilter {
    pub type_name: QName,
    pub filter: Box<ObjectFilter>,
}

impl TypeFilter {
    pub fn new(type_name: QName, filter: ObjectFilter) -> Self { Self { type_name, filter: Box::new(filter) } }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReferencedByFilter {
    pub type_name: QName,
    pub path: Option<ItemPath>,
    pub relation: Option<QName>,
    pub filter: Option<Box<ObjectFilter>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OwnedByFilter {
    pub type_name: QName,
    pub path: Option<ItemPath>,
    pub filter: Option<Box<ObjectFilter>>,
}

/// Reference comparison. Open oid / target type either match anything or only a missing value,
/// depending on the `*_null_as_any` flags.
#[derive(Debug, Clone, PartialEq)]
pub struct RefFilter {
    pub path: ItemPath,
    pub definition: ItemDefinition,
    pub right: RefRight,
    pub oid_null_as_any: bool,
    pub target_type_null_as_any: bool,
    pub target_filter: Option<Box<ObjectFilter>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RefRight {
    Values(Vec<ReferenceValue>),
    Expression(ExpressionWrapper),
}

impl RefFilter {
    pub fn builder(path: ItemPath, definition: ItemDefinition) -> RefFilterBuilder {
        RefFilterBuilder { path, definition, right: RefRight::Values(Vec::new()), oid_null_as_any: false, target_type_null_as_any: false, target_filter: None }
    }

    pub fn values(&self) -> &[ReferenceValue] {
        match &self.right {
            RefRight::Values(values) => values,
            RefRight::Expression(_) => &[],
        }
    }
}

pub struct RefFilterBuilder {
    path: ItemPath,
    definition: ItemDefinition,
    right: RefRight,
    oid_null_as_any: bool,
    target_type_null_as_any: bool,
    target_filter: Option<ObjectFilter>,
}

impl RefFilterBuilder {
    pub fn values(mut self, values: Vec<ReferenceValue>) -> Self {
        self.right = RefRight::Values(values);
        self
    }

    pub fn expression(mut self, expression: ExpressionWrapper) -> Self {
        self.right = RefRight::Expression(expression);
        self
    }

    pub fn oid_null_as_any(mut self, any: bool) -> Self {
        self.oid_null_as_any = any;
        self
    }

    pub fn target_type_null_as_any(mut self, any: bool) -> Self {
        self.target_type_null_as_any = any;
        self
    }

    pub fn target_filter(mut self, filter: Option<ObjectFilter>) -> Self {
        self.target_filter = filter;
        self
    }

    pub fn build(self) -> RefFilter {
        RefFilter {
            path: self.path,
            definition: self.definition,
            right: self.right,
            oid_null_as_any: self.oid_null_as_any,
            target_type_null_as_any: self.target_type_null_as_any,
            target_filter: self.target_filter.map(Box::new),
        }
    }
}
