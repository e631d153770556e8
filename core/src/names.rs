//! Filter names and their operator aliases.

use crate::error::SchemaError;
use crate::qname::{NamespaceContext, QName, QUERY_NS};
use prismql::ast::FilterNameRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterName {
    And,
    Or,
    Not,
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    AnyIn,
    Contains,
    StartsWith,
    EndsWith,
    Matches,
    Exists,
    FullText,
    InOid,
    OwnedByOid,
    InOrg,
    IsRoot,
    Type,
    ReferencedBy,
    OwnedBy,
    Levenshtein,
    Similarity,
}

impl FilterName {
    pub const ALL: [FilterName; 25] = [
        FilterName::And,
        FilterName::Or,
        FilterName::Not,
        FilterName::Equal,
        FilterName::NotEqual,
        FilterName::Less,
        FilterName::LessOrEqual,
        FilterName::Greater,
        FilterName::GreaterOrEqual,
        FilterName::AnyIn,
        FilterName::Contains,
        FilterName::StartsWith,
        FilterName::EndsWith,
        FilterName::Matches,
        FilterName::Exists,
        FilterName::FullText,
        FilterName::InOid,
        FilterName::OwnedByOid,
        FilterName::InOrg,
        FilterName::IsRoot,
        FilterName::Type,
        FilterName::ReferencedBy,
        FilterName::OwnedBy,
        FilterName::Levenshtein,
        FilterName::Similarity,
    ];

    pub fn local_name(self) -> &'static str {
        match self {
            FilterName::And => "and",
            FilterName::Or => "or",
            FilterName::Not => "not",
            FilterName::Equal => "equal",
            FilterName::NotEqual => "notEqual",
            FilterName::Less => "less",
            FilterName::LessOrEqual => "lessOrEqual",
            FilterName::Greater => "greater",
            FilterName::GreaterOrEqual => "greaterOrEqual",
            FilterName::AnyIn => "anyIn",
            FilterName::Contains => "contains",
            FilterName::StartsWith => "startsWith",
            FilterName::EndsWith => "endsWith",
            FilterName::Matches => "matches",
            FilterName::Exists => "exists",
            FilterName::FullText => "fullText",
            FilterName::InOid => "inOid",
            FilterName::OwnedByOid => "ownedByOid",
            FilterName::InOrg => "inOrg",
            FilterName::IsRoot => "isRoot",
            FilterName::Type => "type",
            FilterName::ReferencedBy => "referencedBy",
            FilterName::OwnedBy => "ownedBy",
            FilterName::Levenshtein => "levenshtein",
            FilterName::Similarity => "similarity",
        }
    }

    pub fn alias(self) -> Option<&'static str> {
        match self {
            FilterName::Equal => Some("="),
            FilterName::NotEqual => Some("!="),
            FilterName::Less => Some("<"),
            FilterName::LessOrEqual => Some("<="),
            FilterName::Greater => Some(">"),
            FilterName::GreaterOrEqual => Some(">="),
            _ => None,
        }
    }

    pub fn qname(self) -> QName { QName::new(QUERY_NS, self.local_name()) }

    pub fn from_qname(name: &QName) -> Option<Self> {
        if name.namespace != QUERY_NS {
            return None;
        }
        FilterName::ALL.into_iter().find(|f| f.local_name() == name.local)
    }

    pub fn from_alias(alias: &str) -> Option<Self> { FilterName::ALL.into_iter().find(|f| f.alias() == Some(alias)) }
}

/// Canonical name for an operator alias such as `<=`
pub fn alias_for(text: &str) -> Option<QName> { FilterName::from_alias(text).map(FilterName::qname) }

/// Canonical qualified name of a filter as written in the query. Unprefixed names live in the query namespace.
pub fn resolve(name: &FilterNameRef, namespaces: &NamespaceContext) -> Result<QName, SchemaError> {
    match name {
        FilterNameRef::Alias(alias) => alias_for(alias).ok_or_else(|| SchemaError::UnknownFilter(alias.clone())),
        FilterNameRef::Name(prefixed) => match &prefixed.prefix {
            None => Ok(QName::new(QUERY_NS, prefixed.local.clone())),
            Some(prefix) => match namespaces.namespace_for(prefix) {
                Some(namespace) => Ok(QName::new(namespace, prefixed.local.clone())),
                None => Err(SchemaError::UnknownFilter(prefixed.to_string())),
            },
        },
    }
}
