use crate::error::ConversionError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const QUERY_NS: &str = "http://prism.evolveum.com/xml/ns/public/query-3";
pub const MATCHING_RULE_NS: &str = "http://prism.evolveum.com/xml/ns/public/matching-rule-3";
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema";
pub const TYPES_NS: &str = "http://prism.evolveum.com/xml/ns/public/types-3";

/// Qualified name. An empty namespace means "not qualified".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QName {
    pub namespace: String,
    pub local: String,
}

impl QName {
    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Self { Self { namespace: namespace.into(), local: local.into() } }

    pub fn local(local: impl Into<String>) -> Self { Self { namespace: String::new(), local: local.into() } }

    pub fn is_qualified(&self) -> bool { !self.namespace.is_empty() }

    /// Loose equality: an unqualified name on either side only compares local parts.
    pub fn matches(&self, other: &QName) -> bool {
        self.local == other.local && (!self.is_qualified() || !other.is_qualified() || self.namespace == other.namespace)
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_qualified() {
            write!(f, "{{{}}}{}", self.namespace, self.local)
        } else {
            write!(f, "{}", self.local)
        }
    }
}

/// Prefix to namespace URI bindings. The empty prefix is the default namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamespaceContext {
    prefixes: BTreeMap<String, String>,
}

impl NamespaceContext {
    pub fn new() -> Self { Self::default() }

    pub fn with(mut self, prefix: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.prefixes.insert(prefix.into(), namespace.into());
        self
    }

    pub fn namespace_for(&self, prefix: &str) -> Option<&str> { self.prefixes.get(prefix).map(String::as_str) }

    pub fn default_namespace(&self) -> Option<&str> { self.namespace_for("") }

    /// Qualify `local` with the namespace bound to `prefix`, or with the default namespace when there is no prefix.
    pub fn qualify(&self, prefix: Option<&str>, local: &str) -> Result<QName, ConversionError> {
        match prefix {
            Some(prefix) => match self.namespace_for(prefix) {
                Some(namespace) => Ok(QName::new(namespace, local)),
                None => Err(ConversionError::UnknownPrefix(prefix.to_string())),
            },
            None => Ok(QName::new(self.default_namespace().unwrap_or_default(), local)),
        }
    }

    /// Accepts `prefix:local`, `{namespace}local` and bare `local`.
    pub fn parse_qname(&self, text: &str) -> Result<QName, ConversionError> {
        let text = text.trim();
        if let Some(rest) = text.strip_prefix('{') {
            return match rest.split_once('}') {
                Some((namespace, local)) if !local.is_empty() => Ok(QName::new(namespace, local)),
                _ => Err(ConversionError::InvalidFormat { target_type: crate::value::ValueType::QName }),
            };
        }
        if text.is_empty() {
            return Err(ConversionError::InvalidFormat { target_type: crate::value::ValueType::QName });
        }
        match text.split_once(':') {
            Some((prefix, local)) => self.qualify(Some(prefix), local),
            None => self.qualify(None, text),
        }
    }
}
