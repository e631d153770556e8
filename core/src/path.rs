use crate::error::ConversionError;
use crate::qname::{NamespaceContext, QName};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathSegment {
    Name(QName),
    /// `..`
    Parent,
    /// `@`
    Dereference,
    /// `#`
    Identifier,
    /// `$name`
    Variable(QName),
}

/// Resolved item path. `.` parses to the empty path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemPath {
    segments: Vec<PathSegment>,
}

impl ItemPath {
    pub fn empty() -> Self { Self::default() }

    pub fn from_segments(segments: Vec<PathSegment>) -> Self { Self { segments } }

    pub fn name(name: QName) -> Self { Self { segments: vec![PathSegment::Name(name)] } }

    pub fn parse(text: &str, namespaces: &NamespaceContext) -> Result<Self, ConversionError> {
        let text = text.trim();
        if text.is_empty() || text == "." {
            return Ok(Self::empty());
        }
        let mut segments = Vec::new();
        for part in text.split('/') {
            match part {
                ".." => segments.push(PathSegment::Parent),
                "@" => segments.push(PathSegment::Dereference),
                _ if part.starts_with('#') => segments.push(PathSegment::Identifier),
                _ => {
                    if let Some(name) = part.strip_prefix('@') {
                        segments.push(PathSegment::Dereference);
                        segments.push(PathSegment::Name(namespaces.parse_qname(name)?));
                    } else if let Some(name) = part.strip_prefix('$') {
                        segments.push(PathSegment::Variable(QName::local(name)));
                    } else if part.is_empty() {
                        return Err(ConversionError::InvalidFormat { target_type: crate::value::ValueType::ItemPath });
                    } else {
                        segments.push(PathSegment::Name(namespaces.parse_qname(part)?));
                    }
                }
            }
        }
        Ok(Self { segments })
    }

    pub fn is_empty(&self) -> bool { self.segments.is_empty() }

    pub fn segments(&self) -> &[PathSegment] { &self.segments }

    pub fn first(&self) -> Option<&PathSegment> { self.segments.first() }

    /// Everything after the first segment
    pub fn rest(&self) -> ItemPath { ItemPath { segments: self.segments.iter().skip(1).cloned().collect() } }

    pub fn first_name(&self) -> Option<&QName> {
        match self.first() {
            Some(PathSegment::Name(name)) => Some(name),
            _ => None,
        }
    }

    pub fn is_variable(&self) -> bool { matches!(self.first(), Some(PathSegment::Variable(_))) }

    pub fn append(&self, other: &ItemPath) -> ItemPath {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        ItemPath { segments }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Name(name) => write!(f, "{}", name.local),
            PathSegment::Parent => write!(f, ".."),
            PathSegment::Dereference => write!(f, "@"),
            PathSegment::Identifier => write!(f, "#"),
            PathSegment::Variable(name) => write!(f, "${}", name.local),
        }
    }
}

impl fmt::Display for ItemPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, ".");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
