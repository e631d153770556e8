use serde::{Deserialize, Serialize};
use std::fmt;

/// String with an original form and a normalized form used for case and whitespace insensitive matching
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PolyString {
    pub orig: String,
    pub norm: Option<String>,
}

impl PolyString {
    /// Only the original form is known; normalization is left to whoever evaluates the filter.
    pub fn new(orig: impl Into<String>) -> Self { Self { orig: orig.into(), norm: None } }

    pub fn with_norm(orig: impl Into<String>, norm: impl Into<String>) -> Self { Self { orig: orig.into(), norm: Some(norm.into()) } }

    /// Original form plus its default normalization
    pub fn normalized(orig: impl Into<String>) -> Self {
        let orig = orig.into();
        let norm = normalize(&orig);
        Self { orig, norm: Some(norm) }
    }
}

/// Lowercase, trimmed, inner whitespace collapsed to a single space
pub fn normalize(orig: &str) -> String { orig.split_whitespace().map(str::to_lowercase).collect::<Vec<_>>().join(" ") }

impl fmt::Display for PolyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.norm {
            Some(norm) => write!(f, "\"{}\"/\"{}\"", self.orig, norm),
            None => write!(f, "\"{}\"", self.orig),
        }
    }
}
