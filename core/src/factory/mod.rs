//! One factory per filter kind, keyed by canonical filter name.

mod fuzzy;
mod matches;
mod owner;
mod property;
mod self_filter;

pub use fuzzy::{FuzzyFilterFactory, FuzzyKind};
pub use matches::MatchesFactory;
pub use owner::{OwnedByFactory, ReferencedByFactory};
pub use property::{NotEqualFactory, PropertyFilterFactory, PropertyFilterKind};
pub use self_filter::{ExistsFactory, NotExistsFactory, SelfFilterFactory, SelfFilterKind};

use crate::builder::FilterTreeBuilder;
use crate::error::SchemaError;
use crate::filter::ObjectFilter;
use crate::names::FilterName;
use crate::path::ItemPath;
use crate::qname::QName;
use crate::schema::{ComplexTypeDefinition, ItemDefinition};
use prismql::ast::SubfilterOrValue;
use std::collections::HashMap;
use std::sync::Arc;

/// Everything a factory gets to see about one `path filterName[rule] value` clause
#[derive(Debug, Clone, Copy)]
pub struct ItemFilterRequest<'a> {
    pub filter_name: &'a QName,
    /// Context definition the path was resolved in
    pub parent: Option<&'a ItemDefinition>,
    pub type_def: Option<&'a ComplexTypeDefinition>,
    pub path: &'a ItemPath,
    /// Definition the path resolved to
    pub definition: &'a ItemDefinition,
    pub matching_rule: Option<&'a QName>,
    pub payload: Option<&'a SubfilterOrValue>,
}

impl<'a> ItemFilterRequest<'a> {
    pub fn name(&self) -> &'a str { &self.filter_name.local }

    pub fn require_payload(&self) -> Result<&'a SubfilterOrValue, SchemaError> { self.payload.ok_or_else(|| SchemaError::MissingValue(self.name().to_string())) }

    /// Self filters operate on the context item and only accept `.`
    pub fn require_self_path(&self) -> Result<(), SchemaError> {
        match self.path.is_empty() {
            true => Ok(()),
            false => Err(SchemaError::invalid(format!("Only '.' is supported for {}", self.name()))),
        }
    }
}

pub trait ItemFilterFactory: Send + Sync {
    fn create(&self, builder: &FilterTreeBuilder, request: &ItemFilterRequest<'_>) -> Result<ObjectFilter, SchemaError>;
}

impl<F> ItemFilterFactory for F
where F: Fn(&FilterTreeBuilder, &ItemFilterRequest<'_>) -> Result<ObjectFilter, SchemaError> + Send + Sync
{
    fn create(&self, builder: &FilterTreeBuilder, request: &ItemFilterRequest<'_>) -> Result<ObjectFilter, SchemaError> { self(builder, request) }
}

/// Factory registry. `not_factories` are only consulted for negated clauses.
#[derive(Clone, Default)]
pub struct FilterFactories {
    factories: HashMap<QName, Arc<dyn ItemFilterFactory>>,
    not_factories: HashMap<QName, Arc<dyn ItemFilterFactory>>,
}

impl FilterFactories {
    pub fn empty() -> Self { Self::default() }

    /// The built-in filter catalog
    pub fn standard() -> Self {
        use FilterName::*;
        Self::empty()
            .with_factory(Equal.qname(), PropertyFilterFactory::new(PropertyFilterKind::Equal))
            .with_factory(NotEqual.qname(), NotEqualFactory)
            .with_factory(AnyIn.qname(), PropertyFilterFactory::new(PropertyFilterKind::AnyIn))
            .with_factory(Greater.qname(), PropertyFilterFactory::new(PropertyFilterKind::Greater { or_equal: false }))
            .with_factory(GreaterOrEqual.qname(), PropertyFilterFactory::new(PropertyFilterKind::Greater { or_equal: true }))
            .with_factory(Less.qname(), PropertyFilterFactory::new(PropertyFilterKind::Less { or_equal: false }))
            .with_factory(LessOrEqual.qname(), PropertyFilterFactory::new(PropertyFilterKind::Less { or_equal: true }))
            .with_factory(Contains.qname(), PropertyFilterFactory::new(PropertyFilterKind::Substring { anchor_start: false, anchor_end: false }))
            .with_factory(StartsWith.qname(), PropertyFilterFactory::new(PropertyFilterKind::Substring { anchor_start: true, anchor_end: false }))
            .with_factory(EndsWith.qname(), PropertyFilterFactory::new(PropertyFilterKind::Substring { anchor_start: false, anchor_end: true }))
            .with_factory(Matches.qname(), MatchesFactory)
            .with_factory(Exists.qname(), ExistsFactory)
            .with_factory(FullText.qname(), SelfFilterFactory::new(SelfFilterKind::FullText))
            .with_factory(InOid.qname(), SelfFilterFactory::new(SelfFilterKind::InOid))
            .with_factory(OwnedByOid.qname(), SelfFilterFactory::new(SelfFilterKind::OwnedByOid))
            .with_factory(InOrg.qname(), SelfFilterFactory::new(SelfFilterKind::InOrg))
            .with_factory(IsRoot.qname(), SelfFilterFactory::new(SelfFilterKind::IsRoot))
            .with_factory(Type.qname(), SelfFilterFactory::new(SelfFilterKind::Type))
            .with_factory(ReferencedBy.qname(), ReferencedByFactory)
            .with_factory(OwnedBy.qname(), OwnedByFactory)
            .with_factory(Levenshtein.qname(), FuzzyFilterFactory::new(FuzzyKind::Levenshtein))
            .with_factory(Similarity.qname(), FuzzyFilterFactory::new(FuzzyKind::Similarity))
            .with_not_factory(Exists.qname(), NotExistsFactory)
    }

    pub fn with_factory(mut self, name: QName, factory: impl ItemFilterFactory + 'static) -> Self {
        self.factories.insert(name, Arc::new(factory));
        self
    }

    pub fn with_not_factory(mut self, name: QName, factory: impl ItemFilterFactory + 'static) -> Self {
        self.not_factories.insert(name, Arc::new(factory));
        self
    }

    pub fn get(&self, name: &QName) -> Option<&dyn ItemFilterFactory> { self.factories.get(name).map(|f| f.as_ref()) }

    pub fn get_not(&self, name: &QName) -> Option<&dyn ItemFilterFactory> { self.not_factories.get(name).map(|f| f.as_ref()) }
}

impl std::fmt::Debug for FilterFactories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.factories.keys().map(|name| name.local.as_str()).collect();
        names.sort_unstable();
        f.debug_struct("FilterFactories").field("factories", &names).field("not_factories", &self.not_factories.len()).finish()
    }
}
