//! Turns a parsed filter into an [`ObjectFilter`] against a schema.
//!
//! Parsing is a recursive descent over the [`FilterNode`] tree. The only state threaded through
//! it is the [`FilterContext`] (the item definition and complex type paths are resolved against),
//! which narrows as the descent enters containers, `type` clauses and `ownedBy` clauses.

mod clauses;
mod matches;

use crate::error::{QueryError, SchemaError};
use crate::expression::{ExpressionParser, ExpressionWrapper, CONST_LANGUAGE};
use crate::factory::{FilterFactories, ItemFilterRequest};
use crate::filter::{ObjectFilter, OwnedByFilter, TypeFilter};
use crate::literal::LiteralConverter;
use crate::names::{self, FilterName};
use crate::path::ItemPath;
use crate::qname::{NamespaceContext, QName, MATCHING_RULE_NS};
use crate::schema::{ComplexTypeDefinition, DefinitionKind, ItemDefinition, SchemaRegistry};
use crate::value::{SchemaValueParser, ValueParser};
use prismql::ast::{Expression, FilterNode, ItemFilterNode, PathExpr, PrefixedName};
use std::sync::Arc;
use tracing::{debug, trace};

/// Types whose filters can be parsed without looking up a definition by hand
pub trait RuntimeType {
    fn type_name() -> QName;
}

/// Definition and complex type that item paths are resolved against
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterContext<'a> {
    pub definition: Option<&'a ItemDefinition>,
    pub type_def: Option<&'a Arc<ComplexTypeDefinition>>,
}

impl<'a> FilterContext<'a> {
    pub fn new(definition: Option<&'a ItemDefinition>, type_def: Option<&'a Arc<ComplexTypeDefinition>>) -> Self { Self { definition, type_def } }

    pub fn of(definition: &'a ItemDefinition) -> Self { Self::new(Some(definition), definition.complex_type()) }

    fn type_name(&self) -> String {
        match (self.type_def, self.definition) {
            (Some(type_def), _) => type_def.type_name.to_string(),
            (None, Some(definition)) => definition.type_name().to_string(),
            (None, None) => "unknown".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Junction {
    And,
    Or,
}

#[derive(Clone)]
pub struct FilterTreeBuilder {
    schema: Arc<dyn SchemaRegistry>,
    namespaces: NamespaceContext,
    expression_parser: Option<Arc<dyn ExpressionParser>>,
    value_parser: Arc<dyn ValueParser>,
    factories: FilterFactories,
}

impl FilterTreeBuilder {
    pub fn new(schema: Arc<dyn SchemaRegistry>) -> Self {
        let value_parser = Arc::new(SchemaValueParser::new(schema.clone()));
        Self { schema, namespaces: NamespaceContext::new(), expression_parser: None, value_parser, factories: FilterFactories::standard() }
    }

    pub fn with_namespaces(mut self, namespaces: NamespaceContext) -> Self {
        self.namespaces = namespaces;
        self
    }

    pub fn with_expression_parser(mut self, parser: Arc<dyn ExpressionParser>) -> Self {
        self.expression_parser = Some(parser);
        self
    }

    pub fn with_value_parser(mut self, parser: Arc<dyn ValueParser>) -> Self {
        self.value_parser = parser;
        self
    }

    pub fn with_factories(mut self, factories: FilterFactories) -> Self {
        self.factories = factories;
        self
    }

    pub fn schema(&self) -> &dyn SchemaRegistry { self.schema.as_ref() }

    pub fn namespaces(&self) -> &NamespaceContext { &self.namespaces }

    pub fn literals(&self) -> LiteralConverter<'_> { LiteralConverter::new(&self.namespaces, self.value_parser.as_ref()) }

    /// Parse `query` against an item definition the caller already has.
    pub fn parse_filter(&self, definition: &ItemDefinition, query: &str) -> Result<ObjectFilter, QueryError> {
        debug!(definition = %definition.item_name(), type_name = %definition.type_name(), query, "parsing filter");
        let node = prismql::parse_filter(query)?;
        Ok(self.build(definition, &node)?)
    }

    /// Parse `query` against the definition registered for `type_name`. Reference types
    /// are queried through a synthetic `.` reference definition.
    pub fn parse_filter_for_type(&self, type_name: &QName, query: &str) -> Result<ObjectFilter, QueryError> {
        let definition = if self.schema.is_reference_type(type_name) {
            ItemDefinition::reference(QName::local("."), None)
        } else {
            self.schema.find_item_definition_by_type(type_name).ok_or_else(|| QueryError::IllegalArgument(format!("Couldn't find definition for type {}", type_name)))?
        };
        self.parse_filter(&definition, query)
    }

    pub fn parse_filter_for<T: RuntimeType>(&self, query: &str) -> Result<ObjectFilter, QueryError> { self.parse_filter_for_type(&T::type_name(), query) }

    /// Build an already parsed filter
    pub fn build(&self, definition: &ItemDefinition, node: &FilterNode) -> Result<ObjectFilter, SchemaError> { self.parse_node(FilterContext::of(definition), node) }

    pub(crate) fn parse_node(&self, context: FilterContext<'_>, node: &FilterNode) -> Result<ObjectFilter, SchemaError> {
        match node {
            FilterNode::And { .. } => self.and_filter(context, self.and_clauses(node)),
            FilterNode::Or { .. } => self.or_filter(context, node),
            FilterNode::Generic(item) => self.item_filter(context, item, item.negated),
            FilterNode::Sub(inner) => self.parse_node(context, inner),
            FilterNode::Not(inner) => self.not_filter(context, inner),
        }
    }

    /// `not (x)` over a single item filter flips its negation, so `not (a exists)` and
    /// `a not exists` build the same leaf.
    fn not_filter(&self, context: FilterContext<'_>, inner: &FilterNode) -> Result<ObjectFilter, SchemaError> {
        match unwrap_sub(inner) {
            FilterNode::Generic(item) => self.item_filter(context, item, !item.negated),
            _ => Ok(ObjectFilter::not(self.parse_node(context, inner)?)),
        }
    }

    /// Members of the conjunction rooted at `node`, parenthesized conjunctions included
    pub(crate) fn and_clauses<'n>(&self, node: &'n FilterNode) -> Vec<&'n FilterNode> {
        let mut clauses = Vec::new();
        expand(node, Junction::And, &mut clauses);
        clauses
    }

    pub(crate) fn and_filter(&self, context: FilterContext<'_>, mut clauses: Vec<&FilterNode>) -> Result<ObjectFilter, SchemaError> {
        let type_clause = self.take_first(&mut clauses, FilterName::Type);
        let owned_by_clause = self.take_first(&mut clauses, FilterName::OwnedBy);
        let type_filter = type_clause.map(|clause| self.item_filter(context, clause, false)).transpose()?;
        let owned_by = owned_by_clause.map(|clause| self.item_filter(context, clause, false)).transpose()?;

        let mut owned_definition = None;
        if let Some(ObjectFilter::OwnedBy(OwnedByFilter { type_name, path: Some(path), .. })) = &owned_by {
            let owner = self.schema.find_complex_type_definition_by_type(type_name).ok_or_else(|| SchemaError::UnknownType(type_name.clone()))?;
            let definition = owner
                .find_item_definition(path, DefinitionKind::Any)
                .ok_or_else(|| SchemaError::MissingDefinition { path: path.to_string(), type_name: type_name.to_string() })?;
            debug!(owner = %type_name, %path, "narrowing context to owned item");
            owned_definition = Some(definition);
        }

        let mut narrowed_type = None;
        if let Some(ObjectFilter::Type(type_filter)) = &type_filter {
            let type_def = self.schema.find_complex_type_definition_by_type(&type_filter.type_name).ok_or_else(|| SchemaError::UnknownType(type_filter.type_name.clone()))?;
            debug!(type_name = %type_filter.type_name, "narrowing context to type");
            narrowed_type = Some(type_def);
        }

        let definition = owned_definition.as_ref().or(context.definition);
        let type_def = match (&narrowed_type, &owned_definition) {
            (Some(type_def), _) => Some(type_def),
            (None, Some(owned)) => owned.complex_type(),
            (None, None) => context.type_def,
        };
        let narrowed = FilterContext::new(definition, type_def);

        let mut members = clauses.into_iter().map(|clause| self.parse_node(narrowed, clause)).collect::<Result<Vec<_>, _>>()?;
        members.extend(owned_by);
        let and = ObjectFilter::and_optimized(members);

        Ok(match type_filter {
            Some(ObjectFilter::Type(type_filter)) => ObjectFilter::Type(TypeFilter::new(type_filter.type_name, and)),
            Some(other) => ObjectFilter::and_optimized([other, and]),
            None => and,
        })
    }

    fn or_filter(&self, context: FilterContext<'_>, node: &FilterNode) -> Result<ObjectFilter, SchemaError> {
        let mut clauses = Vec::new();
        expand(node, Junction::Or, &mut clauses);
        let members = clauses.into_iter().map(|clause| self.parse_node(context, clause)).collect::<Result<Vec<_>, _>>()?;
        Ok(ObjectFilter::or_optimized(members))
    }

    fn item_filter(&self, context: FilterContext<'_>, item: &ItemFilterNode, negated: bool) -> Result<ObjectFilter, SchemaError> {
        let filter_name = names::resolve(&item.filter_name, &self.namespaces)?;
        let matching_rule = item.matching_rule.as_ref().map(|rule| self.matching_rule(rule)).transpose()?;
        let path = self.item_path(&item.path)?;
        let factory = self.factories.get(&filter_name).ok_or_else(|| SchemaError::UnknownFilter(item.filter_name.to_string()))?;
        let definition = self.context_item(context, &path)?;
        trace!(filter = %filter_name.local, %path, negated, "building item filter");

        let request = ItemFilterRequest {
            filter_name: &filter_name,
            parent: context.definition,
            type_def: context.type_def.map(Arc::as_ref),
            path: &path,
            definition: &definition,
            matching_rule: matching_rule.as_ref(),
            payload: item.payload.as_ref(),
        };
        if !negated {
            return factory.create(self, &request);
        }
        match self.factories.get_not(&filter_name) {
            Some(not_factory) => not_factory.create(self, &request),
            None => Ok(ObjectFilter::not(factory.create(self, &request)?)),
        }
    }

    /// Definition `path` denotes in `context`. Inside owner clauses there is only a type,
    /// so `.` stands for a container of that type.
    fn context_item(&self, context: FilterContext<'_>, path: &ItemPath) -> Result<ItemDefinition, SchemaError> {
        if let (true, None, Some(type_def)) = (path.is_empty(), context.definition, context.type_def) {
            return Ok(ItemDefinition::container(QName::local("."), type_def.clone()));
        }
        self.find_definition(context.definition, context.type_def.map(Arc::as_ref), path, DefinitionKind::Any)?
            .ok_or_else(|| SchemaError::MissingDefinition { path: path.to_string(), type_name: context.type_name() })
    }

    pub(crate) fn find_definition(&self, definition: Option<&ItemDefinition>, type_def: Option<&ComplexTypeDefinition>, path: &ItemPath, kind: DefinitionKind) -> Result<Option<ItemDefinition>, SchemaError> {
        if let Some(definition) = definition {
            if path.is_empty() && definition.is_kind(kind) {
                return Ok(Some(definition.clone()));
            }
        }
        match (definition, type_def) {
            (Some(reference @ ItemDefinition::Reference(_)), _) => Ok(reference.find_item_definition(path, kind)),
            (Some(ItemDefinition::Container(_)) | None, Some(type_def)) => Ok(type_def.find_item_definition(path, kind)),
            (Some(container @ ItemDefinition::Container(_)), None) => Ok(container.find_item_definition(path, kind)),
            _ => Err(SchemaError::UnsupportedContext),
        }
    }

    fn matching_rule(&self, rule: &PrefixedName) -> Result<QName, SchemaError> {
        match &rule.prefix {
            None => Ok(QName::new(MATCHING_RULE_NS, rule.local.as_str())),
            Some(prefix) => self.namespaces.qualify(Some(prefix), &rule.local).map_err(|e| SchemaError::conversion(rule.to_string(), e)),
        }
    }

    pub(crate) fn item_path(&self, path: &PathExpr) -> Result<ItemPath, SchemaError> {
        ItemPath::parse(&path.text, &self.namespaces).map_err(|e| SchemaError::conversion(path.text.clone(), e))
    }

    fn expression_parser(&self) -> Result<&dyn ExpressionParser, SchemaError> {
        self.expression_parser.as_deref().ok_or_else(|| SchemaError::UnsupportedFeature("Expressions are not supported".to_string()))
    }

    pub(crate) fn parse_expression(&self, expression: &Expression) -> Result<ExpressionWrapper, SchemaError> {
        let parser = self.expression_parser()?;
        match expression {
            Expression::Script { language, code } => parser.parse_script(&self.namespaces, language.as_deref(), code),
            Expression::Constant(name) => parser.parse_script(&self.namespaces, Some(CONST_LANGUAGE), name),
        }
    }

    pub(crate) fn parse_path_expression(&self, path: &ItemPath) -> Result<ExpressionWrapper, SchemaError> { self.expression_parser()?.parse_path(path) }
}

impl std::fmt::Debug for FilterTreeBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterTreeBuilder")
            .field("namespaces", &self.namespaces)
            .field("expressions", &self.expression_parser.is_some())
            .field("factories", &self.factories)
            .finish()
    }
}

fn unwrap_sub(mut node: &FilterNode) -> &FilterNode {
    while let FilterNode::Sub(inner) = node {
        node = inner;
    }
    node
}

/// Flatten `junction` through any depth of nesting and parentheses, keeping source order
fn expand<'n>(node: &'n FilterNode, junction: Junction, out: &mut Vec<&'n FilterNode>) {
    let node = unwrap_sub(node);
    match (junction, node) {
        (Junction::And, FilterNode::And { left, right }) | (Junction::Or, FilterNode::Or { left, right }) => {
            expand(left, junction, out);
            expand(right, junction, out);
        }
        _ => out.push(node),
    }
}
