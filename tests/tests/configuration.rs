use anyhow::Result;
use common::*;
use prismql_core::error::ConversionError;
use prismql_core::qname::QUERY_NS;
use prismql_core::schema::PropertyDefinition;
use prismql_core::value::{PrimitiveNode, ValueParser};
use prismql_core::{
    FilterFactories, FilterTreeBuilder, ItemFilterRequest, NamespaceContext, ObjectFilter, QName, QueryError, RuntimeType, SchemaError, Value,
};
use std::sync::Arc;

struct User;

impl RuntimeType for User {
    fn type_name() -> QName { common("UserType") }
}

fn is_manager(_builder: &FilterTreeBuilder, request: &ItemFilterRequest<'_>) -> Result<ObjectFilter, SchemaError> {
    request.require_self_path()?;
    Ok(ObjectFilter::IsRoot)
}

/// Accepts any text for enumerated properties, upper-cased
struct LenientEnums;

impl ValueParser for LenientEnums {
    fn parse_value(&self, node: &PrimitiveNode, definition: &PropertyDefinition, _namespaces: &NamespaceContext) -> Result<Value, ConversionError> {
        match definition.runtime_type {
            None => Ok(Value::Enum(node.text.to_uppercase())),
            Some(_) => Err(ConversionError::NoDefinition(definition.type_name.clone())),
        }
    }
}

#[test]
fn test_parse_for_runtime_type() -> Result<()> {
    let filter = builder().parse_filter_for::<User>(r#"givenName = "Jack""#)?;
    assert_eq!(filter.to_string(), r#"EQUAL(givenName, "Jack")"#);
    Ok(())
}

#[test]
fn test_custom_factory() -> Result<()> {
    let factories = FilterFactories::standard().with_factory(QName::new(QUERY_NS, "isManager"), is_manager);
    let builder = builder().with_factories(factories);
    assert_eq!(builder.parse_filter(&user(), ". isManager")?.to_string(), "ORG(ROOT)");
    assert_eq!(builder.parse_filter(&user(), ". not isManager")?.to_string(), "NOT(ORG(ROOT))");
    Ok(())
}

#[test]
fn test_empty_catalog_knows_nothing() {
    let builder = builder().with_factories(FilterFactories::empty());
    match builder.parse_filter(&user(), r#"givenName = "Jack""#) {
        Err(QueryError::Schema(SchemaError::UnknownFilter(name))) => assert_eq!(name, "="),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_custom_value_parser() -> Result<()> {
    let builder = builder().with_value_parser(Arc::new(LenientEnums));
    let ObjectFilter::Equal(equal) = builder.parse_filter(&user(), r#"activation/administrativeStatus = "sleeping""#)? else { panic!("expected equal") };
    assert_eq!(equal.values(), &[Value::Enum("SLEEPING".into())]);
    Ok(())
}

#[test]
fn test_namespaces_from_json() -> Result<()> {
    let namespaces: NamespaceContext = serde_json::from_value(serde_json::json!({ "": COMMON_NS, "org": ORG_NS }))?;
    let builder = FilterTreeBuilder::new(schema()).with_namespaces(namespaces);
    let ObjectFilter::Type(type_filter) = builder.parse_filter(&user(), ". type UserType")? else { panic!("expected type") };
    assert_eq!(type_filter.type_name, common("UserType"));
    Ok(())
}
