use anyhow::Result;
use common::*;
use prismql_core::schema::object_reference_type;
use prismql_core::{QueryError, SchemaError};

#[test]
fn test_unknown_filter_name() {
    assert_eq!(schema_error(r#"givenName frobnicate "x""#), SchemaError::UnknownFilter("frobnicate".into()));
    assert_eq!(schema_error(r#"givenName nope:equal "x""#), SchemaError::UnknownFilter("nope:equal".into()));
    // reported even when the path is unknown as well
    assert_eq!(schema_error(r#"nothing frobnicate "x""#), SchemaError::UnknownFilter("frobnicate".into()));
}

#[test]
fn test_missing_definition() {
    assert_eq!(
        schema_error(r#"nothing = "x""#),
        SchemaError::MissingDefinition { path: "nothing".into(), type_name: format!("{{{}}}UserType", COMMON_NS) }
    );
    assert!(matches!(schema_error("activation/nothing exists"), SchemaError::MissingDefinition { path, .. } if path == "activation/nothing"));
}

#[test]
fn test_parse_errors_are_reported_as_such() {
    assert!(matches!(parse_user("givenName = "), Err(QueryError::Parse(_))));
    assert!(matches!(parse_user(r#"givenName = "x" and"#), Err(QueryError::Parse(_))));
}

#[test]
fn test_unknown_runtime_type() {
    let err = builder().parse_filter_for_type(&common("NopeType"), r#"name = "x""#).unwrap_err();
    assert!(matches!(&err, QueryError::IllegalArgument(message) if *message == format!("Couldn't find definition for type {{{}}}NopeType", COMMON_NS)));
    assert_eq!(err.schema_error(), None);
}

#[test]
fn test_reference_root() -> Result<()> {
    let filter = builder().parse_filter_for_type(&object_reference_type(), r#". matches (oid = "1" and relation = org:manager)"#)?;
    assert_eq!(filter.to_string(), format!("REF(., [ref(oid=1, relation={{{}}}manager)])", ORG_NS));
    Ok(())
}

#[test]
fn test_error_messages() {
    assert_eq!(SchemaError::UnknownFilter("frobnicate".into()).to_string(), "Unknown filter frobnicate");
    let err = QueryError::from(SchemaError::NotAProperty("assignment".into()));
    assert_eq!(err.to_string(), "invalid filter: Definition of assignment is not property");
}
