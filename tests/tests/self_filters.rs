use anyhow::Result;
use common::*;
use prismql_core::filter::OrgScope;
use prismql_core::{ObjectFilter, SchemaError};

#[test]
fn test_full_text() -> Result<()> {
    assert_eq!(parse_user(r#". fullText "john""#)?.to_string(), "FULL_TEXT(john)");
    assert_eq!(parse_user(r#". fullText ("john", "doe")"#)?.to_string(), "FULL_TEXT(john, doe)");
    assert_eq!(schema_error(". fullText givenName"), SchemaError::invalid("Literal value required for filter fullText, got path givenName"));
    Ok(())
}

#[test]
fn test_in_oid() -> Result<()> {
    assert_eq!(parse_user(r#". inOid ("1", "2")"#)?.to_string(), "IN_OID(1, 2)");
    assert_eq!(parse_user(r#". ownedByOid "1""#)?.to_string(), "OWNED_BY_OID(1)");
    assert_eq!(schema_error(". inOid"), SchemaError::MissingValue("inOid".into()));
    Ok(())
}

#[test]
fn test_in_org_scope() -> Result<()> {
    let ObjectFilter::InOrg(org) = parse_user(r#". inOrg "123""#)? else { panic!("expected org") };
    assert_eq!(org.base_oid, "123");
    assert_eq!(org.scope, OrgScope::Subtree);

    let ObjectFilter::InOrg(org) = parse_user(r#". inOrg[ONE_LEVEL] "123""#)? else { panic!("expected org") };
    assert_eq!(org.scope, OrgScope::OneLevel);

    let ObjectFilter::InOrg(org) = parse_user(r#". inOrg[ANCESTORS] "123""#)? else { panic!("expected org") };
    assert_eq!(org.scope, OrgScope::Ancestors);

    assert_eq!(schema_error(r#". inOrg[SIDEWAYS] "123""#), SchemaError::invalid("Unknown org scope SIDEWAYS"));
    assert_eq!(schema_error(r#". inOrg ("1", "2")"#), SchemaError::MultipleValuesNotSupported("inOrg".into()));
    Ok(())
}

#[test]
fn test_is_root() -> Result<()> {
    assert_eq!(parse_user(". isRoot")?.to_string(), "ORG(ROOT)");
    assert_eq!(parse_user(". not isRoot")?.to_string(), "NOT(ORG(ROOT))");
    Ok(())
}

#[test]
fn test_type_needs_single_name() -> Result<()> {
    let ObjectFilter::Type(type_filter) = parse_user(". type c:UserType")? else { panic!("expected type") };
    assert_eq!(type_filter.type_name, common("UserType"));
    assert_eq!(*type_filter.filter, ObjectFilter::All);

    assert_eq!(schema_error(". type (UserType, RoleType)"), SchemaError::MultipleValuesNotSupported("type".into()));
    assert_eq!(schema_error(". type (name exists)"), SchemaError::invalid("Value required for filter type"));
    Ok(())
}

#[test]
fn test_self_filters_reject_paths() {
    assert_eq!(schema_error(r#"givenName inOid "1""#), SchemaError::invalid("Only '.' is supported for inOid"));
    assert_eq!(schema_error("assignment isRoot"), SchemaError::invalid("Only '.' is supported for isRoot"));
}

#[test]
fn test_exists() -> Result<()> {
    let ObjectFilter::Exists(exists) = parse_user("activation/validFrom exists")? else { panic!("expected exists") };
    assert_eq!(exists.path.to_string(), "activation/validFrom");
    assert_eq!(exists.parent, Some(user()));
    assert_eq!(exists.filter, None);
    Ok(())
}
