use anyhow::Result;
use common::*;
use prismql_core::schema::{object_reference_type, SchemaRegistry};
use prismql_core::{ItemDefinition, ObjectFilter, QName, QueryError, SchemaError};

const ORG_MANAGER: &str = "manager";

fn role() -> ItemDefinition { schema().find_object_definition_by_type(&common("RoleType")).unwrap() }

fn parse_role(query: &str) -> Result<ObjectFilter, QueryError> { builder().parse_filter(&role(), query) }

fn role_error(query: &str) -> SchemaError {
    match parse_role(query) {
        Err(QueryError::Schema(err)) => err,
        other => panic!("expected schema error for {:?}, got {:?}", query, other),
    }
}

#[test]
fn test_referenced_by() -> Result<()> {
    let filter = parse_role(r#". referencedBy (@type = UserType and @path = assignment/targetRef and name = "jack")"#)?;
    assert_eq!(filter.to_string(), r#"REFERENCED_BY(UserType, assignment/targetRef, EQUAL(name, "jack"/"jack"))"#);

    let ObjectFilter::ReferencedBy(by) = filter else { panic!("expected referencedBy") };
    assert_eq!(by.type_name, QName::local("UserType"));
    assert_eq!(by.relation, None);
    Ok(())
}

#[test]
fn test_referenced_by_relation_and_no_filter() -> Result<()> {
    let ObjectFilter::ReferencedBy(by) = parse_role(". referencedBy (@path = assignment/targetRef and @relation = org:manager and @type = c:UserType)")? else {
        panic!("expected referencedBy")
    };
    assert_eq!(by.type_name, common("UserType"));
    assert_eq!(by.relation, Some(QName::new(ORG_NS, ORG_MANAGER)));
    assert_eq!(by.filter, None);
    Ok(())
}

#[test]
fn test_referenced_by_without_path() -> Result<()> {
    let filter = parse_role(r#". referencedBy (@type = UserType and name = "jack")"#)?;
    assert_eq!(filter.to_string(), r#"REFERENCED_BY(UserType, EQUAL(name, "jack"/"jack"))"#);

    let ObjectFilter::ReferencedBy(by) = filter else { panic!("expected referencedBy") };
    assert_eq!(by.path, None);
    Ok(())
}

#[test]
fn test_referenced_by_needs_type() {
    assert_eq!(role_error(". referencedBy (@path = assignment/targetRef)"), SchemaError::invalid("referencedBy filter requires @type clause"));
    assert_eq!(role_error(". referencedBy (@type = NopeType and @path = x)"), SchemaError::UnknownType(QName::local("NopeType")));
    assert_eq!(role_error(r#". referencedBy "x""#), SchemaError::invalid("Filter referencedBy requires subfilter"));
}

#[test]
fn test_duplicate_pseudo_fields() {
    assert_eq!(
        role_error(". referencedBy (@type = UserType and @path = assignment/targetRef and @type = RoleType)"),
        SchemaError::DuplicateClause("@type".into())
    );
}

#[test]
fn test_owned_by() -> Result<()> {
    let builder = builder();
    let filter = builder.parse_filter_for_type(&common("AssignmentType"), r#". ownedBy (@type = UserType and @path = assignment and givenName = "Jack")"#)?;
    assert_eq!(filter.to_string(), r#"OWNED_BY(UserType, assignment, EQUAL(givenName, "Jack"))"#);

    let filter = builder.parse_filter_for_type(&common("AssignmentType"), ". ownedBy (@type = UserType)")?;
    let ObjectFilter::OwnedBy(by) = filter else { panic!("expected ownedBy") };
    assert_eq!(by.path, None);
    assert_eq!(by.filter, None);
    Ok(())
}

#[test]
fn test_owned_by_narrows_sibling_clauses() -> Result<()> {
    let builder = builder();
    let query = ". ownedBy (@type = UserType and @path = assignment) and order > 1";
    let filter = builder.parse_filter_for_type(&common("ObjectType"), query)?;
    assert_eq!(filter.to_string(), "AND(GREATER(order, 1), OWNED_BY(UserType, assignment))");

    // without the owner clause `order` is not an ObjectType item
    let err = builder.parse_filter_for_type(&common("ObjectType"), "order > 1").unwrap_err();
    assert!(matches!(err.schema_error(), Some(SchemaError::MissingDefinition { path, .. }) if path == "order"));
    Ok(())
}

#[test]
fn test_owned_by_reference_search() -> Result<()> {
    let builder = builder();
    let query = r#". ownedBy (@type = UserType and @path = assignment/targetRef) and . matches (oid = "x" and targetType = RoleType)"#;
    let filter = builder.parse_filter_for_type(&object_reference_type(), query)?;
    assert_eq!(filter.to_string(), "AND(REF(., [ref(oid=x, type=RoleType)]), OWNED_BY(UserType, assignment/targetRef))");

    // the owned reference supplies the declared target type for a nested target filter
    let query = r#". ownedBy (@type = UserType and @path = assignment/targetRef) and . matches (@ matches (riskLevel = "high"))"#;
    let filter = builder.parse_filter_for_type(&object_reference_type(), query)?;
    assert_eq!(filter.to_string(), r#"AND(REF(., [ref(oid=*)], EQUAL(riskLevel, "high")), OWNED_BY(UserType, assignment/targetRef))"#);
    Ok(())
}

#[test]
fn test_type_wraps_owned_by() -> Result<()> {
    let query = r#". type c:RoleType and . ownedBy (@type = UserType and @path = assignment/targetRef) and . matches (oid = "x" and targetType = RoleType)"#;
    let filter = builder().parse_filter_for_type(&object_reference_type(), query)?;
    assert_eq!(filter.to_string(), "TYPE(RoleType, AND(REF(., [ref(oid=x, type=RoleType)]), OWNED_BY(UserType, assignment/targetRef)))");

    let ObjectFilter::Type(type_filter) = filter else { panic!("expected type") };
    assert!(matches!(type_filter.filter.as_ref(), ObjectFilter::And(members) if members.len() == 2));
    Ok(())
}

#[test]
fn test_owned_by_unknown_path() {
    let err = builder().parse_filter_for_type(&common("ObjectType"), ". ownedBy (@type = UserType and @path = nothing) and order > 1").unwrap_err();
    assert!(matches!(err.schema_error(), Some(SchemaError::MissingDefinition { path, .. }) if path == "nothing"));
}
