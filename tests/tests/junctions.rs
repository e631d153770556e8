use anyhow::Result;
use common::*;
use prismql_core::ObjectFilter;

#[test]
fn test_single_filter_is_not_wrapped() -> Result<()> {
    assert_eq!(parse_user(r#"(givenName = "a")"#)?.to_string(), r#"EQUAL(givenName, "a")"#);
    assert_eq!(parse_user(r#"((givenName = "a"))"#)?.to_string(), r#"EQUAL(givenName, "a")"#);
    assert_eq!(ObjectFilter::and_optimized(Vec::new()), ObjectFilter::All);
    assert_eq!(ObjectFilter::or_optimized(Vec::new()), ObjectFilter::None);
    Ok(())
}

#[test]
fn test_nested_and_is_flat() -> Result<()> {
    let filter = parse_user(r#"givenName = "a" and (familyName = "b" and (age = 3))"#)?;
    assert_eq!(filter.to_string(), r#"AND(EQUAL(givenName, "a"), EQUAL(familyName, "b"), EQUAL(age, 3))"#);

    let filter = parse_user(r#"((givenName = "a" and familyName = "b")) and age = 3"#)?;
    let ObjectFilter::And(members) = filter else { panic!("expected and") };
    assert_eq!(members.len(), 3);
    Ok(())
}

#[test]
fn test_nested_or_is_flat() -> Result<()> {
    let filter = parse_user(r#"givenName = "a" or (familyName = "b" or age = 3)"#)?;
    assert_eq!(filter.to_string(), r#"OR(EQUAL(givenName, "a"), EQUAL(familyName, "b"), EQUAL(age, 3))"#);
    Ok(())
}

#[test]
fn test_mixed_junctions_keep_precedence() -> Result<()> {
    let filter = parse_user(r#"givenName = "a" and familyName = "b" or age = 3"#)?;
    assert_eq!(filter.to_string(), r#"OR(AND(EQUAL(givenName, "a"), EQUAL(familyName, "b")), EQUAL(age, 3))"#);

    let filter = parse_user(r#"givenName = "a" and (familyName = "b" or age = 3)"#)?;
    assert_eq!(filter.to_string(), r#"AND(EQUAL(givenName, "a"), OR(EQUAL(familyName, "b"), EQUAL(age, 3)))"#);
    Ok(())
}

#[test]
fn test_duplicates_are_dropped() -> Result<()> {
    assert_eq!(parse_user(r#"givenName = "a" and givenName = "a""#)?.to_string(), r#"EQUAL(givenName, "a")"#);
    Ok(())
}

#[test]
fn test_type_clause_wraps_the_rest() -> Result<()> {
    let builder = builder();
    let filter = builder.parse_filter_for_type(&common("ObjectType"), r#". type UserType and givenName = "x""#)?;
    assert_eq!(filter.to_string(), r#"TYPE(UserType, EQUAL(givenName, "x"))"#);

    let filter = builder.parse_filter_for_type(&common("ObjectType"), r#"name = "x" and . type c:UserType and givenName = "y""#)?;
    let ObjectFilter::Type(type_filter) = &filter else { panic!("expected type") };
    assert_eq!(type_filter.type_name, common("UserType"));
    assert_eq!(type_filter.filter.to_string(), r#"AND(EQUAL(name, "x"/"x"), EQUAL(givenName, "y"))"#);
    Ok(())
}

#[test]
fn test_lone_type_clause_matches_all() -> Result<()> {
    let filter = builder().parse_filter_for_type(&common("ObjectType"), ". type UserType")?;
    assert_eq!(filter.to_string(), "TYPE(UserType, ALL)");
    Ok(())
}

#[test]
fn test_type_clause_must_name_a_known_type() {
    let err = builder().parse_filter_for_type(&common("ObjectType"), r#". type NopeType and name = "x""#).unwrap_err();
    assert_eq!(err.schema_error(), Some(&prismql_core::SchemaError::UnknownType(prismql_core::QName::local("NopeType"))));
}

#[test]
fn test_negation_without_not_factory() -> Result<()> {
    assert_eq!(parse_user(r#"not (givenName startsWith "x")"#)?.to_string(), r#"NOT(STARTS_WITH(givenName, "x"))"#);
    assert_eq!(parse_user(r#"givenName not startsWith "x""#)?.to_string(), r#"NOT(STARTS_WITH(givenName, "x"))"#);
    assert_eq!(parse_user("not (assignment exists)")?.to_string(), "NOT(EXISTS(assignment))");
    Ok(())
}

#[test]
fn test_negated_exists_on_property() -> Result<()> {
    assert_eq!(parse_user("not (givenName exists)")?.to_string(), "EQUAL(givenName, <no value>)");
    assert_eq!(parse_user("givenName not exists")?.to_string(), "EQUAL(givenName, <no value>)");
    assert_eq!(parse_user("not (givenName not exists)")?.to_string(), "EXISTS(givenName)");
    Ok(())
}

#[test]
fn test_negated_conjunction() -> Result<()> {
    let filter = parse_user(r#"not (givenName = "a" and familyName = "b")"#)?;
    assert_eq!(filter.to_string(), r#"NOT(AND(EQUAL(givenName, "a"), EQUAL(familyName, "b")))"#);
    Ok(())
}
