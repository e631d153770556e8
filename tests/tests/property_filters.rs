use anyhow::Result;
use common::*;
use prismql_core::error::ConversionError;
use prismql_core::filter::{RefRight, RightHandSide};
use prismql_core::qname::MATCHING_RULE_NS;
use prismql_core::value::ValueType;
use prismql_core::{ObjectFilter, QName, QueryError, SchemaError, Value};

#[test]
fn test_equal_literal() -> Result<()> {
    let filter = parse_user(r#"givenName = "Jack""#)?;
    assert_eq!(filter.to_string(), r#"EQUAL(givenName, "Jack")"#);
    let ObjectFilter::Equal(equal) = filter else { panic!("expected equal") };
    assert_eq!(equal.values(), &[Value::String("Jack".into())]);
    assert_eq!(equal.matching_rule, None);
    Ok(())
}

#[test]
fn test_literals_take_the_property_type() -> Result<()> {
    assert_eq!(parse_user("age = 42")?.to_string(), "EQUAL(age, 42)");
    assert_eq!(parse_user("enabled = true")?.to_string(), "EQUAL(enabled, true)");

    let ObjectFilter::Equal(equal) = parse_user("employeeNumber = 4200000000")? else { panic!("expected equal") };
    assert_eq!(equal.values(), &[Value::Long(4_200_000_000)]);

    let ObjectFilter::Equal(equal) = parse_user(r#"name = "Jack  Sparrow""#)? else { panic!("expected equal") };
    assert_eq!(equal.values(), &[Value::PolyString(prismql_core::PolyString::with_norm("Jack  Sparrow", "jack sparrow"))]);
    Ok(())
}

#[test]
fn test_comparisons() -> Result<()> {
    assert_eq!(parse_user("age > 30")?.to_string(), "GREATER(age, 30)");
    assert_eq!(parse_user("age >= 30")?.to_string(), "GREATER_OR_EQUAL(age, 30)");
    assert_eq!(parse_user("age < 30")?.to_string(), "LESS(age, 30)");
    assert_eq!(parse_user("age lessOrEqual 30")?.to_string(), "LESS_OR_EQUAL(age, 30)");
    assert_eq!(
        parse_user(r#"activation/validFrom > "2024-01-01T00:00:00Z""#)?.to_string(),
        "GREATER(activation/validFrom, 2024-01-01T00:00:00+00:00)"
    );
    Ok(())
}

#[test]
fn test_value_sets() -> Result<()> {
    assert_eq!(parse_user(r#"givenName = ("Jack", "Jill")"#)?.to_string(), r#"EQUAL(givenName, "Jack", "Jill")"#);
    assert_eq!(parse_user(r#"givenName anyIn ("Jack", "Jill")"#)?.to_string(), r#"ANY_IN(givenName, "Jack", "Jill")"#);

    assert_eq!(schema_error("age > (1, 2)"), SchemaError::MultipleValuesNotSupported("greater".into()));
    assert_eq!(
        schema_error(r#"givenName = ("Jack", familyName)"#),
        SchemaError::invalid("Only literal value is supported if multiple values are enumerated")
    );
    Ok(())
}

#[test]
fn test_substring_filters() -> Result<()> {
    assert_eq!(parse_user(r#"givenName startsWith "J""#)?.to_string(), r#"STARTS_WITH(givenName, "J")"#);
    assert_eq!(parse_user(r#"givenName endsWith "k""#)?.to_string(), r#"ENDS_WITH(givenName, "k")"#);
    assert_eq!(parse_user(r#"givenName contains "ac""#)?.to_string(), r#"SUBSTRING(givenName, "ac")"#);

    assert_eq!(schema_error("givenName startsWith familyName"), SchemaError::invalid("substring filter does not support path or right side."));
    assert_eq!(schema_error(r#"givenName contains ("a", "b")"#), SchemaError::MultipleValuesNotSupported("contains".into()));
    Ok(())
}

#[test]
fn test_not_equal() -> Result<()> {
    assert_eq!(parse_user(r#"givenName != "Jack""#)?.to_string(), r#"NOT(EQUAL(givenName, "Jack"))"#);
    Ok(())
}

#[test]
fn test_matching_rule() -> Result<()> {
    let ObjectFilter::Equal(equal) = parse_user(r#"givenName =[stringIgnoreCase] "jack""#)? else { panic!("expected equal") };
    assert_eq!(equal.matching_rule, Some(QName::new(MATCHING_RULE_NS, "stringIgnoreCase")));
    Ok(())
}

#[test]
fn test_property_on_the_right() -> Result<()> {
    let ObjectFilter::Equal(equal) = parse_user("givenName = familyName")? else { panic!("expected equal") };
    let RightHandSide::Path { path, definition } = &equal.right else { panic!("expected path right side") };
    assert_eq!(path.to_string(), "familyName");
    assert_eq!(definition.item_name(), &QName::local("familyName"));

    assert_eq!(schema_error("givenName = nickname"), SchemaError::invalid("Path nickname does not reference property"));
    assert_eq!(schema_error("givenName = assignment"), SchemaError::invalid("Path assignment does not reference property"));
    Ok(())
}

#[test]
fn test_enumerated_values() -> Result<()> {
    let ObjectFilter::Equal(equal) = parse_user(r#"activation/administrativeStatus = "enabled""#)? else { panic!("expected equal") };
    assert_eq!(equal.values(), &[Value::Enum("enabled".into())]);

    assert_eq!(
        schema_error(r#"activation/administrativeStatus = "sleeping""#),
        SchemaError::conversion("sleeping", ConversionError::NotAllowed(common("ActivationStatusType")))
    );
    Ok(())
}

#[test]
fn test_bad_literal() {
    assert_eq!(schema_error(r#"age = "old""#), SchemaError::conversion("old", ConversionError::InvalidFormat { target_type: ValueType::Int }));
}

#[test]
fn test_payload_shape_errors() {
    assert_eq!(schema_error(r#"assignment = "x""#), SchemaError::NotAProperty("assignment".into()));
    assert_eq!(schema_error("givenName equal"), SchemaError::MissingValue("equal".into()));
    assert_eq!(schema_error("givenName = (familyName exists)"), SchemaError::invalid("Single value is required."));
}

#[test]
fn test_expressions() -> Result<()> {
    let (builder, expressions) = builder_with_expressions();

    let ObjectFilter::Equal(equal) = builder.parse_filter(&user(), "givenName = $focus/nickName")? else { panic!("expected equal") };
    let RightHandSide::Expression(expression) = &equal.right else { panic!("expected expression") };
    assert_eq!(expression.expression["path"], "$focus/nickName");

    builder.parse_filter(&user(), "givenName = groovy`return 'jack'`")?;
    builder.parse_filter(&user(), "givenName startsWith `basic.lc(x)`")?;
    builder.parse_filter(&user(), "givenName = @defaultName")?;

    let calls = expressions.calls.lock().unwrap().clone();
    assert_eq!(calls, vec!["path:$focus/nickName", "groovy:return 'jack'", "groovy:basic.lc(x)", "const:defaultName"]);
    Ok(())
}

#[test]
fn test_expressions_without_parser() {
    assert_eq!(schema_error("givenName = `'jack'`"), SchemaError::UnsupportedFeature("Expressions are not supported".into()));
    assert_eq!(schema_error("givenName = $focus/nickName"), SchemaError::UnsupportedFeature("Expressions are not supported".into()));
}

#[test]
fn test_reference_equal_expression() -> Result<()> {
    let (builder, expressions) = builder_with_expressions();
    let ObjectFilter::Ref(reference) = builder.parse_filter(&user(), "parentOrgRef = $focus/parentOrgRef")? else { panic!("expected ref") };
    let RefRight::Expression(expression) = &reference.right else { panic!("expected expression") };
    assert_eq!(expression.element_name, QName::local("path"));
    assert_eq!(reference.path.to_string(), "parentOrgRef");
    assert_eq!(expressions.calls.lock().unwrap().len(), 1);

    match builder.parse_filter(&user(), r#"parentOrgRef = "123""#) {
        Err(QueryError::Schema(SchemaError::NotAProperty(path))) => assert_eq!(path, "parentOrgRef"),
        other => panic!("unexpected {:?}", other),
    }
    Ok(())
}
