use anyhow::Result;
use common::*;
use prismql_core::error::{ArgumentError, ConversionError};
use prismql_core::filter::FuzzyMatchingMethod;
use prismql_core::value::ValueType;
use prismql_core::{ObjectFilter, SchemaError};

#[test]
fn test_levenshtein_default_inclusive() -> Result<()> {
    let ObjectFilter::FuzzyMatch(fuzzy) = parse_user(r#"givenName levenshtein ("ancor", 2)"#)? else { panic!("expected fuzzy match") };
    assert_eq!(fuzzy.method, FuzzyMatchingMethod::Levenshtein { threshold: 2, inclusive: true });
    assert_eq!(fuzzy.values, vec!["ancor".to_string()]);
    assert_eq!(fuzzy.path.to_string(), "givenName");
    Ok(())
}

#[test]
fn test_levenshtein_explicit_inclusive() -> Result<()> {
    let ObjectFilter::FuzzyMatch(fuzzy) = parse_user(r#"givenName levenshtein ("ancor", 2, false)"#)? else { panic!("expected fuzzy match") };
    assert_eq!(fuzzy.method, FuzzyMatchingMethod::Levenshtein { threshold: 2, inclusive: false });
    Ok(())
}

#[test]
fn test_similarity() -> Result<()> {
    let filter = parse_user(r#"familyName similarity ("ancor", 0.5)"#)?;
    assert_eq!(filter.to_string(), "SIMILARITY(familyName, 0.5, true, [ancor])");
    Ok(())
}

#[test]
fn test_missing_threshold() {
    assert_eq!(schema_error(r#"givenName levenshtein ("ancor")"#), SchemaError::Argument(ArgumentError::Missing { name: "threshold" }));
}

#[test]
fn test_argument_errors() {
    assert_eq!(schema_error(r#"givenName levenshtein "ancor""#), SchemaError::invalid("Filter levenshtein requires set of arguments"));
    assert_eq!(schema_error("givenName levenshtein (familyName, 2)"), SchemaError::Argument(ArgumentError::UnsupportedPath { name: "values" }));
    assert_eq!(
        schema_error(r#"givenName levenshtein ("ancor", "two")"#),
        SchemaError::conversion("two", ConversionError::InvalidFormat { target_type: ValueType::Int })
    );
    assert_eq!(schema_error(r#"assignment levenshtein ("ancor", 2)"#), SchemaError::NotAProperty("assignment".into()));
}
