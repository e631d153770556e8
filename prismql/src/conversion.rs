use crate::ast::FilterNode;
use crate::error::ParseError;
use crate::parser;
use std::convert::TryFrom;
use std::str::FromStr;

impl<'a> TryFrom<&'a str> for FilterNode {
    type Error = ParseError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> { parser::parse_filter(value) }
}

impl TryFrom<String> for FilterNode {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> { parser::parse_filter(&value) }
}

impl FromStr for FilterNode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { parser::parse_filter(s) }
}
