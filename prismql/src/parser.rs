use crate::ast;
use crate::error::ParseError;
use crate::grammar::{self, Rule};
use pest::iterators::Pair;
use pest::Parser;

/// Print a parse tree node and its children recursively
#[cfg(test)]
fn print_tree(pair: Pair<Rule>, indent: usize) {
    if matches!(pair.as_rule(), Rule::EOI) {
        return;
    }
    println!("{:indent$}{:?}: '{}'", "", pair.as_rule(), pair.as_str().trim(), indent = indent);
    for inner in pair.into_inner() {
        print_tree(inner, indent + 2);
    }
}

/// Debug print a sequence of parse tree nodes
#[cfg(test)]
fn debug_print_pairs(pairs: pest::iterators::Pairs<Rule>) {
    println!("Parse tree:");
    for pair in pairs {
        print_tree(pair, 0);
    }
}

/// Parse query text into a filter parse tree.
pub fn parse_filter(input: &str) -> Result<ast::FilterNode, ParseError> {
    let pairs = grammar::PrismQlParser::parse(Rule::Query, input)?;

    #[cfg(test)]
    debug_print_pairs(pairs.clone());

    // Query is silent, so the first pair is the Filter itself
    let filter = pairs.into_iter().next().ok_or(ParseError::EmptyExpression)?;
    expect_rule(&filter, Rule::Filter, "Filter")?;
    let node = parse_or_chain(filter)?;
    tracing::trace!(query = input, "parsed filter: {}", node);
    Ok(node)
}

fn expect_rule(pair: &Pair<Rule>, rule: Rule, expected: &'static str) -> Result<(), ParseError> {
    if pair.as_rule() != rule {
        return Err(ParseError::UnexpectedRule { expected, got: pair.as_rule() });
    }
    Ok(())
}

/// Fold `a or b or c` left-associatively
fn parse_or_chain(pair: Pair<Rule>) -> Result<ast::FilterNode, ParseError> {
    let mut operands = pair.into_inner().filter(|p| p.as_rule() != Rule::Or);
    let first = operands.next().ok_or(ParseError::MissingOperand("left"))?;
    let mut result = parse_and_chain(first)?;
    for operand in operands {
        result = ast::FilterNode::or(result, parse_and_chain(operand)?);
    }
    Ok(result)
}

/// Fold `a and b and c` left-associatively
fn parse_and_chain(pair: Pair<Rule>) -> Result<ast::FilterNode, ParseError> {
    expect_rule(&pair, Rule::AndChain, "AndChain")?;
    let mut operands = pair.into_inner().filter(|p| p.as_rule() != Rule::And);
    let first = operands.next().ok_or(ParseError::MissingOperand("left"))?;
    let mut result = parse_primary(first)?;
    for operand in operands {
        result = ast::FilterNode::and(result, parse_primary(operand)?);
    }
    Ok(result)
}

fn parse_primary(pair: Pair<Rule>) -> Result<ast::FilterNode, ParseError> {
    match pair.as_rule() {
        Rule::NotFilter => {
            let spec = pair.into_inner().find(|p| p.as_rule() == Rule::SubfilterSpec).ok_or(ParseError::MissingOperand("negated"))?;
            Ok(ast::FilterNode::Not(Box::new(parse_subfilter_spec(spec)?)))
        }
        Rule::SubfilterSpec => Ok(ast::FilterNode::Sub(Box::new(parse_subfilter_spec(pair)?))),
        Rule::ItemFilter => Ok(ast::FilterNode::Generic(parse_item_filter(pair)?)),
        other => Err(ParseError::UnexpectedRule { expected: "NotFilter, SubfilterSpec or ItemFilter", got: other }),
    }
}

/// Returns the filter enclosed in the parentheses, without a `Sub` wrapper
fn parse_subfilter_spec(pair: Pair<Rule>) -> Result<ast::FilterNode, ParseError> {
    expect_rule(&pair, Rule::SubfilterSpec, "SubfilterSpec")?;
    let inner = pair.into_inner().next().ok_or(ParseError::EmptyExpression)?;
    expect_rule(&inner, Rule::Filter, "Filter")?;
    parse_or_chain(inner)
}

fn parse_item_filter(pair: Pair<Rule>) -> Result<ast::ItemFilterNode, ParseError> {
    let mut parts = pair.into_inner().peekable();

    let path = parts.next().ok_or(ParseError::MissingOperand("path"))?;
    expect_rule(&path, Rule::Path, "Path")?;
    let path = ast::PathExpr::new(path.as_str());

    let negated = parts.next_if(|p| p.as_rule() == Rule::Negation).is_some();

    let name = parts.next().ok_or(ParseError::MissingOperand("filter name"))?;
    let filter_name = match name.as_rule() {
        Rule::FilterNameAlias => ast::FilterNameRef::Alias(name.as_str().to_string()),
        Rule::FilterName => ast::FilterNameRef::Name(parse_prefixed_name(first_inner(name, "PrefixedName")?)?),
        other => return Err(ParseError::UnexpectedRule { expected: "FilterNameAlias or FilterName", got: other }),
    };

    let matching_rule = match parts.next_if(|p| p.as_rule() == Rule::MatchingRule) {
        Some(rule) => Some(parse_prefixed_name(first_inner(rule, "PrefixedName")?)?),
        None => None,
    };

    let payload = match parts.next() {
        Some(payload) => Some(parse_subfilter_or_value(payload)?),
        None => None,
    };

    Ok(ast::ItemFilterNode { path, negated, filter_name, matching_rule, payload })
}

fn first_inner<'i>(pair: Pair<'i, Rule>, expected: &'static str) -> Result<Pair<'i, Rule>, ParseError> {
    pair.into_inner().next().ok_or(ParseError::MissingOperand(expected))
}

fn parse_prefixed_name(pair: Pair<Rule>) -> Result<ast::PrefixedName, ParseError> {
    expect_rule(&pair, Rule::PrefixedName, "PrefixedName")?;
    let mut prefix = None;
    let mut local = None;
    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::Prefix => prefix = Some(part.as_str().to_string()),
            Rule::LocalName => local = Some(part.as_str().to_string()),
            other => return Err(ParseError::UnexpectedRule { expected: "Prefix or LocalName", got: other }),
        }
    }
    let local = local.ok_or(ParseError::MissingOperand("local name"))?;
    Ok(ast::PrefixedName { prefix, local })
}

fn parse_subfilter_or_value(pair: Pair<Rule>) -> Result<ast::SubfilterOrValue, ParseError> {
    expect_rule(&pair, Rule::SubfilterOrValue, "SubfilterOrValue")?;
    let inner = first_inner(pair, "value")?;
    match inner.as_rule() {
        Rule::SubfilterSpec => Ok(ast::SubfilterOrValue::Subfilter(Box::new(parse_subfilter_spec(inner)?))),
        Rule::Expression => Ok(ast::SubfilterOrValue::Expression(parse_expression(inner)?)),
        Rule::ValueSet => {
            let values = inner.into_inner().map(parse_single_value).collect::<Result<Vec<_>, _>>()?;
            Ok(ast::SubfilterOrValue::ValueSet(values))
        }
        Rule::SingleValue => Ok(ast::SubfilterOrValue::SingleValue(parse_single_value(inner)?)),
        other => Err(ParseError::UnexpectedRule { expected: "subfilter, expression, value set or value", got: other }),
    }
}

fn parse_single_value(pair: Pair<Rule>) -> Result<ast::SingleValue, ParseError> {
    expect_rule(&pair, Rule::SingleValue, "SingleValue")?;
    let value = first_inner(pair, "value")?;
    let literal = match value.as_rule() {
        Rule::Path => return Ok(ast::SingleValue::Path(ast::PathExpr::new(value.as_str()))),
        Rule::Boolean => ast::Literal::Boolean(value.as_str() == "true"),
        Rule::Integer => ast::Literal::Integer(value.as_str().to_string()),
        Rule::Float => ast::Literal::Float(value.as_str().to_string()),
        Rule::StringValue => ast::Literal::String(parse_string(value)?),
        other => return Err(ParseError::UnexpectedRule { expected: "literal or path", got: other }),
    };
    Ok(ast::SingleValue::Literal(literal))
}

/// Strip quotes and resolve backslash escapes. Triple quoted strings are taken verbatim.
fn parse_string(pair: Pair<Rule>) -> Result<String, ParseError> {
    let quoted = first_inner(pair, "string")?;
    let rule = quoted.as_rule();
    let body = first_inner(quoted, "string body")?;
    match rule {
        Rule::TripleQuoted => Ok(body.as_str().to_string()),
        Rule::DoubleQuoted | Rule::SingleQuoted => unescape(body.as_str()),
        other => Err(ParseError::UnexpectedRule { expected: "quoted string", got: other }),
    }
}

fn unescape(raw: &str) -> Result<String, ParseError> {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some(other) => result.push(other),
            None => return Err(ParseError::InvalidLiteral(format!("dangling escape in \"{}\"", raw))),
        }
    }
    Ok(result)
}

fn parse_expression(pair: Pair<Rule>) -> Result<ast::Expression, ParseError> {
    let inner = first_inner(pair, "expression")?;
    match inner.as_rule() {
        Rule::Constant => Ok(ast::Expression::Constant(first_inner(inner, "constant name")?.as_str().to_string())),
        Rule::Script => {
            let mut language = None;
            let mut code = None;
            for part in inner.into_inner() {
                match part.as_rule() {
                    Rule::ScriptLanguage => language = Some(part.as_str().to_string()),
                    Rule::ScriptMultiline => code = Some(first_inner(part, "script body")?.as_str().to_string()),
                    Rule::ScriptSingleline => code = Some(first_inner(part, "script body")?.as_str().replace("\\`", "`")),
                    other => return Err(ParseError::UnexpectedRule { expected: "script language or body", got: other }),
                }
            }
            let code = code.ok_or(ParseError::MissingOperand("script body"))?;
            Ok(ast::Expression::Script { language, code })
        }
        other => Err(ParseError::UnexpectedRule { expected: "Script or Constant", got: other }),
    }
}
