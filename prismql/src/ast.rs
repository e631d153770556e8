use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed filter. Produced by the grammar and consumed once by a filter tree builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterNode {
    And { left: Box<FilterNode>, right: Box<FilterNode> },
    Or { left: Box<FilterNode>, right: Box<FilterNode> },
    Generic(ItemFilterNode),
    /// Parenthesized filter
    Sub(Box<FilterNode>),
    /// `not ( ... )`
    Not(Box<FilterNode>),
}

impl FilterNode {
    pub fn and(left: FilterNode, right: FilterNode) -> Self { FilterNode::And { left: Box::new(left), right: Box::new(right) } }

    pub fn or(left: FilterNode, right: FilterNode) -> Self { FilterNode::Or { left: Box::new(left), right: Box::new(right) } }

    pub fn as_item_filter(&self) -> Option<&ItemFilterNode> {
        match self {
            FilterNode::Generic(item) => Some(item),
            _ => None,
        }
    }
}

/// `path [not] filterName[matchingRule] value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemFilterNode {
    pub path: PathExpr,
    pub negated: bool,
    pub filter_name: FilterNameRef,
    pub matching_rule: Option<PrefixedName>,
    pub payload: Option<SubfilterOrValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterNameRef {
    /// Operator form such as `=` or `<=`
    Alias(String),
    Name(PrefixedName),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixedName {
    pub prefix: Option<String>,
    pub local: String,
}

impl PrefixedName {
    pub fn local(local: impl Into<String>) -> Self { Self { prefix: None, local: local.into() } }
}

/// Item path as written in the query. Segment resolution needs a namespace context,
/// so it is left to the schema layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathExpr {
    pub text: String,
}

impl PathExpr {
    pub fn new(text: impl Into<String>) -> Self { Self { text: text.into() } }

    pub fn is_self(&self) -> bool { self.text == "." }

    /// Variable paths (`$account/name`) are evaluated by the expression layer, not the schema.
    pub fn is_variable(&self) -> bool { self.text.contains('$') }

    pub fn first_segment(&self) -> &str { self.text.split('/').next().unwrap_or_default() }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SubfilterOrValue {
    SingleValue(SingleValue),
    ValueSet(Vec<SingleValue>),
    Expression(Expression),
    Subfilter(Box<FilterNode>),
}

impl SubfilterOrValue {
    pub fn single_value(&self) -> Option<&SingleValue> {
        match self {
            SubfilterOrValue::SingleValue(value) => Some(value),
            _ => None,
        }
    }

    pub fn value_set(&self) -> Option<&[SingleValue]> {
        match self {
            SubfilterOrValue::ValueSet(values) => Some(values),
            _ => None,
        }
    }

    pub fn subfilter(&self) -> Option<&FilterNode> {
        match self {
            SubfilterOrValue::Subfilter(filter) => Some(filter),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SingleValue {
    Literal(Literal),
    Path(PathExpr),
}

impl SingleValue {
    pub fn literal(&self) -> Option<&Literal> {
        match self {
            SingleValue::Literal(literal) => Some(literal),
            SingleValue::Path(_) => None,
        }
    }

    pub fn path(&self) -> Option<&PathExpr> {
        match self {
            SingleValue::Path(path) => Some(path),
            SingleValue::Literal(_) => None,
        }
    }
}

/// Literal token. Numbers keep their lexical form; typing happens against the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    String(String),
    Integer(String),
    Float(String),
    Boolean(bool),
}

impl Literal {
    /// Text handed to value conversion: unquoted string content or the raw token.
    pub fn text_form(&self) -> String {
        match self {
            Literal::String(s) | Literal::Integer(s) | Literal::Float(s) => s.clone(),
            Literal::Boolean(b) => b.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Script { language: Option<String>, code: String },
    Constant(String),
}

impl fmt::Display for FilterNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterNode::And { left, right } => write!(f, "{} and {}", left, right),
            FilterNode::Or { left, right } => write!(f, "{} or {}", left, right),
            FilterNode::Generic(item) => write!(f, "{}", item),
            FilterNode::Sub(inner) => write!(f, "({})", inner),
            FilterNode::Not(inner) => write!(f, "not ({})", inner),
        }
    }
}

impl fmt::Display for ItemFilterNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.text)?;
        if self.negated {
            write!(f, " not")?;
        }
        write!(f, " {}", self.filter_name)?;
        if let Some(rule) = &self.matching_rule {
            write!(f, "[{}]", rule)?;
        }
        if let Some(payload) = &self.payload {
            write!(f, " {}", payload)?;
        }
        Ok(())
    }
}

impl fmt::Display for FilterNameRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterNameRef::Alias(alias) => write!(f, "{}", alias),
            FilterNameRef::Name(name) => write!(f, "{}", name),
        }
    }
}

impl fmt::Display for PrefixedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{}:{}", prefix, self.local),
            None => write!(f, "{}", self.local),
        }
    }
}

impl fmt::Display for SubfilterOrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubfilterOrValue::SingleValue(value) => write!(f, "{}", value),
            SubfilterOrValue::ValueSet(values) => {
                write!(f, "(")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, ")")
            }
            SubfilterOrValue::Expression(expression) => write!(f, "{}", expression),
            SubfilterOrValue::Subfilter(filter) => write!(f, "({})", filter),
        }
    }
}

impl fmt::Display for SingleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SingleValue::Literal(literal) => write!(f, "{}", literal),
            SingleValue::Path(path) => write!(f, "{}", path.text),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => {
                write!(f, "\"")?;
                for c in s.chars() {
                    match c {
                        '"' => write!(f, "\\\"")?,
                        '\\' => write!(f, "\\\\")?,
                        _ => write!(f, "{}", c)?,
                    }
                }
                write!(f, "\"")
            }
            Literal::Integer(s) | Literal::Float(s) => write!(f, "{}", s),
            Literal::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Script { language, code } => {
                if let Some(language) = language {
                    write!(f, "{}", language)?;
                }
                if code.contains('\n') || code.contains('`') {
                    write!(f, "```{}```", code)
                } else {
                    write!(f, "`{}`", code)
                }
            }
            Expression::Constant(name) => write!(f, "@{}", name),
        }
    }
}
