use super::{ItemFilterFactory, ItemFilterRequest};
use crate::builder::FilterTreeBuilder;
use crate::error::SchemaError;
use crate::filter::{ComparisonFilter, ObjectFilter, RefFilter, RightHandSide, SubstringFilter, ValueFilter};
use crate::schema::DefinitionKind;
use prismql::ast::{SingleValue, SubfilterOrValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyFilterKind {
    Equal,
    AnyIn,
    Greater { or_equal: bool },
    Less { or_equal: bool },
    Substring { anchor_start: bool, anchor_end: bool },
}

impl PropertyFilterKind {
    fn accepts_value_set(self) -> bool { matches!(self, PropertyFilterKind::Equal | PropertyFilterKind::AnyIn) }
}

/// Comparison of a property against a literal, a value set, another property or an expression
#[derive(Debug, Clone, Copy)]
pub struct PropertyFilterFactory {
    kind: PropertyFilterKind,
}

impl PropertyFilterFactory {
    pub const fn new(kind: PropertyFilterKind) -> Self { Self { kind } }

    fn leaf(&self, value: ValueFilter) -> Result<ObjectFilter, SchemaError> {
        Ok(match self.kind {
            PropertyFilterKind::Equal => ObjectFilter::Equal(value),
            PropertyFilterKind::AnyIn => ObjectFilter::AnyIn(value),
            PropertyFilterKind::Greater { or_equal } => ObjectFilter::Greater(ComparisonFilter { value, or_equal }),
            PropertyFilterKind::Less { or_equal } => ObjectFilter::Less(ComparisonFilter { value, or_equal }),
            PropertyFilterKind::Substring { anchor_start, anchor_end } => {
                if let RightHandSide::Path { .. } = value.right {
                    return Err(SchemaError::invalid("substring filter does not support path or right side."));
                }
                ObjectFilter::Substring(SubstringFilter { value, anchor_start, anchor_end })
            }
        })
    }

    /// `targetRef = $focus/managerRef` and `targetRef = `script`` compare whole references
    fn reference_equal(&self, builder: &FilterTreeBuilder, request: &ItemFilterRequest<'_>, payload: &SubfilterOrValue) -> Result<Option<ObjectFilter>, SchemaError> {
        let expression = match payload {
            SubfilterOrValue::Expression(expression) => builder.parse_expression(expression)?,
            SubfilterOrValue::SingleValue(SingleValue::Path(path)) if path.is_variable() => builder.parse_path_expression(&builder.item_path(path)?)?,
            _ => return Ok(None),
        };
        let filter = RefFilter::builder(request.path.clone(), request.definition.clone()).expression(expression).build();
        Ok(Some(ObjectFilter::Ref(filter)))
    }
}

impl ItemFilterFactory for PropertyFilterFactory {
    fn create(&self, builder: &FilterTreeBuilder, request: &ItemFilterRequest<'_>) -> Result<ObjectFilter, SchemaError> {
        let payload = request.require_payload()?;

        if self.kind == PropertyFilterKind::Equal && request.definition.as_reference().is_some() {
            if let Some(filter) = self.reference_equal(builder, request, payload)? {
                return Ok(filter);
            }
        }

        let property = request.definition.as_property().ok_or_else(|| SchemaError::NotAProperty(request.path.to_string()))?;
        let leaf = |right| ValueFilter::new(request.path.clone(), request.definition.clone(), request.matching_rule.cloned(), right);
        let literals = builder.literals();

        match payload {
            SubfilterOrValue::Expression(expression) => self.leaf(leaf(RightHandSide::Expression(builder.parse_expression(expression)?))),
            SubfilterOrValue::ValueSet(values) => {
                if !self.kind.accepts_value_set() {
                    return Err(SchemaError::MultipleValuesNotSupported(request.name().to_string()));
                }
                let values = values
                    .iter()
                    .map(|value| match value.literal() {
                        Some(literal) => literals.for_definition(literal, property),
                        None => Err(SchemaError::invalid("Only literal value is supported if multiple values are enumerated")),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                self.leaf(leaf(RightHandSide::Values(values)))
            }
            SubfilterOrValue::SingleValue(SingleValue::Path(path)) => {
                let right_path = builder.item_path(path)?;
                if path.is_variable() {
                    return self.leaf(leaf(RightHandSide::Expression(builder.parse_path_expression(&right_path)?)));
                }
                let right_definition = builder
                    .find_definition(request.parent, request.type_def, &right_path, DefinitionKind::Property)?
                    .ok_or_else(|| SchemaError::invalid(format!("Path {} does not reference property", right_path)))?;
                self.leaf(leaf(RightHandSide::Path { path: right_path, definition: right_definition }))
            }
            SubfilterOrValue::SingleValue(SingleValue::Literal(literal)) => {
                let value = literals.for_definition(literal, property)?;
                self.leaf(leaf(RightHandSide::Values(vec![value])))
            }
            SubfilterOrValue::Subfilter(_) => Err(SchemaError::invalid("Single value is required.")),
        }
    }
}

/// `a != b` is `not (a = b)`
#[derive(Debug, Clone, Copy)]
pub struct NotEqualFactory;

impl ItemFilterFactory for NotEqualFactory {
    fn create(&self, builder: &FilterTreeBuilder, request: &ItemFilterRequest<'_>) -> Result<ObjectFilter, SchemaError> {
        let equal = PropertyFilterFactory::new(PropertyFilterKind::Equal).create(builder, request)?;
        Ok(ObjectFilter::not(equal))
    }
}
