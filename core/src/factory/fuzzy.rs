use super::{ItemFilterFactory, ItemFilterRequest};
use crate::argument::{extract_positional, get_argument, get_values, ArgumentSpec, FilterArgumentSpec};
use crate::builder::FilterTreeBuilder;
use crate::error::SchemaError;
use crate::filter::{FuzzyMatchingMethod, FuzzyStringMatchFilter, ObjectFilter};
use prismql::ast::SubfilterOrValue;

static STRING_VALUES: FilterArgumentSpec<String> = FilterArgumentSpec::required("values");
static LEVENSHTEIN_THRESHOLD: FilterArgumentSpec<i32> = FilterArgumentSpec::required("threshold");
static SIMILARITY_THRESHOLD: FilterArgumentSpec<f32> = FilterArgumentSpec::required("threshold");
static INCLUSIVE: FilterArgumentSpec<bool> = FilterArgumentSpec::optional("inclusive", true);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuzzyKind {
    Levenshtein,
    Similarity,
}

impl FuzzyKind {
    fn specs(self) -> [&'static dyn ArgumentSpec; 3] {
        match self {
            FuzzyKind::Levenshtein => [&STRING_VALUES, &LEVENSHTEIN_THRESHOLD, &INCLUSIVE],
            FuzzyKind::Similarity => [&STRING_VALUES, &SIMILARITY_THRESHOLD, &INCLUSIVE],
        }
    }
}

/// `name levenshtein ("ancor", 2, true)`, `name similarity ("ancor", 0.5)`
#[derive(Debug, Clone, Copy)]
pub struct FuzzyFilterFactory {
    kind: FuzzyKind,
}

impl FuzzyFilterFactory {
    pub const fn new(kind: FuzzyKind) -> Self { Self { kind } }
}

impl ItemFilterFactory for FuzzyFilterFactory {
    fn create(&self, builder: &FilterTreeBuilder, request: &ItemFilterRequest<'_>) -> Result<ObjectFilter, SchemaError> {
        if request.definition.as_property().is_none() {
            return Err(SchemaError::NotAProperty(request.path.to_string()));
        }
        let values = match request.require_payload()? {
            SubfilterOrValue::ValueSet(values) => values,
            _ => return Err(SchemaError::invalid(format!("Filter {} requires set of arguments", request.name()))),
        };

        let arguments = extract_positional(&self.kind.specs(), values, &builder.literals())?;
        let inclusive = get_argument(&INCLUSIVE, &arguments)?;
        let method = match self.kind {
            FuzzyKind::Levenshtein => FuzzyMatchingMethod::Levenshtein { threshold: get_argument(&LEVENSHTEIN_THRESHOLD, &arguments)?, inclusive },
            FuzzyKind::Similarity => FuzzyMatchingMethod::Similarity { threshold: get_argument(&SIMILARITY_THRESHOLD, &arguments)?, inclusive },
        };

        Ok(ObjectFilter::FuzzyMatch(FuzzyStringMatchFilter {
            path: request.path.clone(),
            definition: request.definition.clone(),
            matching_rule: request.matching_rule.cloned(),
            method,
            values: get_values(&STRING_VALUES, &arguments)?,
        }))
    }
}
