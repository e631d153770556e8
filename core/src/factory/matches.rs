use super::{ItemFilterFactory, ItemFilterRequest};
use crate::builder::{FilterContext, FilterTreeBuilder};
use crate::error::SchemaError;
use crate::filter::{ExistsFilter, ObjectFilter};
use crate::schema::ItemDefinition;

/// `assignment matches (...)`, `targetRef matches (oid = "...")`, `name matches (orig = "...")`
#[derive(Debug, Clone, Copy)]
pub struct MatchesFactory;

impl ItemFilterFactory for MatchesFactory {
    fn create(&self, builder: &FilterTreeBuilder, request: &ItemFilterRequest<'_>) -> Result<ObjectFilter, SchemaError> {
        let subfilter = request.payload.and_then(|payload| payload.subfilter()).ok_or_else(|| SchemaError::invalid("matches filter requires subfilter"))?;
        match request.definition {
            ItemDefinition::Container(container) => {
                let context = FilterContext::new(Some(request.definition), Some(&container.complex_type));
                let inner = builder.parse_node(context, subfilter)?;
                Ok(ObjectFilter::Exists(ExistsFilter::new(request.path.clone(), request.parent.cloned(), Some(inner))))
            }
            ItemDefinition::Reference(_) => builder.matches_reference_filter(request.path, request.definition, subfilter),
            ItemDefinition::Property(property) if property.is_polystring() => builder.matches_polystring_filter(request.path, request.definition, subfilter),
            other => Err(SchemaError::UnsupportedOperation(format!("matches is not supported for {} of type {}", request.path, other.type_name()))),
        }
    }
}
