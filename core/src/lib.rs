pub mod argument;
pub mod builder;
pub mod error;
pub mod expression;
pub mod factory;
pub mod filter;
pub mod literal;
pub mod names;
pub mod path;
pub mod qname;
pub mod schema;
pub mod value;

pub use builder::{FilterContext, FilterTreeBuilder, RuntimeType};
pub use error::{ArgumentError, ConversionError, QueryError, SchemaError};
pub use expression::{ExpressionParser, ExpressionWrapper};
pub use factory::{FilterFactories, ItemFilterFactory, ItemFilterRequest};
pub use filter::ObjectFilter;
pub use path::ItemPath;
pub use qname::{NamespaceContext, QName};
pub use schema::{ItemDefinition, MemorySchemaRegistry, SchemaRegistry};
pub use value::{PolyString, ReferenceValue, Value};

pub use prismql;
