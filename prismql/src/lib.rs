//! Grammar and parse tree for the Prism query language.
//!
//! ```
//! use prismql::ast::{FilterNode, FilterNameRef};
//!
//! let filter = prismql::parse_filter(r#"givenName = "Jack" and familyName exists"#).unwrap();
//! let FilterNode::And { left, .. } = filter else { panic!("expected conjunction") };
//! let item = left.as_item_filter().unwrap();
//! assert_eq!(item.path.text, "givenName");
//! assert_eq!(item.filter_name, FilterNameRef::Alias("=".into()));
//! ```

pub mod ast;
mod conversion;
pub mod error;
pub mod grammar;
pub mod parser;

pub use parser::parse_filter;
