//! Custom fields: typed values and relational resolution.
//!
//! - [`value`] classifies raw field data into [`FieldValue`] once, at ingestion
//! - [`resolver`] expands record references into full records

pub mod resolver;
pub mod value;

pub use resolver::FieldResolver;
pub use value::{FieldDefinition, FieldMap, FieldValue, Reference};
