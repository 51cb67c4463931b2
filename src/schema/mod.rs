//! Property schema for filterable and sortable properties
//!
//! The schema is read-only configuration:
//! - property name → semantic type
//! - semantic type → permitted comparison operators
//! - the list of properties a query may sort by
//!
//! Extending the schema is a configuration change (see `ServiceConfig::schema`).

mod property;
mod registry;

pub use property::PropertyType;
pub use registry::PropertySchema;
