//! Filter expressions for the remote query service
//!
//! A filter is a tree of AND/OR groups over leaf conditions. This module
//! parses the wire form once into a typed tree, validates it against the
//! property schema, measures its nesting depth and resolves sort requests.
//!
//! # Wire form
//!
//! ```text
//! { "and": [Filter, ...] } | { "or": [Filter, ...] }
//! { "property": "Status", "status": { "equals": "Active" } }
//! ```

mod ast;
mod errors;
mod nesting;
mod parser;
mod sort;
mod validator;

pub use ast::{BoolOp, Condition, Filter};
pub use errors::{FilterError, FilterErrorCode, FilterResult};
pub use nesting::nesting_level;
pub use parser::parse_filter;
pub use sort::{resolve_sort, ResolvedSort, SortDirection, SortRequest};
pub use validator::FilterValidator;
