//! Query resolution against a depth-limited remote service
//!
//! # Resolution flow (strict order)
//!
//! 1. Validate the filter and resolve the sort (once, before any remote call)
//! 2. Build the decomposition plan from the nesting level and the limit
//! 3. Execute the plan: one remote call per direct step, sibling steps
//!    polled concurrently
//! 4. Merge child results by record id (AND = intersection, OR = union)
//!
//! The top-level sort is only sent when the whole filter fits in one request;
//! merged results are never re-sorted.

mod errors;
mod merge;
mod plan;
mod request;
mod resolver;

pub use errors::{ResolveError, ResolveResult};
pub use merge::{intersect, merge, union};
pub use plan::DecompositionPlan;
pub use request::ResolveRequest;
pub use resolver::QueryResolver;
