//! Application records
//!
//! Remote rows are opaque to the resolver. This module maps them into the
//! sales-pipeline rows returned to API and CLI callers.

mod sales;

pub use sales::{map_records, SalesRecord, NOT_FOUND};
