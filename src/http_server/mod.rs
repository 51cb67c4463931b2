//! # HTTP Server Module
//!
//! Axum server exposing query resolution over HTTP.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/metrics` - Counters
//! - `/api` - Every record
//! - `/api/sort` - Sorted records
//! - `/api/sort-filter` - Filtered records, decomposed as needed

mod errors;
mod observability_routes;
mod query_routes;
mod server;
mod state;

pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use observability_routes::HealthResponse;
pub use server::HttpServer;
pub use state::AppState;
