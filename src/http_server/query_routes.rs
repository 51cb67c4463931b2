//! Query HTTP Routes
//!
//! - `GET /api` - every record
//! - `GET /api/sort?property=&direction=` - records sorted by one property
//! - `POST /api/sort-filter` - filtered, optionally sorted records

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    routing::{get, post},
    Json, Router,
};

use super::errors::{ApiError, ApiResult};
use super::state::AppState;
use crate::executor::ResolveRequest;
use crate::filter::SortRequest;
use crate::records::{map_records, SalesRecord};

/// Create query routes
pub fn query_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api", get(list_handler))
        .route("/api/sort", get(sort_handler))
        .route("/api/sort-filter", post(sort_filter_handler))
        .with_state(state)
}

async fn list_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<SalesRecord>>> {
    let records = state
        .resolver
        .resolve(None, None, state.max_nesting_level)
        .await?;

    Ok(Json(map_records(&records)))
}

async fn sort_handler(
    State(state): State<Arc<AppState>>,
    Query(sort): Query<SortRequest>,
) -> ApiResult<Json<Vec<SalesRecord>>> {
    let records = state
        .resolver
        .resolve(None, Some(&sort), state.max_nesting_level)
        .await?;

    Ok(Json(map_records(&records)))
}

async fn sort_filter_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ResolveRequest>, JsonRejection>,
) -> ApiResult<Json<Vec<SalesRecord>>> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidBody(e.body_text()))?;

    let records = state
        .resolver
        .resolve_request(&request, state.max_nesting_level)
        .await?;

    Ok(Json(map_records(&records)))
}
