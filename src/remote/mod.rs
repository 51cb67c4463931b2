//! Remote query service client
//!
//! The resolver talks to the remote database through the [`QueryClient`]
//! trait. Two implementations ship with the crate:
//!
//! - [`HttpQueryClient`]: the database query HTTP endpoint
//! - [`MemoryQueryClient`]: canned responses, used in tests

mod errors;
mod http;
mod memory;

pub use errors::{RemoteError, RemoteResult};
pub use http::{HttpQueryClient, RemoteConfig};
pub use memory::MemoryQueryClient;

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::filter::{Filter, ResolvedSort};

/// A row returned by the remote service.
///
/// Only `id` is interpreted; everything else is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Record {
    /// Creates a record with an empty payload
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            payload: Map::new(),
        }
    }

    /// Adds a payload field
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.payload.insert(key.into(), value);
        self
    }
}

/// A single query against the remote database
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<ResolvedSort>,
}

impl QueryRequest {
    pub fn new(filter: Option<Filter>, sort: Option<ResolvedSort>) -> Self {
        Self {
            filter,
            sorts: sort.into_iter().collect(),
        }
    }
}

/// One page of query results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub results: Vec<Record>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl QueryResponse {
    pub fn from_records(results: Vec<Record>) -> Self {
        Self {
            results,
            ..Default::default()
        }
    }
}

/// Executes single filter+sort requests against the remote database
pub trait QueryClient: Send + Sync {
    /// Runs one query and returns the first page of results
    fn query(
        &self,
        request: QueryRequest,
    ) -> Pin<Box<dyn Future<Output = RemoteResult<QueryResponse>> + Send + '_>>;
}
