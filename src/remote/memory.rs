//! In-memory query client with canned responses
//!
//! Responses are keyed by the request's filter (compared in wire form).
//! Sorts do not take part in matching. Every request is recorded so callers
//! can assert how many remote calls a resolution made and what they carried.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use serde_json::Value;

use super::errors::{RemoteError, RemoteResult};
use super::{QueryClient, QueryRequest, QueryResponse, Record};
use crate::filter::Filter;

/// Query client that answers from a fixed table
#[derive(Debug, Default)]
pub struct MemoryQueryClient {
    responses: Vec<(Option<Value>, Vec<Record>)>,
    failures: Vec<(Option<Value>, RemoteError)>,
    fallback: Vec<Record>,
    requests: Mutex<Vec<QueryRequest>>,
}

impl MemoryQueryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers requests carrying exactly this filter
    pub fn respond_to(mut self, filter: &Filter, records: Vec<Record>) -> Self {
        self.responses.push((Some(filter.to_value()), records));
        self
    }

    /// Answers requests without a filter
    pub fn respond_unfiltered(mut self, records: Vec<Record>) -> Self {
        self.responses.push((None, records));
        self
    }

    /// Fails requests carrying exactly this filter
    pub fn fail_on(mut self, filter: &Filter, error: RemoteError) -> Self {
        self.failures.push((Some(filter.to_value()), error));
        self
    }

    /// Answers every request no other entry matches
    pub fn with_fallback(mut self, records: Vec<Record>) -> Self {
        self.fallback = records;
        self
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<QueryRequest> {
        self.lock_requests().clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock_requests().len()
    }

    fn lock_requests(&self) -> std::sync::MutexGuard<'_, Vec<QueryRequest>> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn answer(&self, request: QueryRequest) -> RemoteResult<QueryResponse> {
        let key = request.filter.as_ref().map(Filter::to_value);
        self.lock_requests().push(request);

        if let Some((_, error)) = self.failures.iter().find(|(k, _)| *k == key) {
            return Err(error.clone());
        }

        let records = self
            .responses
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, records)| records.clone())
            .unwrap_or_else(|| self.fallback.clone());

        Ok(QueryResponse::from_records(records))
    }
}

impl QueryClient for MemoryQueryClient {
    fn query(
        &self,
        request: QueryRequest,
    ) -> Pin<Box<dyn Future<Output = RemoteResult<QueryResponse>> + Send + '_>> {
        let answer = self.answer(request);
        Box::pin(async move {
            tokio::task::yield_now().await;
            answer
        })
    }
}
