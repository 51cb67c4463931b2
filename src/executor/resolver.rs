//! Query resolver
//!
//! Validates a filter, decides whether it fits in one remote request, and
//! otherwise resolves its children independently and merges them.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use futures_util::future::try_join_all;

use super::errors::ResolveResult;
use super::merge::merge;
use super::plan::DecompositionPlan;
use super::request::ResolveRequest;
use crate::filter::{
    resolve_sort, Filter, FilterError, FilterResult, FilterValidator, ResolvedSort, SortRequest,
};
use crate::observability::{
    log_event_with_fields, trace_event, Event, Logger, MetricsRegistry, ObservationScope,
};
use crate::remote::{QueryClient, QueryRequest, Record};
use crate::schema::PropertySchema;

/// Resolves filters against a remote service with a nesting limit
pub struct QueryResolver {
    client: Arc<dyn QueryClient>,
    schema: Arc<PropertySchema>,
    metrics: Arc<MetricsRegistry>,
}

impl QueryResolver {
    pub fn new(client: Arc<dyn QueryClient>, schema: Arc<PropertySchema>) -> Self {
        Self {
            client,
            schema,
            metrics: Arc::new(MetricsRegistry::new()),
        }
    }

    /// Shares a metrics registry with the caller
    pub fn with_metrics(mut self, metrics: Arc<MetricsRegistry>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn schema(&self) -> &PropertySchema {
        &self.schema
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// Validates the request and builds its decomposition plan.
    ///
    /// Never contacts the remote service.
    pub fn plan(
        &self,
        filter: Option<&Filter>,
        sort: Option<&SortRequest>,
        max_nesting_level: usize,
    ) -> FilterResult<DecompositionPlan> {
        let validated = FilterValidator::new(&self.schema)
            .validate(filter)
            .and_then(|_| resolve_sort(&self.schema, sort));

        match validated {
            Ok(sort) => Ok(DecompositionPlan::build(filter, sort, max_nesting_level)),
            Err(e) => Err(self.reject(e)),
        }
    }

    /// Parses and plans a wire request without contacting the remote service
    pub fn explain(
        &self,
        request: &ResolveRequest,
        default_max_nesting_level: usize,
    ) -> FilterResult<DecompositionPlan> {
        let filter = request
            .parse_filter(&self.schema)
            .map_err(|e| self.reject(e))?;
        let max = request.max_nesting_level_or(default_max_nesting_level);
        let plan = self.plan(filter.as_ref(), request.sort.as_ref(), max)?;

        log_event_with_fields(
            Event::ExplainComplete,
            &[
                ("max_nesting_level", max.to_string().as_str()),
                ("remote_calls", plan.remote_calls().to_string().as_str()),
            ],
        );
        Ok(plan)
    }

    /// Parses and resolves a wire request
    pub async fn resolve_request(
        &self,
        request: &ResolveRequest,
        default_max_nesting_level: usize,
    ) -> ResolveResult<Vec<Record>> {
        let filter = request
            .parse_filter(&self.schema)
            .map_err(|e| self.reject(e))?;
        let max = request.max_nesting_level_or(default_max_nesting_level);
        self.resolve(filter.as_ref(), request.sort.as_ref(), max).await
    }

    fn reject(&self, error: FilterError) -> FilterError {
        self.metrics.increment_filters_rejected();
        Logger::warn(
            Event::FilterRejected.as_str(),
            &[("code", error.code().code()), ("reason", error.message())],
        );
        error
    }

    /// Resolves a filter and optional sort into an ordered record sequence.
    ///
    /// Validation failures are raised before any remote call. The first
    /// failure of any sub-query aborts the whole resolution.
    pub async fn resolve(
        &self,
        filter: Option<&Filter>,
        sort: Option<&SortRequest>,
        max_nesting_level: usize,
    ) -> ResolveResult<Vec<Record>> {
        let max = max_nesting_level.to_string();
        let scope = ObservationScope::with_fields("RESOLVE", &[("max_nesting_level", max.as_str())]);

        let plan = match self.plan(filter, sort, max_nesting_level) {
            Ok(plan) => plan,
            Err(e) => {
                scope.fail(e.message(), true);
                return Err(e.into());
            }
        };
        let remote_calls = plan.remote_calls().to_string();

        match self.execute(plan).await {
            Ok(records) => {
                self.metrics.increment_resolutions();
                self.metrics.add_records_returned(records.len() as u64);
                scope.complete_with_fields(&[
                    ("records", records.len().to_string().as_str()),
                    ("remote_calls", remote_calls.as_str()),
                ]);
                Ok(records)
            }
            Err(e) => {
                scope.fail(&e.to_string(), e.is_caller_error());
                Err(e)
            }
        }
    }

    fn execute(
        &self,
        plan: DecompositionPlan,
    ) -> Pin<Box<dyn Future<Output = ResolveResult<Vec<Record>>> + Send + '_>> {
        Box::pin(async move {
            match plan {
                DecompositionPlan::Direct {
                    filter,
                    sort,
                    nesting_level,
                } => self.fetch(filter, sort, nesting_level).await,
                DecompositionPlan::Merge {
                    op,
                    nesting_level,
                    children,
                } => {
                    self.metrics.increment_decompositions();
                    trace_event(
                        Event::DecompositionSplit,
                        &[
                            ("op", op.as_str()),
                            ("children", children.len().to_string().as_str()),
                            ("nesting_level", nesting_level.to_string().as_str()),
                        ],
                    );

                    // First error wins; the remaining sibling futures are dropped,
                    // which cancels their in-flight requests.
                    let results =
                        try_join_all(children.into_iter().map(|child| self.execute(child)))
                            .await?;

                    let merged = merge(op, results);
                    trace_event(
                        Event::MergeComplete,
                        &[
                            ("op", op.as_str()),
                            ("records", merged.len().to_string().as_str()),
                        ],
                    );
                    Ok(merged)
                }
            }
        })
    }

    async fn fetch(
        &self,
        filter: Option<Filter>,
        sort: Option<ResolvedSort>,
        nesting_level: usize,
    ) -> ResolveResult<Vec<Record>> {
        self.metrics.increment_remote_calls();
        trace_event(
            Event::RemoteQuery,
            &[
                ("filtered", bool_str(filter.is_some())),
                ("sorted", bool_str(sort.is_some())),
                ("nesting_level", nesting_level.to_string().as_str()),
            ],
        );

        match self.client.query(QueryRequest::new(filter, sort)).await {
            Ok(response) => Ok(response.results),
            Err(e) => {
                self.metrics.increment_remote_failures();
                Logger::error(
                    Event::RemoteQueryFailed.as_str(),
                    &[("code", e.code()), ("reason", e.to_string().as_str())],
                );
                Err(e.into())
            }
        }
    }
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
