//! Shared handler state

use std::sync::Arc;
use std::time::Instant;

use crate::executor::QueryResolver;
use crate::observability::MetricsRegistry;

/// State shared across handlers
pub struct AppState {
    pub resolver: QueryResolver,
    pub metrics: Arc<MetricsRegistry>,
    /// Nesting limit for requests that do not carry one
    pub max_nesting_level: usize,
    pub started: Instant,
}

impl AppState {
    /// Wraps a resolver, sharing its counters with the HTTP layer
    pub fn new(resolver: QueryResolver, max_nesting_level: usize) -> Self {
        let metrics = Arc::new(MetricsRegistry::new());
        Self {
            resolver: resolver.with_metrics(metrics.clone()),
            metrics,
            max_nesting_level,
            started: Instant::now(),
        }
    }
}
