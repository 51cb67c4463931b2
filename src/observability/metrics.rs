//! Metrics registry
//!
//! - Counters only, monotonic, reset on process start
//! - Atomic increments with Relaxed ordering

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for request handling and query resolution
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// HTTP requests received
    requests: AtomicU64,
    /// Resolutions that returned records
    resolutions: AtomicU64,
    /// Requests sent to the remote service
    remote_calls: AtomicU64,
    /// Remote requests that failed
    remote_failures: AtomicU64,
    /// Groups split because they exceeded the nesting limit
    decompositions: AtomicU64,
    /// Filters or sorts rejected by validation
    filters_rejected: AtomicU64,
    /// Records returned to callers
    records_returned: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_requests(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_resolutions(&self) {
        self.resolutions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_remote_calls(&self) {
        self.remote_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_remote_failures(&self) {
        self.remote_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_decompositions(&self) {
        self.decompositions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_filters_rejected(&self) {
        self.filters_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_records_returned(&self, count: u64) {
        self.records_returned.fetch_add(count, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            resolutions: self.resolutions.load(Ordering::Relaxed),
            remote_calls: self.remote_calls.load(Ordering::Relaxed),
            remote_failures: self.remote_failures.load(Ordering::Relaxed),
            decompositions: self.decompositions.load(Ordering::Relaxed),
            filters_rejected: self.filters_rejected.load(Ordering::Relaxed),
            records_returned: self.records_returned.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub resolutions: u64,
    pub remote_calls: u64,
    pub remote_failures: u64,
    pub decompositions: u64,
    pub filters_rejected: u64,
    pub records_returned: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_has_zero_values() {
        let registry = MetricsRegistry::new();
        assert_eq!(registry.snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_increment_counters() {
        let registry = MetricsRegistry::new();

        registry.increment_requests();
        registry.increment_resolutions();
        registry.increment_remote_calls();
        registry.increment_remote_calls();
        registry.increment_remote_failures();
        registry.increment_decompositions();
        registry.increment_filters_rejected();
        registry.add_records_returned(7);

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.requests, 1);
        assert_eq!(snapshot.resolutions, 1);
        assert_eq!(snapshot.remote_calls, 2);
        assert_eq!(snapshot.remote_failures, 1);
        assert_eq!(snapshot.decompositions, 1);
        assert_eq!(snapshot.filters_rejected, 1);
        assert_eq!(snapshot.records_returned, 7);
    }

    #[test]
    fn test_snapshot_json() {
        let registry = MetricsRegistry::new();
        registry.increment_remote_calls();

        let json = serde_json::to_value(registry.snapshot()).unwrap();
        assert_eq!(json["remote_calls"], 1);
        assert_eq!(json["decompositions"], 0);
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let registry = Arc::new(MetricsRegistry::new());
        let mut handles = vec![];

        for _ in 0..10 {
            let reg = Arc::clone(&registry);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    reg.increment_remote_calls();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.snapshot().remote_calls, 1000);
    }
}
