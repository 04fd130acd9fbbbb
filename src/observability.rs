//! Observability stubs (metrics, tracing)

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics handle for recording counters/gauges
#[derive(Debug, Default)]
pub struct Metrics {
    manifests_served: AtomicU64,
    dispatches: AtomicU64,
    legacy_requests: AtomicU64,
    upstream_calls: AtomicU64,
    upstream_failures: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn manifest_served(&self) {
        self.manifests_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn dispatch(&self) {
        self.dispatches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn legacy_request(&self) {
        self.legacy_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn upstream_call(&self) {
        self.upstream_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn upstream_failure(&self) {
        self.upstream_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            manifests_served: self.manifests_served.load(Ordering::Relaxed),
            dispatches: self.dispatches.load(Ordering::Relaxed),
            legacy_requests: self.legacy_requests.load(Ordering::Relaxed),
            upstream_calls: self.upstream_calls.load(Ordering::Relaxed),
            upstream_failures: self.upstream_failures.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub manifests_served: u64,
    pub dispatches: u64,
    pub legacy_requests: u64,
    pub upstream_calls: u64,
    pub upstream_failures: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let metrics = Metrics::new();
        metrics.dispatch();
        metrics.dispatch();
        metrics.upstream_call();
        metrics.upstream_failure();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.dispatches, 2);
        assert_eq!(snapshot.upstream_calls, 1);
        assert_eq!(snapshot.upstream_failures, 1);
        assert_eq!(snapshot.manifests_served, 0);
        assert_eq!(snapshot.legacy_requests, 0);
    }
}
