//! Decision counters for engine observability

use parking_lot::RwLock;

/// Engine decision metrics
#[derive(Debug, Clone, Default)]
pub struct EngineMetrics {
    /// Total number of permission checks
    pub total_requests: u64,

    /// Number of allowed decisions
    pub allowed_decisions: u64,

    /// Number of denied decisions
    pub denied_decisions: u64,

    /// Checks made with no actor available
    pub unauthenticated_requests: u64,

    /// Cache hits
    pub cache_hits: u64,

    /// Cache misses
    pub cache_misses: u64,
}

impl EngineMetrics {
    /// Calculate cache hit rate
    pub fn cache_hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }

    /// Calculate allow rate
    pub fn allow_rate(&self) -> f64 {
        let total = self.allowed_decisions + self.denied_decisions;
        if total == 0 {
            0.0
        } else {
            self.allowed_decisions as f64 / total as f64
        }
    }
}

/// Thread-safe metrics collector
#[derive(Debug, Default)]
pub struct MetricsCollector {
    metrics: RwLock<EngineMetrics>,
}

impl MetricsCollector {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cache_hit(&self) {
        self.metrics.write().cache_hits += 1;
    }

    pub fn record_cache_miss(&self) {
        self.metrics.write().cache_misses += 1;
    }

    /// Record a decision for an authenticated actor
    pub fn record_decision(&self, allowed: bool) {
        let mut metrics = self.metrics.write();
        metrics.total_requests += 1;

        if allowed {
            metrics.allowed_decisions += 1;
        } else {
            metrics.denied_decisions += 1;
        }
    }

    /// Record a check made without an actor (always a denial)
    pub fn record_unauthenticated(&self) {
        let mut metrics = self.metrics.write();
        metrics.total_requests += 1;
        metrics.denied_decisions += 1;
        metrics.unauthenticated_requests += 1;
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> EngineMetrics {
        self.metrics.read().clone()
    }

    /// Reset all metrics
    pub fn reset(&self) {
        *self.metrics.write() = EngineMetrics::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let collector = MetricsCollector::new();
        let metrics = collector.snapshot();

        assert_eq!(metrics.total_requests, 0);
        assert_eq!(metrics.cache_hits, 0);
        assert_eq!(metrics.allow_rate(), 0.0);
    }

    #[test]
    fn test_record_decision() {
        let collector = MetricsCollector::new();

        collector.record_decision(true);
        collector.record_decision(false);
        collector.record_decision(true);
        collector.record_unauthenticated();

        let metrics = collector.snapshot();
        assert_eq!(metrics.total_requests, 4);
        assert_eq!(metrics.allowed_decisions, 2);
        assert_eq!(metrics.denied_decisions, 2);
        assert_eq!(metrics.unauthenticated_requests, 1);
        assert!((metrics.allow_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_record_cache() {
        let collector = MetricsCollector::new();

        collector.record_cache_hit();
        collector.record_cache_hit();
        collector.record_cache_miss();

        let metrics = collector.snapshot();
        assert_eq!(metrics.cache_hits, 2);
        assert_eq!(metrics.cache_misses, 1);
        assert!((metrics.cache_hit_rate() - 0.666).abs() < 0.01);
    }

    #[test]
    fn test_reset() {
        let collector = MetricsCollector::new();

        collector.record_decision(true);
        collector.record_cache_hit();
        collector.reset();

        let metrics = collector.snapshot();
        assert_eq!(metrics.total_requests, 0);
        assert_eq!(metrics.cache_hits, 0);
    }
}
