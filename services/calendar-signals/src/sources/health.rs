use crate::types::SourceHealth;
use chrono::{TimeZone, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free request bookkeeping so `health()` never touches the network
#[derive(Debug, Default)]
pub struct HealthTracker {
    /// Millis since epoch of the last successful fetch
    last_success_ms: AtomicU64,
    /// Millis since epoch of the last failed fetch
    last_failure_ms: AtomicU64,
    success_count: AtomicU64,
    failure_count: AtomicU64,
    total_latency_ms: AtomicU64,
}

impl HealthTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&self, latency_ms: u64) {
        let now_ms = Utc::now().timestamp_millis() as u64;
        self.last_success_ms.store(now_ms, Ordering::Relaxed);
        self.total_latency_ms.fetch_add(latency_ms, Ordering::Relaxed);
        self.success_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        let now_ms = Utc::now().timestamp_millis() as u64;
        self.last_failure_ms.store(now_ms, Ordering::Relaxed);
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Healthy once something succeeded and nothing failed since
    pub fn is_healthy(&self) -> bool {
        let last_success = self.last_success_ms.load(Ordering::Relaxed);
        let last_failure = self.last_failure_ms.load(Ordering::Relaxed);
        last_success > 0 && (last_failure == 0 || last_success >= last_failure)
    }

    pub fn success_rate(&self) -> f64 {
        let successes = self.success_count.load(Ordering::Relaxed);
        let failures = self.failure_count.load(Ordering::Relaxed);
        let total = successes + failures;
        if total == 0 {
            return 1.0; // nothing attempted yet
        }
        successes as f64 / total as f64
    }

    pub fn avg_latency_ms(&self) -> u64 {
        let successes = self.success_count.load(Ordering::Relaxed);
        if successes == 0 {
            return 0;
        }
        self.total_latency_ms.load(Ordering::Relaxed) / successes
    }

    pub fn snapshot(&self, source: &str, last_error: Option<String>) -> SourceHealth {
        let last_success_ms = self.last_success_ms.load(Ordering::Relaxed);
        let last_success = if last_success_ms > 0 {
            Utc.timestamp_millis_opt(last_success_ms as i64).single()
        } else {
            None
        };

        SourceHealth {
            source: source.to_string(),
            is_healthy: self.is_healthy(),
            last_success,
            last_error,
            success_rate: self.success_rate(),
            avg_latency_ms: self.avg_latency_ms(),
        }
    }
}
