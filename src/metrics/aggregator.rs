use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::checks::CheckOutcome;

use super::histogram::LatencyHistogram;
use super::types::SummarySnapshot;

/// Lock-free counters shared by every virtual user, plus a mutex-guarded
/// latency histogram. One instance lives for the whole run; `snapshot`
/// freezes it after the last VU has drained.
#[derive(Debug)]
pub struct Aggregator {
    requests: AtomicU64,
    transport_errors: AtomicU64,
    checks_passed: AtomicU64,
    checks_failed: AtomicU64,
    error_failures: AtomicU64,
    error_total: AtomicU64,
    latency_sum_ms: AtomicU64,
    min_latency_ms: AtomicU64,
    max_latency_ms: AtomicU64,
    histogram: Mutex<Option<LatencyHistogram>>,
}

impl Aggregator {
    #[must_use]
    pub fn new() -> Self {
        let histogram = match LatencyHistogram::new() {
            Ok(histogram) => Some(histogram),
            Err(err) => {
                tracing::warn!("Failed to initialize latency histogram: {}", err);
                None
            }
        };
        Self {
            requests: AtomicU64::new(0),
            transport_errors: AtomicU64::new(0),
            checks_passed: AtomicU64::new(0),
            checks_failed: AtomicU64::new(0),
            error_failures: AtomicU64::new(0),
            error_total: AtomicU64::new(0),
            latency_sum_ms: AtomicU64::new(0),
            min_latency_ms: AtomicU64::new(u64::MAX),
            max_latency_ms: AtomicU64::new(0),
            histogram: Mutex::new(histogram),
        }
    }

    /// Record one completed HTTP request.
    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request that never produced an HTTP response.
    pub fn record_transport_error(&self) {
        self.transport_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the latency of one completed request.
    pub fn record_duration(&self, elapsed: Duration) {
        let latency_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self.latency_sum_ms
            .fetch_add(latency_ms, Ordering::Relaxed);
        self.min_latency_ms.fetch_min(latency_ms, Ordering::Relaxed);
        self.max_latency_ms.fetch_max(latency_ms, Ordering::Relaxed);

        match self.histogram.lock() {
            Ok(mut guard) => {
                if let Some(histogram) = guard.as_mut()
                    && let Err(err) = histogram.record(latency_ms)
                {
                    tracing::warn!("Disabling latency histogram after error: {}", err);
                    *guard = None;
                }
            }
            Err(_poisoned) => {
                tracing::warn!("Latency histogram lock poisoned; sample dropped");
            }
        }
    }

    /// Record per-check pass/fail counters.
    pub fn record_checks(&self, outcomes: &[CheckOutcome]) {
        for outcome in outcomes {
            if outcome.passed {
                self.checks_passed.fetch_add(1, Ordering::Relaxed);
            } else {
                self.checks_failed.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Record one error-rate failure event. This is the only path that
    /// increments the `errors` failure count.
    pub fn record_check_outcome(&self, passed: bool) {
        if !passed {
            self.error_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record that one iteration issued at least one request. Called exactly
    /// once per such iteration so the error rate is per-iteration, not
    /// per-request.
    pub fn record_iteration(&self) {
        self.error_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Freeze the counters into an immutable snapshot.
    #[must_use]
    pub fn snapshot(&self, duration: Duration, vus: usize) -> SummarySnapshot {
        let total_requests = self.requests.load(Ordering::Relaxed);
        let latency_sum_ms = self.latency_sum_ms.load(Ordering::Relaxed);
        let error_failures = self.error_failures.load(Ordering::Relaxed);
        let error_total = self.error_total.load(Ordering::Relaxed);

        let min_latency_ms = if total_requests > 0 {
            self.min_latency_ms.load(Ordering::Relaxed)
        } else {
            0
        };
        let avg_latency_ms = if total_requests > 0 {
            latency_sum_ms
                .checked_div(total_requests)
                .unwrap_or(0)
        } else {
            0
        };

        let p95_latency_ms = match self.histogram.lock() {
            Ok(guard) => guard.as_ref().map_or(0, LatencyHistogram::p95),
            Err(_poisoned) => {
                tracing::warn!("Latency histogram lock poisoned; reporting p95 as 0");
                0
            }
        };

        let duration_ms = duration.as_millis().max(1);
        let avg_rps_x100 = if total_requests > 0 {
            let scaled = u128::from(total_requests)
                .saturating_mul(100_000)
                .checked_div(duration_ms)
                .unwrap_or(0);
            u64::try_from(scaled).unwrap_or(u64::MAX)
        } else {
            0
        };

        let error_rate_x10000 = if error_total > 0 {
            let scaled = u128::from(error_failures)
                .saturating_mul(10_000)
                .checked_div(u128::from(error_total))
                .unwrap_or(0);
            u64::try_from(scaled).unwrap_or(u64::MAX)
        } else {
            0
        };

        SummarySnapshot {
            duration,
            vus,
            total_requests,
            transport_errors: self.transport_errors.load(Ordering::Relaxed),
            checks_passed: self.checks_passed.load(Ordering::Relaxed),
            checks_failed: self.checks_failed.load(Ordering::Relaxed),
            error_failures,
            error_total,
            min_latency_ms,
            max_latency_ms: self.max_latency_ms.load(Ordering::Relaxed),
            avg_latency_ms,
            p95_latency_ms,
            avg_rps_x100,
            error_rate_x10000,
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}
