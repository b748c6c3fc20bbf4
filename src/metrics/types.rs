use std::time::Duration;

/// Frozen end-of-run view of the aggregated counters.
///
/// Rates are fixed-point integers: `avg_rps_x100` is requests/second scaled
/// by 100, `error_rate_x10000` is the failed-iteration fraction scaled by
/// 10,000.
#[derive(Debug, Clone)]
pub struct SummarySnapshot {
    pub duration: Duration,
    pub vus: usize,
    pub total_requests: u64,
    pub transport_errors: u64,
    pub checks_passed: u64,
    pub checks_failed: u64,
    pub error_failures: u64,
    pub error_total: u64,
    pub min_latency_ms: u64,
    pub max_latency_ms: u64,
    pub avg_latency_ms: u64,
    pub p95_latency_ms: u64,
    pub avg_rps_x100: u64,
    pub error_rate_x10000: u64,
}
