use std::path::Path;

use serde_json::json;

use crate::config::ScenarioKind;
use crate::error::SinkError;
use crate::metrics::SummarySnapshot;
use crate::thresholds::{RateBound, ThresholdResult};

use super::format::format_x100;

/// Write the structured results file. Rates are rendered as decimal strings
/// so the output stays stable across platforms.
///
/// # Errors
///
/// Returns an error when serialization or the file write fails.
pub async fn write_json(
    path: &Path,
    scenario: ScenarioKind,
    snapshot: &SummarySnapshot,
    results: &[ThresholdResult],
) -> Result<(), SinkError> {
    let passed = results.iter().all(|result| result.passed);
    let thresholds: Vec<_> = results
        .iter()
        .map(|result| {
            json!({
                "name": result.threshold.to_string(),
                "passed": result.passed,
            })
        })
        .collect();

    let duration_ms = u64::try_from(snapshot.duration.as_millis()).unwrap_or(u64::MAX);
    let document = json!({
        "scenario": scenario.as_str(),
        "state": {
            "test_run_duration_ms": duration_ms,
            "vus": snapshot.vus,
        },
        "metrics": {
            "http_reqs": {
                "count": snapshot.total_requests,
                "rate": format_x100(snapshot.avg_rps_x100),
            },
            "http_req_duration": {
                "avg": snapshot.avg_latency_ms,
                "min": snapshot.min_latency_ms,
                "max": snapshot.max_latency_ms,
                "p(95)": snapshot.p95_latency_ms,
            },
            "checks": {
                "passes": snapshot.checks_passed,
                "fails": snapshot.checks_failed,
            },
            "transport_errors": snapshot.transport_errors,
            "errors": {
                "fails": snapshot.error_failures,
                "total": snapshot.error_total,
                "rate": RateBound::from_per_10000(snapshot.error_rate_x10000).to_string(),
            },
        },
        "thresholds": thresholds,
        "passed": passed,
    });

    let bytes =
        serde_json::to_vec_pretty(&document).map_err(|err| SinkError::Serialize { source: err })?;
    tokio::fs::write(path, bytes)
        .await
        .map_err(|err| SinkError::Write {
            path: path.to_path_buf(),
            source: err,
        })
}
