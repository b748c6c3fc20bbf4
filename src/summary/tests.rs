use std::time::Duration;

use crate::config::ScenarioKind;
use crate::metrics::SummarySnapshot;
use crate::thresholds::{RateBound, Threshold, ThresholdResult};

use super::format::{format_percent_x10000, format_x100};
use super::write_json;

fn snapshot() -> SummarySnapshot {
    SummarySnapshot {
        duration: Duration::from_secs(60),
        vus: 10,
        total_requests: 600,
        transport_errors: 0,
        checks_passed: 1_790,
        checks_failed: 10,
        error_failures: 4,
        error_total: 600,
        min_latency_ms: 12,
        max_latency_ms: 480,
        avg_latency_ms: 85,
        p95_latency_ms: 230,
        avg_rps_x100: 1_000,
        error_rate_x10000: 66,
    }
}

#[test]
fn x100_formatting_pads_fraction_digits() {
    assert_eq!(format_x100(0), "0.00");
    assert_eq!(format_x100(5), "0.05");
    assert_eq!(format_x100(1_000), "10.00");
    assert_eq!(format_x100(12_345), "123.45");
}

#[test]
fn percent_formatting_treats_x10000_as_percent_x100() {
    // 66 / 10,000 of iterations failed, so 0.66%.
    assert_eq!(format_percent_x10000(66), "0.66");
    assert_eq!(format_percent_x10000(10_000), "100.00");
}

#[tokio::test]
async fn json_report_has_the_expected_shape() -> Result<(), String> {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("results.json");

    let results = [
        ThresholdResult {
            threshold: Threshold::DurationP95Below { ms: 500 },
            passed: true,
        },
        ThresholdResult {
            threshold: Threshold::ErrorRateBelow {
                bound: RateBound::from_per_10000(1_000),
            },
            passed: true,
        },
    ];

    write_json(&path, ScenarioKind::Resolve, &snapshot(), &results)
        .await
        .map_err(|err| err.to_string())?;

    let raw = std::fs::read_to_string(&path).map_err(|err| err.to_string())?;
    let document: serde_json::Value = serde_json::from_str(&raw).map_err(|err| err.to_string())?;

    assert_eq!(
        document.get("scenario").and_then(|value| value.as_str()),
        Some("resolve")
    );
    assert_eq!(
        document
            .pointer("/state/test_run_duration_ms")
            .and_then(serde_json::Value::as_u64),
        Some(60_000)
    );
    assert_eq!(
        document
            .pointer("/metrics/http_reqs/count")
            .and_then(serde_json::Value::as_u64),
        Some(600)
    );
    assert_eq!(
        document
            .pointer("/metrics/http_reqs/rate")
            .and_then(|value| value.as_str()),
        Some("10.00")
    );
    assert_eq!(
        document
            .pointer("/metrics/http_req_duration/p(95)")
            .and_then(serde_json::Value::as_u64),
        Some(230)
    );
    assert_eq!(
        document
            .pointer("/metrics/errors/rate")
            .and_then(|value| value.as_str()),
        Some("0.0066")
    );
    assert_eq!(
        document.get("passed").and_then(serde_json::Value::as_bool),
        Some(true)
    );
    let thresholds = document
        .get("thresholds")
        .and_then(|value| value.as_array())
        .ok_or_else(|| "thresholds not an array".to_owned())?;
    assert_eq!(thresholds.len(), 2);
    assert_eq!(
        thresholds
            .first()
            .and_then(|entry| entry.get("name"))
            .and_then(|value| value.as_str()),
        Some("http_req_duration: p(95)<500")
    );
    Ok(())
}

#[tokio::test]
async fn failed_threshold_flips_the_passed_flag() -> Result<(), String> {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("results.json");

    let results = [ThresholdResult {
        threshold: Threshold::DurationP95Below { ms: 100 },
        passed: false,
    }];
    write_json(&path, ScenarioKind::Registrar, &snapshot(), &results)
        .await
        .map_err(|err| err.to_string())?;

    let raw = std::fs::read_to_string(&path).map_err(|err| err.to_string())?;
    let document: serde_json::Value = serde_json::from_str(&raw).map_err(|err| err.to_string())?;
    assert_eq!(
        document.get("passed").and_then(serde_json::Value::as_bool),
        Some(false)
    );
    assert_eq!(
        document.get("scenario").and_then(|value| value.as_str()),
        Some("registrar")
    );
    Ok(())
}
