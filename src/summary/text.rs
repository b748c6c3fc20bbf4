use crate::config::ScenarioKind;
use crate::metrics::SummarySnapshot;
use crate::thresholds::{Threshold, ThresholdResult};

use super::format::{format_percent_x10000, format_x100};

const CYAN: &str = "1;36";
const GREEN: &str = "1;32";
const RED: &str = "1;31";

fn paint(text: &str, code: &str, colors: bool) -> String {
    if colors {
        format!("\u{1b}[{}m{}\u{1b}[0m", code, text)
    } else {
        text.to_owned()
    }
}

/// Print the console summary. The error-rate line is red when the errors
/// threshold failed, green otherwise.
pub fn print_text(
    scenario: ScenarioKind,
    snapshot: &SummarySnapshot,
    results: &[ThresholdResult],
    no_color: bool,
) {
    let colors = !no_color;
    let (banner, footer) = match scenario {
        ScenarioKind::Resolve => (
            "=== Performance Summary ===",
            "================================",
        ),
        ScenarioKind::Registrar => (
            "=== Registrar Performance Summary ===",
            "=====================================",
        ),
    };

    println!();
    println!("{}", paint(banner, CYAN, colors));
    println!("Duration: {}s", snapshot.duration.as_secs());
    println!("VUs: {}", snapshot.vus);
    println!("Total Requests: {}", snapshot.total_requests);
    println!("Request Rate: {}/s", format_x100(snapshot.avg_rps_x100));
    println!(
        "Response Time - avg: {}ms, p95: {}ms",
        snapshot.avg_latency_ms, snapshot.p95_latency_ms
    );
    println!(
        "Min/Max Latency: {}ms / {}ms",
        snapshot.min_latency_ms, snapshot.max_latency_ms
    );
    println!(
        "Checks: {} passed, {} failed",
        snapshot.checks_passed, snapshot.checks_failed
    );
    println!("Transport Errors: {}", snapshot.transport_errors);

    let errors_failed = results.iter().any(|result| {
        matches!(result.threshold, Threshold::ErrorRateBelow { .. }) && !result.passed
    });
    let error_line = format!(
        "Error Rate: {}%",
        format_percent_x10000(snapshot.error_rate_x10000)
    );
    let error_color = if errors_failed { RED } else { GREEN };
    println!("{}", paint(&error_line, error_color, colors));

    for result in results {
        let verdict = if result.passed { "PASS" } else { "FAIL" };
        let code = if result.passed { GREEN } else { RED };
        println!(
            "{}: {}",
            result.threshold,
            paint(verdict, code, colors)
        );
    }
    println!("{}", paint(footer, CYAN, colors));
}
