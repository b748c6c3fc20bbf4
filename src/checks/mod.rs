//! Response-correctness checks. Each check is a named predicate over one
//! completed exchange; check failures never abort an iteration, they only
//! feed the counters.
mod registrar;
mod resolve;


pub use registrar::{create_checks, deactivate_checks, health_checks};
pub use resolve::{deactivated_checks, resolution_checks, resolve_checks};

use crate::http::HttpExchange;

/// Outcome of one named check against one response.
#[derive(Debug, Clone, Copy)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub passed: bool,
}

pub(crate) type Predicate = fn(&HttpExchange) -> bool;

pub(crate) fn evaluate(
    exchange: &HttpExchange,
    checks: &[(&'static str, Predicate)],
) -> Vec<CheckOutcome> {
    checks
        .iter()
        .map(|(name, predicate)| CheckOutcome {
            name,
            passed: predicate(exchange),
        })
        .collect()
}

/// True when every check in the group passed. Group verdicts drive the
/// error rate; individual outcomes drive the per-check counters.
#[must_use]
pub fn all_passed(outcomes: &[CheckOutcome]) -> bool {
    outcomes.iter().all(|outcome| outcome.passed)
}
