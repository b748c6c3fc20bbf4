use reqwest::StatusCode;
use serde::Deserialize;

use crate::http::HttpExchange;

use super::{CheckOutcome, Predicate, evaluate};

#[derive(Debug, Deserialize)]
struct ResolveBody {
    #[serde(rename = "didDocument")]
    did_document: Option<DidDocument>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DidDocument {
    id: Option<String>,
}

const RESOLVE_CHECKS: &[(&str, Predicate)] = &[
    ("status is 200 or 404", |exchange| {
        exchange.status == StatusCode::OK || exchange.status == StatusCode::NOT_FOUND
    }),
    ("response time < 500ms", |exchange| {
        exchange.latency_ms() < 500
    }),
    ("has content-type header", |exchange| {
        exchange.content_type.is_some()
    }),
];

const DEACTIVATED_CHECKS: &[(&str, Predicate)] = &[
    ("deactivated response has proper content-type", |exchange| {
        exchange
            .content_type
            .as_deref()
            .is_some_and(|value| value.contains("application/json"))
    }),
    ("deactivated response has error field", |exchange| {
        exchange
            .json::<ResolveBody>()
            .and_then(|body| body.error)
            .is_some_and(|error| error == "deactivated")
    }),
];

const RESOLUTION_CHECKS: &[(&str, Predicate)] = &[("valid DID resolution result", |exchange| {
    exchange
        .json::<ResolveBody>()
        .and_then(|body| body.did_document)
        .and_then(|document| document.id)
        .is_some_and(|id| !id.is_empty())
})];

/// The base check group every resolve response goes through. Only this
/// group's verdict feeds the error rate.
#[must_use]
pub fn resolve_checks(exchange: &HttpExchange) -> Vec<CheckOutcome> {
    evaluate(exchange, RESOLVE_CHECKS)
}

/// Extra checks applied when the resolver answers 410 Gone.
#[must_use]
pub fn deactivated_checks(exchange: &HttpExchange) -> Vec<CheckOutcome> {
    evaluate(exchange, DEACTIVATED_CHECKS)
}

/// Extra checks applied when the resolver answers 200 OK.
#[must_use]
pub fn resolution_checks(exchange: &HttpExchange) -> Vec<CheckOutcome> {
    evaluate(exchange, RESOLUTION_CHECKS)
}
