use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use crate::http::HttpExchange;

use super::{CheckOutcome, Predicate, evaluate};

#[derive(Debug, Deserialize)]
struct RegisterBody {
    txids: Option<Value>,
    accounts: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct DeactivateBody {
    #[serde(rename = "didState")]
    did_state: Option<DidState>,
}

#[derive(Debug, Deserialize)]
struct DidState {
    action: Option<String>,
}

const HEALTH_CHECKS: &[(&str, Predicate)] = &[
    ("health check status is 200", |exchange| {
        exchange.status == StatusCode::OK
    }),
    ("health check response time < 100ms", |exchange| {
        exchange.latency_ms() < 100
    }),
];

const CREATE_CHECKS: &[(&str, Predicate)] = &[
    ("create status is 200 or 201", |exchange| {
        exchange.status == StatusCode::OK || exchange.status == StatusCode::CREATED
    }),
    ("create response time < 2s", |exchange| {
        exchange.latency_ms() < 2_000
    }),
    // Non-2xx responses pass this check; the status check already failed.
    ("create response has transaction info", |exchange| {
        if !exchange.is_2xx() {
            return true;
        }
        exchange.json::<RegisterBody>().is_some_and(|body| {
            let present = |value: &Option<Value>| {
                value.as_ref().is_some_and(|value| !value.is_null())
            };
            present(&body.txids) || present(&body.accounts)
        })
    }),
];

const DEACTIVATE_CHECKS: &[(&str, Predicate)] = &[
    ("deactivate status is 200", |exchange| {
        exchange.status == StatusCode::OK
    }),
    ("deactivate response time < 2s", |exchange| {
        exchange.latency_ms() < 2_000
    }),
    ("deactivate response has tombstone info", |exchange| {
        if exchange.status != StatusCode::OK {
            return true;
        }
        exchange
            .json::<DeactivateBody>()
            .and_then(|body| body.did_state)
            .and_then(|state| state.action)
            .is_some_and(|action| action == "deactivate")
    }),
];

/// Health-probe checks; a failed group skips the rest of the iteration.
#[must_use]
pub fn health_checks(exchange: &HttpExchange) -> Vec<CheckOutcome> {
    evaluate(exchange, HEALTH_CHECKS)
}

#[must_use]
pub fn create_checks(exchange: &HttpExchange) -> Vec<CheckOutcome> {
    evaluate(exchange, CREATE_CHECKS)
}

#[must_use]
pub fn deactivate_checks(exchange: &HttpExchange) -> Vec<CheckOutcome> {
    evaluate(exchange, DEACTIVATE_CHECKS)
}
