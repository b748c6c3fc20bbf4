use reqwest::RequestBuilder;
use serde_json::{Value, json};
use tokio::sync::broadcast;
use tracing::debug;

use crate::checks::{all_passed, create_checks, deactivate_checks, health_checks};
use crate::http::{self, HttpExchange};

use super::IterationContext;

/// Placeholder key material; the registrar only validates shape.
const TEST_PUBLIC_KEY_MULTIBASE: &str = "z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK";

pub(super) fn did_name(counter: u64, vu_id: usize) -> String {
    format!("did:acc:perf-test-{}-{}", counter, vu_id)
}

pub(super) fn create_payload(did: &str) -> Value {
    json!({
        "didDocument": {
            "@context": ["https://www.w3.org/ns/did/v1"],
            "id": did,
            "verificationMethod": [{
                "id": format!("{}#key-1", did),
                "type": "Ed25519VerificationKey2020",
                "controller": did,
                "publicKeyMultibase": TEST_PUBLIC_KEY_MULTIBASE,
            }],
            "authentication": [format!("{}#key-1", did)],
        }
    })
}

fn with_auth(request: RequestBuilder, api_key: Option<&str>) -> RequestBuilder {
    if let Some(key) = api_key {
        return request.bearer_auth(key);
    }
    request
}

enum StepResult {
    Completed(HttpExchange),
    Failed,
}

/// Run a single request with the rate permit already consumed, recording
/// its latency or transport failure.
async fn execute(
    context: &IterationContext<'_>,
    request: RequestBuilder,
    label: &'static str,
) -> StepResult {
    match http::send(context.client, request).await {
        Ok(exchange) => {
            context.aggregator.record_request();
            context.aggregator.record_duration(exchange.elapsed);
            StepResult::Completed(exchange)
        }
        Err(err) => {
            debug!("Registrar {} request failed: {}", label, err);
            context.aggregator.record_transport_error();
            StepResult::Failed
        }
    }
}

/// Acquire one rate permit and run a single request. Every registrar call
/// is metered so the rps ceiling covers all three endpoints.
async fn run_step(
    context: &IterationContext<'_>,
    request: RequestBuilder,
    label: &'static str,
) -> StepResult {
    match context.limiter.acquire().await {
        // Consume the permit; returning it would let budget recycle within
        // the same second.
        Ok(permit) => permit.forget(),
        Err(_closed) => return StepResult::Failed,
    }
    execute(context, request, label).await
}

/// One registrar iteration: health probe, then create, then deactivate of
/// the DID just created. A failed health probe skips the write calls; a
/// failed create skips the deactivate. Returns true when the VU should stop.
pub(super) async fn run_iteration(
    shutdown_rx: &mut broadcast::Receiver<()>,
    context: &IterationContext<'_>,
    vu_id: usize,
    counter: u64,
) -> bool {
    // Shutdown is observed only here, before the iteration issues its first
    // request; a started iteration drains through all its steps.
    let permit = tokio::select! {
        _ = shutdown_rx.recv() => return true,
        permit = context.limiter.acquire() => permit,
    };
    match permit {
        Ok(permit) => permit.forget(),
        Err(_closed) => return true,
    }

    let did = did_name(counter, vu_id);
    let api_key = context.config.api_key.as_deref();

    let mut health_url = context.config.base_url.clone();
    health_url.set_path("/healthz");
    let health = match execute(context, context.client.get(health_url), "health").await {
        StepResult::Completed(exchange) => exchange,
        StepResult::Failed => {
            context.aggregator.record_check_outcome(false);
            context.aggregator.record_iteration();
            return false;
        }
    };

    let health_outcomes = health_checks(&health);
    context.aggregator.record_checks(&health_outcomes);
    let healthy = all_passed(&health_outcomes);
    context.aggregator.record_check_outcome(healthy);
    if !healthy {
        // Unhealthy service: do not pile write traffic on top of it.
        context.aggregator.record_iteration();
        return false;
    }

    let mut register_url = context.config.base_url.clone();
    register_url.set_path("/register");
    let create_request = with_auth(
        context.client.post(register_url).json(&create_payload(&did)),
        api_key,
    );
    let create = match run_step(context, create_request, "create").await {
        StepResult::Completed(exchange) => exchange,
        StepResult::Failed => {
            context.aggregator.record_check_outcome(false);
            context.aggregator.record_iteration();
            return false;
        }
    };

    let create_outcomes = create_checks(&create);
    context.aggregator.record_checks(&create_outcomes);
    context
        .aggregator
        .record_check_outcome(all_passed(&create_outcomes));

    // Only deactivate what was actually created.
    if create.is_2xx() {
        let mut deactivate_url = context.config.base_url.clone();
        deactivate_url.set_path("/native/deactivate");
        let deactivate_request = with_auth(
            context
                .client
                .post(deactivate_url)
                .json(&json!({ "did": did, "deactivate": true })),
            api_key,
        );
        match run_step(context, deactivate_request, "deactivate").await {
            StepResult::Completed(exchange) => {
                let outcomes = deactivate_checks(&exchange);
                context.aggregator.record_checks(&outcomes);
                context.aggregator.record_check_outcome(all_passed(&outcomes));
            }
            StepResult::Failed => {
                context.aggregator.record_check_outcome(false);
            }
        }
    }

    context.aggregator.record_iteration();
    false
}
