use rand::seq::SliceRandom;
use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use tokio::sync::broadcast;
use tracing::debug;

use crate::checks::{all_passed, deactivated_checks, resolution_checks, resolve_checks};
use crate::http;

use super::IterationContext;

/// Well-known identifiers exercised by the resolve workload. Misses are
/// expected; 404 counts as a valid outcome.
const TEST_DIDS: &[&str] = &[
    "did:acc:alice",
    "did:acc:bob",
    "did:acc:company.example",
    "did:acc:test.user",
    "did:acc:beastmode.acme",
];

/// One resolve iteration: a single GET against a randomly chosen test DID.
/// Returns true when the VU should stop.
pub(super) async fn run_iteration(
    shutdown_rx: &mut broadcast::Receiver<()>,
    context: &IterationContext<'_>,
) -> bool {
    // Shutdown is observed only here, before the iteration issues its
    // request; a started exchange always runs to completion.
    let permit = tokio::select! {
        _ = shutdown_rx.recv() => return true,
        permit = context.limiter.acquire() => permit,
    };
    match permit {
        // Consume the permit; returning it would let budget recycle within
        // the same second.
        Ok(permit) => permit.forget(),
        Err(_closed) => return true,
    }

    let did = TEST_DIDS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("did:acc:alice");
    let mut url = context.config.base_url.clone();
    url.set_path("/resolve");
    url.set_query(Some(&format!("did={}", did)));

    let request = context
        .client
        .get(url)
        .header(ACCEPT, "application/did+json");

    match http::send(context.client, request).await {
        Ok(exchange) => {
            context.aggregator.record_request();
            context.aggregator.record_duration(exchange.elapsed);

            let outcomes = resolve_checks(&exchange);
            context.aggregator.record_checks(&outcomes);
            context.aggregator.record_check_outcome(all_passed(&outcomes));

            // Extra diagnostics groups; they never feed the error rate.
            if exchange.status == StatusCode::GONE {
                context
                    .aggregator
                    .record_checks(&deactivated_checks(&exchange));
            }
            if exchange.status == StatusCode::OK {
                context
                    .aggregator
                    .record_checks(&resolution_checks(&exchange));
            }
        }
        Err(err) => {
            debug!("Resolve request for {} failed: {}", did, err);
            context.aggregator.record_transport_error();
            context.aggregator.record_check_outcome(false);
        }
    }
    context.aggregator.record_iteration();

    false
}
