use std::sync::Arc;

use reqwest::Client;
use tokio::sync::broadcast;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::{RunConfig, ScenarioKind};
use crate::http::spawn_rate_limiter;
use crate::metrics::Aggregator;

use super::{IterationContext, registrar, resolve};

/// Drive the configured scenario to completion: spawn the rate controller,
/// the duration timer, and one looping task per virtual user, then wait for
/// every VU to drain. In-flight iterations finish before a VU exits, so the
/// run can overshoot the configured duration by at most one iteration.
pub async fn run(config: &Arc<RunConfig>, client: &Client, aggregator: &Arc<Aggregator>) {
    let (shutdown_tx, _) = broadcast::channel::<()>(1);
    let limiter = spawn_rate_limiter(config.rps);

    let mut handles = Vec::with_capacity(config.vus);
    for vu_id in 1..=config.vus {
        let config = Arc::clone(config);
        let client = client.clone();
        let aggregator = Arc::clone(aggregator);
        let limiter = Arc::clone(&limiter);
        let mut shutdown_rx = shutdown_tx.subscribe();

        handles.push(tokio::spawn(async move {
            let context = IterationContext {
                client: &client,
                config: &config,
                limiter: &limiter,
                aggregator: &aggregator,
            };
            let mut counter: u64 = 0;
            loop {
                counter = counter.saturating_add(1);
                let should_stop = match config.scenario {
                    ScenarioKind::Resolve => {
                        resolve::run_iteration(&mut shutdown_rx, &context).await
                    }
                    ScenarioKind::Registrar => {
                        registrar::run_iteration(&mut shutdown_rx, &context, vu_id, counter).await
                    }
                };
                if should_stop {
                    break;
                }
                tokio::select! {
                    _ = shutdown_rx.recv() => break,
                    () = sleep(config.scenario.pacing()) => {},
                }
            }
            debug!("VU {} drained after {} iterations", vu_id, counter);
        }));
    }

    // Every VU has subscribed; the timer signal cannot be missed now.
    let timer_tx = shutdown_tx.clone();
    let duration = config.duration;
    tokio::spawn(async move {
        sleep(duration).await;
        drop(timer_tx.send(()));
    });

    for handle in handles {
        if let Err(err) = handle.await {
            warn!("Virtual user task failed: {}", err);
        }
    }
}
