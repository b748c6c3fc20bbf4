use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::time::interval;

/// Spawn the requests-per-second ceiling: a semaphore topped back up to
/// `rps` permits once per second. Each VU acquires one permit per request,
/// so unused budget never carries over into the next second.
///
/// The controller task runs until the runtime shuts down.
#[must_use]
pub fn spawn_rate_limiter(rps: u64) -> Arc<Semaphore> {
    let limiter = Arc::new(Semaphore::new(0));
    let controller = Arc::clone(&limiter);
    tokio::spawn(async move {
        let rate_per_sec = usize::try_from(rps).unwrap_or(usize::MAX);
        controller.add_permits(rate_per_sec);
        let mut rate_tick = interval(Duration::from_secs(1));
        loop {
            rate_tick.tick().await;
            let available = controller.available_permits();
            if available < rate_per_sec {
                controller.add_permits(rate_per_sec.saturating_sub(available));
            }
        }
    });
    limiter
}
