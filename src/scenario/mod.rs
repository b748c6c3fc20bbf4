//! The two workloads and the virtual-user orchestrator that drives them.
mod registrar;
mod resolve;
mod runner;

#[cfg(test)]
mod tests;

pub use runner::run;

use std::sync::Arc;

use reqwest::Client;
use tokio::sync::Semaphore;

use crate::config::RunConfig;
use crate::metrics::Aggregator;

/// Everything one virtual user needs for an iteration.
pub(crate) struct IterationContext<'ctx> {
    pub(crate) client: &'ctx Client,
    pub(crate) config: &'ctx RunConfig,
    pub(crate) limiter: &'ctx Arc<Semaphore>,
    pub(crate) aggregator: &'ctx Aggregator,
}
