//! Run-wide metric aggregation shared across virtual users.
mod aggregator;
mod histogram;
mod types;


pub use aggregator::Aggregator;
pub use histogram::LatencyHistogram;
pub use types::SummarySnapshot;
