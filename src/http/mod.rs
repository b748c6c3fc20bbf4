//! HTTP plumbing: client construction, request execution, and the
//! requests-per-second ceiling.
mod client;
mod exchange;
mod rate;


pub use client::{build_client, preflight_lookup};
pub use exchange::{HttpExchange, send};
pub use rate::spawn_rate_limiter;
