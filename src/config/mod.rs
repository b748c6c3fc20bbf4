//! Run configuration: defaults, optional config file, env/CLI overrides.
mod apply;
mod loader;
mod types;


pub use apply::build_run_config;
pub use loader::load_config;
pub use types::{ConfigFile, DurationValue, RunConfig, ScenarioKind, ThresholdsConfig};
