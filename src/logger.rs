//! Global tracing setup for the CLI.
use tracing_subscriber::EnvFilter;

const FILTER_VARS: &[&str] = &["DIDSMOKE_LOG", "RUST_LOG"];

/// Install the global subscriber. An explicit `DIDSMOKE_LOG` (or `RUST_LOG`)
/// filter wins over the `-v` flag; `-v` raises the default level to debug.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = FILTER_VARS
        .iter()
        .find_map(|name| std::env::var(name).ok())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(default_level));

    let installed = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    if let Err(err) = installed {
        // A second init (tests) is harmless; keep the first subscriber.
        eprintln!("Logging already initialized: {}", err);
    }
}
