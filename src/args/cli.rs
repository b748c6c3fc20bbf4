use clap::{Args, Parser, Subcommand};
use std::time::Duration;

use super::parsers::{parse_duration_arg, parse_positive_u64, parse_positive_usize};
use super::types::{PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Performance smoke-test harness for DID resolver/registrar services - virtual users, request-rate caps, response checks, and threshold-gated summaries."
)]
pub struct SmokeArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Smoke-test the DID resolver (single-shot resolve per iteration)
    Resolve(ResolveArgs),
    /// Smoke-test the DID registrar (health probe, create, deactivate)
    Registrar(RegistrarArgs),
}

impl Command {
    #[must_use]
    pub const fn common(&self) -> &CommonArgs {
        match self {
            Command::Resolve(args) => &args.common,
            Command::Registrar(args) => &args.common,
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct ResolveArgs {
    /// Resolver base URL (default: http://127.0.0.1:8080)
    #[arg(long = "url", short = 'u', env = "RESOLVER_URL")]
    pub url: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args, Clone)]
pub struct RegistrarArgs {
    /// Registrar base URL (default: http://127.0.0.1:8081)
    #[arg(long = "url", short = 'u', env = "REGISTRAR_URL")]
    pub url: Option<String>,

    /// Bearer credential sent on registrar write calls
    #[arg(long = "api-key", env = "API_KEY")]
    pub api_key: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args, Clone)]
pub struct CommonArgs {
    /// Run duration (supports ms/s/m/h; default: 60s)
    #[arg(long = "duration", short = 't', env = "DURATION", value_parser = parse_duration_arg)]
    pub duration: Option<Duration>,

    /// Number of virtual users (default: 10 resolve, 5 registrar)
    #[arg(long = "vus", env = "VUS", value_parser = parse_positive_usize)]
    pub vus: Option<PositiveUsize>,

    /// Requests-per-second ceiling across all VUs (default: 100 resolve, 10 registrar)
    #[arg(long = "rps", env = "RPS", value_parser = parse_positive_u64)]
    pub rps: Option<PositiveU64>,

    /// Request timeout (supports ms/s/m/h)
    #[arg(long = "timeout", value_parser = parse_duration_arg)]
    pub timeout: Option<Duration>,

    /// Timeout for establishing a new connection (supports ms/s/m/h)
    #[arg(long = "connect-timeout", value_parser = parse_duration_arg)]
    pub connect_timeout: Option<Duration>,

    /// Path for the structured results file
    /// (default: <scenario>-smoke-results.json)
    #[arg(long = "out", short = 'o')]
    pub out: Option<String>,

    /// Path to config file (TOML/JSON). Defaults to ./didsmoke.toml or
    /// ./didsmoke.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Disable ANSI colors in the summary
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Enable verbose logging (sets log level to debug unless overridden by
    /// DIDSMOKE_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
