use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::args::{Command, PositiveU64, PositiveUsize};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};
use crate::thresholds::{RateBound, Threshold};

use super::types::{ConfigFile, DurationValue, RunConfig, ScenarioKind};

const DEFAULT_DURATION: Duration = Duration::from_secs(60);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

const RESOLVE_URL: &str = "http://127.0.0.1:8080";
const REGISTRAR_URL: &str = "http://127.0.0.1:8081";

const RESOLVE_VUS: usize = 10;
const REGISTRAR_VUS: usize = 5;
const RESOLVE_RPS: u64 = 100;
const REGISTRAR_RPS: u64 = 10;

const RESOLVE_P95_MS: u64 = 500;
const REGISTRAR_P95_MS: u64 = 2_000;
// rate<0.1 for resolve, rate<0.2 for registrar, as parts per 10,000.
const RESOLVE_ERROR_BOUND: u64 = 1_000;
const REGISTRAR_ERROR_BOUND: u64 = 2_000;

struct ScenarioDefaults {
    url: &'static str,
    vus: usize,
    rps: u64,
    p95_ms: u64,
    error_bound: u64,
    out: &'static str,
}

const fn defaults_for(kind: ScenarioKind) -> ScenarioDefaults {
    match kind {
        ScenarioKind::Resolve => ScenarioDefaults {
            url: RESOLVE_URL,
            vus: RESOLVE_VUS,
            rps: RESOLVE_RPS,
            p95_ms: RESOLVE_P95_MS,
            error_bound: RESOLVE_ERROR_BOUND,
            out: "resolve-smoke-results.json",
        },
        ScenarioKind::Registrar => ScenarioDefaults {
            url: REGISTRAR_URL,
            vus: REGISTRAR_VUS,
            rps: REGISTRAR_RPS,
            p95_ms: REGISTRAR_P95_MS,
            error_bound: REGISTRAR_ERROR_BOUND,
            out: "registrar-smoke-results.json",
        },
    }
}

/// Assemble the immutable run configuration from scenario defaults, the
/// optional config file, and env/CLI overrides (highest precedence).
///
/// # Errors
///
/// Returns an error when a config-file value is malformed or the resulting
/// base URL cannot be parsed.
pub fn build_run_config(command: &Command, file: Option<&ConfigFile>) -> AppResult<RunConfig> {
    let (kind, cli_url, api_key) = match command {
        Command::Resolve(args) => (ScenarioKind::Resolve, args.url.clone(), None),
        Command::Registrar(args) => (
            ScenarioKind::Registrar,
            args.url.clone(),
            args.api_key.clone(),
        ),
    };
    let common = command.common();
    let defaults = defaults_for(kind);

    let file_url = file.and_then(|config| match kind {
        ScenarioKind::Resolve => config.resolver_url.clone(),
        ScenarioKind::Registrar => config.registrar_url.clone(),
    });
    let url_text = cli_url
        .or(file_url)
        .unwrap_or_else(|| defaults.url.to_owned());
    let base_url = match Url::parse(&url_text) {
        Ok(url) => url,
        Err(err) => {
            return Err(AppError::validation(ValidationError::InvalidBaseUrl {
                url: url_text,
                source: err,
            }));
        }
    };

    let duration = resolve_duration(
        common.duration,
        file.and_then(|config| config.duration.as_ref()),
        "duration",
        DEFAULT_DURATION,
    )?;
    let request_timeout = resolve_duration(
        common.timeout,
        file.and_then(|config| config.timeout.as_ref()),
        "timeout",
        DEFAULT_REQUEST_TIMEOUT,
    )?;
    let connect_timeout = resolve_duration(
        common.connect_timeout,
        file.and_then(|config| config.connect_timeout.as_ref()),
        "connect_timeout",
        DEFAULT_CONNECT_TIMEOUT,
    )?;

    let vus = common
        .vus
        .map(PositiveUsize::get)
        .or_else(|| file.and_then(|config| config.vus))
        .unwrap_or(defaults.vus)
        .max(1);
    let rps = common
        .rps
        .map(PositiveU64::get)
        .or_else(|| file.and_then(|config| config.rps))
        .unwrap_or(defaults.rps)
        .max(1);

    let api_key = api_key
        .or_else(|| file.and_then(|config| config.api_key.clone()))
        .filter(|key| !key.is_empty());

    let out_path = common
        .out
        .clone()
        .or_else(|| file.and_then(|config| config.out.clone()))
        .map_or_else(|| PathBuf::from(defaults.out), PathBuf::from);

    let no_color =
        common.no_color || file.and_then(|config| config.no_color).unwrap_or(false);

    let thresholds = resolve_thresholds(file, &defaults)?;

    Ok(RunConfig {
        scenario: kind,
        duration,
        vus,
        rps,
        base_url,
        api_key,
        request_timeout,
        connect_timeout,
        out_path,
        no_color,
        thresholds,
    })
}

fn resolve_duration(
    cli: Option<Duration>,
    file: Option<&DurationValue>,
    field: &'static str,
    default: Duration,
) -> AppResult<Duration> {
    if let Some(duration) = cli {
        return Ok(duration);
    }
    if let Some(value) = file {
        let duration = value
            .to_duration()
            .map_err(|message| AppError::config(ConfigError::InvalidField { field, message }))?;
        return Ok(duration);
    }
    Ok(default)
}

fn resolve_thresholds(
    file: Option<&ConfigFile>,
    defaults: &ScenarioDefaults,
) -> AppResult<Vec<Threshold>> {
    let overrides = file.and_then(|config| config.thresholds.as_ref());

    let p95_ms = overrides
        .and_then(|thresholds| thresholds.p95_ms)
        .unwrap_or(defaults.p95_ms);

    let error_bound = match overrides.and_then(|thresholds| thresholds.error_rate.as_deref()) {
        Some(text) => RateBound::parse(text).map_err(|err| {
            AppError::config(ConfigError::InvalidField {
                field: "thresholds.error_rate",
                message: err.to_string(),
            })
        })?,
        None => RateBound::from_per_10000(defaults.error_bound),
    };

    Ok(vec![
        Threshold::DurationP95Below { ms: p95_ms },
        Threshold::ErrorRateBelow { bound: error_bound },
    ])
}
