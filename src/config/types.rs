use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::args::parse_duration_arg;
use crate::thresholds::Threshold;

/// Optional file-based configuration (`didsmoke.toml` / `didsmoke.json`).
///
/// Every field is optional; env/CLI values win over the file, the file wins
/// over scenario defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub duration: Option<DurationValue>,
    pub vus: Option<usize>,
    pub rps: Option<u64>,
    pub resolver_url: Option<String>,
    pub registrar_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Option<DurationValue>,
    pub connect_timeout: Option<DurationValue>,
    pub out: Option<String>,
    pub no_color: Option<bool>,
    pub thresholds: Option<ThresholdsConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ThresholdsConfig {
    /// 95th-percentile latency bound in milliseconds.
    pub p95_ms: Option<u64>,
    /// Error-rate bound as a decimal string, e.g. "0.1".
    pub error_rate: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, String> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err("Duration must be > 0.".to_owned())
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => {
                parse_duration_arg(text).map_err(|err| err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioKind {
    Resolve,
    Registrar,
}

impl ScenarioKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ScenarioKind::Resolve => "resolve",
            ScenarioKind::Registrar => "registrar",
        }
    }

    /// Fixed inter-iteration pacing for this scenario.
    #[must_use]
    pub const fn pacing(self) -> Duration {
        match self {
            ScenarioKind::Resolve => Duration::from_secs(1),
            ScenarioKind::Registrar => Duration::from_secs(2),
        }
    }
}

/// Immutable configuration for one smoke run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub scenario: ScenarioKind,
    pub duration: Duration,
    pub vus: usize,
    pub rps: u64,
    pub base_url: Url,
    pub api_key: Option<String>,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub out_path: PathBuf,
    pub no_color: bool,
    pub thresholds: Vec<Threshold>,
}
