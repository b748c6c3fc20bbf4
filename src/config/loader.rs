use std::path::Path;

use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Checked in order when no explicit `--config` path is given.
const DEFAULT_CANDIDATES: &[&str] = &["didsmoke.toml", "didsmoke.json"];

#[derive(Clone, Copy)]
enum Format {
    Toml,
    Json,
}

impl Format {
    fn detect(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Format::Toml),
            Some("json") => Ok(Format::Json),
            Some(ext) => Err(ConfigError::UnsupportedExtension {
                ext: ext.to_owned(),
            }),
            None => Err(ConfigError::MissingExtension),
        }
    }

    fn parse(self, path: &Path, content: &str) -> Result<ConfigFile, ConfigError> {
        match self {
            Format::Toml => toml::from_str(content).map_err(|err| ConfigError::ParseToml {
                path: path.to_path_buf(),
                source: err,
            }),
            Format::Json => serde_json::from_str(content).map_err(|err| ConfigError::ParseJson {
                path: path.to_path_buf(),
                source: err,
            }),
        }
    }
}

/// Load the optional config file: the explicit `--config` path if given,
/// otherwise the first default candidate present in the working directory.
///
/// # Errors
///
/// Returns an error when the config file cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> AppResult<Option<ConfigFile>> {
    if let Some(explicit) = path {
        return load_config_file(Path::new(explicit)).map(Some);
    }
    for name in DEFAULT_CANDIDATES {
        let candidate = Path::new(*name);
        if candidate.exists() {
            return load_config_file(candidate).map(Some);
        }
    }
    Ok(None)
}

pub(crate) fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    let format = Format::detect(path).map_err(AppError::config)?;
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    format.parse(path, &content).map_err(AppError::config)
}
