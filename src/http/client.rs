use std::net::ToSocketAddrs;

use reqwest::Client;
use url::Url;

use crate::config::RunConfig;
use crate::error::{HttpError, ValidationError};

const USER_AGENT: &str = concat!("didsmoke/", env!("CARGO_PKG_VERSION"));

/// Build the shared HTTP client. One client per run so the connection pool
/// is reused across all virtual users.
///
/// # Errors
///
/// Returns an error when the client cannot be constructed.
pub fn build_client(config: &RunConfig) -> Result<Client, HttpError> {
    Client::builder()
        .timeout(config.request_timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|err| HttpError::BuildClient { source: err })
}

/// Resolve the target host once before spawning any virtual user, so a bad
/// hostname fails the run at startup instead of producing a wall of
/// per-request errors.
///
/// # Errors
///
/// Returns an error when the URL has no host or the host does not resolve.
pub fn preflight_lookup(base_url: &Url) -> Result<(), ValidationError> {
    let host = base_url
        .host_str()
        .ok_or(ValidationError::UrlMissingHost)?
        .to_owned();
    let port = base_url.port_or_known_default().unwrap_or(80);

    let mut addrs = (host.as_str(), port)
        .to_socket_addrs()
        .map_err(|err| ValidationError::HostResolution {
            host: host.clone(),
            port,
            source: err,
        })?;
    if addrs.next().is_none() {
        return Err(ValidationError::NoAddresses { host });
    }
    Ok(())
}
