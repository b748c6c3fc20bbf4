use std::time::{Duration, Instant};

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::HttpError;

/// One completed request/response pair, with the body fully read so the
/// elapsed time covers the whole exchange.
#[derive(Debug)]
pub struct HttpExchange {
    pub method: Method,
    pub url: Url,
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
    pub elapsed: Duration,
}

impl HttpExchange {
    #[must_use]
    pub fn latency_ms(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }

    #[must_use]
    pub fn is_2xx(&self) -> bool {
        self.status.is_success()
    }

    /// Deserialize the body, treating malformed JSON as absent.
    #[must_use]
    pub fn json<T: DeserializeOwned>(&self) -> Option<T> {
        serde_json::from_str(&self.body).ok()
    }
}

/// Execute a prepared request and read the full body, timing the whole
/// exchange.
///
/// # Errors
///
/// Returns an error when the request cannot be built or no HTTP response is
/// received (connect failure, timeout, broken stream).
pub async fn send(
    client: &reqwest::Client,
    request: RequestBuilder,
) -> Result<HttpExchange, HttpError> {
    let built = request
        .build()
        .map_err(|err| HttpError::BuildRequest { source: err })?;
    let method = built.method().clone();
    let url = built.url().clone();

    let start = Instant::now();
    let response = client
        .execute(built)
        .await
        .map_err(|err| HttpError::Execute { source: err })?;

    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = response
        .text()
        .await
        .map_err(|err| HttpError::Execute { source: err })?;
    let elapsed = start.elapsed();

    Ok(HttpExchange {
        method,
        url,
        status,
        content_type,
        body,
        elapsed,
    })
}
