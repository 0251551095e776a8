// hvac-net/src/http.rs
use std::time::Duration;

use hvac_common::config::Config;
use hvac_common::error::{HvacError, Result};
use hvac_common::model::{FetchResult, ResponseBody};
use reqwest::Client;
use tracing::{debug, warn};

use crate::validation::validate_url;

/// Largest up-front reservation taken from a `Content-Length` header. Bigger
/// bodies still arrive, the buffer just grows as chunks come in.
const MAX_PREALLOCATE_BYTES: usize = 64 * 1024;

/// Performs bounded GET requests against the device.
///
/// Owns the transport for the life of the process: build it once at startup
/// and drop it at shutdown. Individual fetches share nothing else.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_timeout(config.timeout)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = build_http_client(timeout)?;
        debug!("HTTP transport ready (timeout {:?})", timeout);
        Ok(Self { client })
    }

    /// Fetches `url` and returns the complete body.
    ///
    /// Exactly one GET is sent: redirects are not followed, so a 3xx answer's
    /// own body is what comes back. Any exchange that completes inside the
    /// timeout counts as success, whatever the status code. Nothing is
    /// retried here.
    pub async fn fetch(&self, url: &str) -> FetchResult {
        validate_url(url)?;
        debug!("Fetching status page: {}", url);

        let mut response = self.client.get(url).send().await.map_err(|e| {
            debug!("HTTP request failed for {url}: {e}");
            HvacError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            debug!("Received HTTP status: {} for {}", status, url);
        } else {
            warn!("Received HTTP status {} for {}, reading the page anyway", status, url);
        }

        let hint = response
            .content_length()
            .and_then(|len| usize::try_from(len).ok())
            .unwrap_or(0)
            .min(MAX_PREALLOCATE_BYTES);
        let mut body = ResponseBody::with_capacity(hint)?;

        while let Some(chunk) = response.chunk().await.map_err(|e| {
            debug!("Failed to read response body from {url}: {e}");
            HvacError::from(e)
        })? {
            body.append(&chunk)?;
            tracing::trace!("Appended {} bytes ({} total)", chunk.len(), body.len());
        }

        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

fn build_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(|e| HvacError::Startup(format!("Failed to build HTTP client: {e}")))
}
