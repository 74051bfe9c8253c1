//! HTTP client issuing one partial-content request per candidate URL.

use futures_util::StreamExt;
use reqwest::Client;
use reqwest::header::RANGE;
use tracing::{debug, instrument, warn};

use crate::http_client::{HttpClientOptions, build_http_client};

use super::config::ProbeConfig;
use super::error::ProbeError;
use super::outcome::{BodyDigest, Checksum, ProbeOutcome, ProbeResult, is_hit_status};
use super::target::ProbeTarget;

/// Sends existence probes and classifies the responses.
///
/// Never returns an error per probe: transport problems become
/// [`ProbeOutcome::TransportFailure`].
#[derive(Debug, Clone)]
pub struct ProbeClient {
    client: Client,
    range_header: Option<String>,
}

impl ProbeClient {
    /// Builds the client from the timeout, range and redirect settings of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Client`] if the HTTP client cannot be built.
    pub fn new(config: &ProbeConfig) -> Result<Self, ProbeError> {
        let options = HttpClientOptions::probe(config.timeout, config.follow_redirects);
        let client = build_http_client(&options).map_err(|source| ProbeError::Client { source })?;
        Ok(Self {
            client,
            range_header: range_header(config.range_bytes),
        })
    }

    /// The `Range` header value sent with each probe, if any.
    #[must_use]
    pub fn range_header(&self) -> Option<&str> {
        self.range_header.as_deref()
    }

    /// Requests the candidate URL of `target` once and classifies the result.
    #[instrument(skip(self, target), fields(version = %target.version()))]
    pub async fn probe(&self, target: &ProbeTarget<'_>) -> ProbeResult {
        let url = target.candidate_url();
        let outcome = self.fetch_outcome(&url).await;
        ProbeResult::new(target.version().clone(), url, outcome)
    }

    async fn fetch_outcome(&self, url: &str) -> ProbeOutcome {
        let mut request = self.client.get(url);
        if let Some(range) = &self.range_header {
            request = request.header(RANGE, range);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(url, error = %e, "probe request failed");
                return ProbeOutcome::transport_failure(describe_transport_error(&e));
            }
        };

        let status = response.status().as_u16();
        match read_body(response).await {
            Ok((checksum, bytes)) => {
                debug!(url, status, bytes, %checksum, "probe response");
                ProbeOutcome::from_response(status, checksum, bytes)
            }
            Err(e) if is_hit_status(status) => {
                warn!(url, status, error = %e, "asset body stream failed");
                ProbeOutcome::transport_failure(describe_transport_error(&e))
            }
            Err(e) => {
                debug!(url, status, error = %e, "error body unreadable");
                ProbeOutcome::Miss {
                    status,
                    checksum: None,
                    bytes: 0,
                }
            }
        }
    }
}

/// Streams the body through the digest without buffering it.
async fn read_body(response: reqwest::Response) -> Result<(Checksum, u64), reqwest::Error> {
    let mut digest = BodyDigest::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        digest.update(&chunk?);
    }
    Ok(digest.finish())
}

/// `bytes=0-{n-1}`, or no header when `range_bytes` is zero.
fn range_header(range_bytes: u64) -> Option<String> {
    (range_bytes > 0).then(|| format!("bytes=0-{}", range_bytes - 1))
}

fn describe_transport_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "timeout".to_string()
    } else if error.is_connect() {
        format!("connection failed: {error}")
    } else if error.is_redirect() {
        format!("redirect limit exceeded: {error}")
    } else {
        error.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_range_header_values() {
        assert_eq!(range_header(1024).as_deref(), Some("bytes=0-1023"));
        assert_eq!(range_header(1).as_deref(), Some("bytes=0-0"));
        assert_eq!(range_header(0), None);
    }

    #[test]
    fn test_client_exposes_configured_range() {
        let client = ProbeClient::new(&ProbeConfig::default().with_range_bytes(16)).unwrap();
        assert_eq!(client.range_header(), Some("bytes=0-15"));
    }
}
