//! Shared HTTP client construction policy.
//!
//! Both the release API client and the probe client come from here so they
//! agree on User-Agent, compression and timeout handling. They differ only in
//! redirect policy: the API client always follows, the probe client follows
//! only when asked.

use std::time::Duration;

use reqwest::Client;
use reqwest::redirect::Policy;

use crate::user_agent;

/// Maximum redirect hops followed when redirects are enabled.
pub const MAX_REDIRECTS: usize = 10;

/// Options for [`build_http_client`].
#[derive(Debug, Clone, Copy)]
pub struct HttpClientOptions {
    /// Total per-request timeout (connect + headers + body).
    pub timeout: Duration,
    /// Follow up to [`MAX_REDIRECTS`] redirects when set.
    pub follow_redirects: bool,
    /// Transparently decompress gzip bodies.
    pub gzip: bool,
}

impl HttpClientOptions {
    /// Settings for JSON API traffic.
    #[must_use]
    pub fn api(timeout: Duration) -> Self {
        Self {
            timeout,
            follow_redirects: true,
            gzip: true,
        }
    }

    /// Settings for asset probes.
    ///
    /// Compression stays off so byte counts and checksums describe the bytes
    /// the server actually sent for the requested range.
    #[must_use]
    pub fn probe(timeout: Duration, follow_redirects: bool) -> Self {
        Self {
            timeout,
            follow_redirects,
            gzip: false,
        }
    }
}

/// Builds a reqwest client with the shared policy.
///
/// # Errors
///
/// Returns the builder error when TLS or resolver initialisation fails.
pub fn build_http_client(options: &HttpClientOptions) -> Result<Client, reqwest::Error> {
    let redirect = if options.follow_redirects {
        Policy::limited(MAX_REDIRECTS)
    } else {
        Policy::none()
    };
    Client::builder()
        .connect_timeout(options.timeout)
        .timeout(options.timeout)
        .gzip(options.gzip)
        .redirect(redirect)
        .user_agent(user_agent::default_user_agent())
        .build()
}
