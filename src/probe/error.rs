//! Error types for the probe module.
//!
//! Only setup can fail here. Individual probe failures are not errors: they
//! become [`ProbeOutcome`](super::ProbeOutcome) values and the run continues.

use thiserror::Error;

/// Errors raised while preparing a probe run.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Base URL is empty after trimming.
    #[error("no base URL provided")]
    MissingBaseUrl,

    /// Base URL is not an absolute http(s) URL with a host.
    #[error("invalid base URL: {url} (expected http:// or https:// with a host)")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
    },

    /// Timeout is zero, negative, or not finite.
    #[error("invalid timeout: {seconds} seconds (must be a positive number)")]
    InvalidTimeout {
        /// The rejected value.
        seconds: f64,
    },

    /// Inter-request delay is negative or not finite.
    #[error("invalid delay: {seconds} seconds (must be zero or positive)")]
    InvalidDelay {
        /// The rejected value.
        seconds: f64,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("probe HTTP client construction failed: {source}")]
    Client {
        /// Underlying builder error.
        #[source]
        source: reqwest::Error,
    },
}

impl ProbeError {
    /// Creates an invalid base URL error.
    pub fn invalid_base_url(url: impl Into<String>) -> Self {
        Self::InvalidBaseUrl { url: url.into() }
    }
}
