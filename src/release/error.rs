//! Error types for the release source client.
//!
//! Every variant is fatal to a run: without a version list there is nothing
//! to probe, so callers surface these as "release source unavailable".

use thiserror::Error;

/// Errors raised while fetching release tags.
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// Repository identifier is not of the form `owner/name`.
    #[error("release source unavailable: invalid repository identifier {repo:?} (expected owner/name)")]
    InvalidRepo {
        /// The rejected identifier.
        repo: String,
    },

    /// The configured API base URL cannot be parsed.
    #[error("release source unavailable: invalid API URL {url}")]
    InvalidApiUrl {
        /// The rejected URL.
        url: String,
    },

    /// Network-level failure (DNS, connect, TLS).
    #[error("release source unavailable: network error fetching {url}: {source}")]
    Network {
        /// The page URL being fetched.
        url: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// A page request exceeded the configured timeout.
    #[error("release source unavailable: timeout fetching {url}")]
    Timeout {
        /// The page URL being fetched.
        url: String,
    },

    /// The API answered with a non-success status.
    #[error("release source unavailable: HTTP {status} fetching {url}")]
    HttpStatus {
        /// The page URL being fetched.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The API refused the request because the rate limit is exhausted.
    #[error("release source unavailable: API rate limit exceeded (HTTP {status}) fetching {url}")]
    RateLimited {
        /// The page URL being fetched.
        url: String,
        /// HTTP status code (403 or 429).
        status: u16,
    },

    /// The page body was not the expected JSON array of releases.
    #[error("release source unavailable: malformed release listing from {url}: {source}")]
    Decode {
        /// The page URL being fetched.
        url: String,
        /// Underlying decode error.
        #[source]
        source: reqwest::Error,
    },

    /// The API kept announcing further pages past the safety cap.
    #[error("release source unavailable: pagination did not terminate after {pages} pages")]
    TooManyPages {
        /// Pages fetched before giving up.
        pages: usize,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("release source unavailable: HTTP client construction failed: {source}")]
    Client {
        /// Underlying builder error.
        #[source]
        source: reqwest::Error,
    },
}

impl ReleaseError {
    /// Creates a transport error, splitting out timeouts.
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { url: url.into() }
        } else {
            Self::Network {
                url: url.into(),
                source,
            }
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a rate-limit error.
    pub fn rate_limited(url: impl Into<String>, status: u16) -> Self {
        Self::RateLimited {
            url: url.into(),
            status,
        }
    }

    /// Creates an invalid-repository error.
    pub fn invalid_repo(repo: impl Into<String>) -> Self {
        Self::InvalidRepo { repo: repo.into() }
    }

    /// Whether supplying an API token is likely to fix this failure.
    #[must_use]
    pub fn suggests_token(&self) -> bool {
        match self {
            Self::RateLimited { .. } => true,
            Self::HttpStatus { status, .. } => matches!(status, 401 | 403 | 429),
            _ => false,
        }
    }
}
