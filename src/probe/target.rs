//! Base URL normalization and candidate URL construction.

use std::fmt;

use url::Url;

use crate::release::VersionTag;

use super::constants::{ASSET_PATH_PREFIX, ASSET_PATH_SUFFIX};
use super::error::ProbeError;

/// Target server root: absolute http(s) URL without trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Trims whitespace and trailing slashes, then validates scheme and host.
    ///
    /// # Errors
    ///
    /// [`ProbeError::MissingBaseUrl`] when nothing is left after trimming,
    /// [`ProbeError::InvalidBaseUrl`] when the result is not an http(s) URL
    /// with a host.
    pub fn parse(raw: &str) -> Result<Self, ProbeError> {
        let trimmed = raw.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ProbeError::MissingBaseUrl);
        }
        let parsed = Url::parse(trimmed).map_err(|_| ProbeError::invalid_base_url(trimmed))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ProbeError::invalid_base_url(trimmed));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(ProbeError::invalid_base_url(trimmed));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the normalized URL string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One base URL paired with one version; yields exactly one candidate URL.
#[derive(Debug, Clone)]
pub struct ProbeTarget<'a> {
    base: &'a BaseUrl,
    version: &'a VersionTag,
}

impl<'a> ProbeTarget<'a> {
    /// Pairs a base URL with a version.
    #[must_use]
    pub fn new(base: &'a BaseUrl, version: &'a VersionTag) -> Self {
        Self { base, version }
    }

    /// The version being probed.
    #[must_use]
    pub fn version(&self) -> &'a VersionTag {
        self.version
    }

    /// `{base}/static/dist/admin/AdminInterface-{version}.js`
    #[must_use]
    pub fn candidate_url(&self) -> String {
        format!(
            "{}{ASSET_PATH_PREFIX}{}{ASSET_PATH_SUFFIX}",
            self.base, self.version
        )
    }
}
