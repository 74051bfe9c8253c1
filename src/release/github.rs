//! GitHub REST releases client.
//!
//! Walks `GET /repos/{owner}/{name}/releases` page by page, following the
//! `Link: rel="next"` header, and folds every `tag_name` into a [`VersionList`].

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, LINK};
use serde::Deserialize;
use tracing::{debug, info, instrument, trace, warn};
use url::Url;

use crate::http_client::{HttpClientOptions, build_http_client};

use super::error::ReleaseError;
use super::link::next_page_url;
use super::tag::VersionList;

/// Public GitHub API root.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Repository probed when none is given on the command line.
pub const DEFAULT_REPO: &str = "goauthentik/authentik";

/// Releases requested per page (GitHub maximum).
const PER_PAGE: u32 = 100;

/// Pause between page requests to stay polite with the API.
const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(50);

/// Upper bound on pages walked before pagination is considered broken.
pub const DEFAULT_MAX_PAGES: usize = 1000;

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const GITHUB_API_VERSION_HEADER: &str = "x-github-api-version";
const GITHUB_API_VERSION: &str = "2022-11-28";
const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// One entry of the releases listing. Only the fields the tool reads.
#[derive(Debug, Deserialize)]
struct GithubRelease {
    tag_name: Option<String>,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    prerelease: bool,
}

/// Settings for [`GithubReleaseSource`].
#[derive(Debug, Clone)]
pub struct ReleaseSourceConfig {
    /// Repository as `owner/name`.
    pub repo: String,
    /// API root, without trailing slash.
    pub api_base: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Optional bearer token to raise the rate limit.
    pub token: Option<String>,
    /// Pause between page requests.
    pub page_delay: Duration,
    /// Pages fetched before the walk fails with [`ReleaseError::TooManyPages`].
    pub max_pages: usize,
}

impl ReleaseSourceConfig {
    /// Creates a config for `repo` against the public API with default pacing.
    pub fn new(repo: impl Into<String>, timeout: Duration) -> Self {
        Self {
            repo: repo.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout,
            token: None,
            page_delay: DEFAULT_PAGE_DELAY,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Overrides the API root (GitHub Enterprise, tests).
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Attaches a bearer token. Blank tokens are ignored.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Overrides the pause between page requests.
    #[must_use]
    pub fn with_page_delay(mut self, page_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self
    }

    /// Overrides the pagination cap. Values below one are raised to one.
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }
}

/// Fetches and normalizes release tags for one repository.
pub struct GithubReleaseSource {
    client: Client,
    first_page: Url,
    token: Option<String>,
    page_delay: Duration,
    max_pages: usize,
}

impl std::fmt::Debug for GithubReleaseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubReleaseSource")
            .field("first_page", &self.first_page.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("page_delay", &self.page_delay)
            .field("max_pages", &self.max_pages)
            .finish_non_exhaustive()
    }
}

impl GithubReleaseSource {
    /// Validates the config and builds the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::InvalidRepo`] or [`ReleaseError::InvalidApiUrl`]
    /// for malformed input, and [`ReleaseError::Client`] if the client cannot be built.
    #[instrument(level = "debug", skip(config), fields(repo = %config.repo))]
    pub fn new(config: ReleaseSourceConfig) -> Result<Self, ReleaseError> {
        let first_page = first_page_url(&config.api_base, &config.repo)?;
        let client = build_http_client(&HttpClientOptions::api(config.timeout))
            .map_err(|source| ReleaseError::Client { source })?;
        Ok(Self {
            client,
            first_page,
            token: config.token,
            page_delay: config.page_delay,
            max_pages: config.max_pages,
        })
    }

    /// URL of the first listing page.
    #[must_use]
    pub fn first_page_url(&self) -> &str {
        self.first_page.as_str()
    }

    /// Walks every page and returns the deduplicated versions in API order.
    ///
    /// All-or-nothing: any failing page discards what was collected so far.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError`] on transport failure, non-success status,
    /// undecodable body, or runaway pagination.
    #[instrument(skip(self), fields(first_page = %self.first_page))]
    pub async fn fetch_versions(&self) -> Result<VersionList, ReleaseError> {
        let mut versions = VersionList::new();
        let mut next = Some(self.first_page.to_string());
        let mut pages = 0usize;

        while let Some(url) = next.take() {
            if pages == self.max_pages {
                return Err(ReleaseError::TooManyPages { pages });
            }
            if pages > 0 && !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }
            pages += 1;

            let (releases, next_url) = self.fetch_page(&url).await?;
            if releases.is_empty() {
                debug!(page = pages, "empty releases page, stopping");
                break;
            }

            let mut added = 0usize;
            for release in &releases {
                let Some(raw) = release.tag_name.as_deref() else {
                    continue;
                };
                trace!(tag = raw, draft = release.draft, prerelease = release.prerelease, "release tag");
                if versions.push_raw(raw) {
                    added += 1;
                }
            }
            debug!(page = pages, releases = releases.len(), added, "fetched releases page");

            next = next_url;
        }

        info!(pages, versions = versions.len(), "release tags fetched");
        Ok(versions)
    }

    /// Whether `url` shares scheme, host and port with the first page.
    fn is_api_origin(&self, url: &str) -> bool {
        Url::parse(url).is_ok_and(|parsed| parsed.origin() == self.first_page.origin())
    }

    async fn fetch_page(
        &self,
        url: &str,
    ) -> Result<(Vec<GithubRelease>, Option<String>), ReleaseError> {
        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .header(GITHUB_API_VERSION_HEADER, GITHUB_API_VERSION);
        if let Some(token) = &self.token {
            if self.is_api_origin(url) {
                request = request.header(AUTHORIZATION, format!("Bearer {token}"));
            } else {
                warn!(url, "next page is outside the API origin; sending it without the token");
            }
        }

        let response = request
            .send()
            .await
            .map_err(|e| ReleaseError::transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            let code = status.as_u16();
            if is_rate_limited(code, response.headers()) {
                warn!(status = code, "release API rate limit exhausted");
                return Err(ReleaseError::rate_limited(url, code));
            }
            return Err(ReleaseError::http_status(url, code));
        }

        let next_url = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(next_page_url);

        let releases = response.json::<Vec<GithubRelease>>().await.map_err(|e| {
            if e.is_decode() {
                ReleaseError::Decode {
                    url: url.to_string(),
                    source: e,
                }
            } else {
                ReleaseError::transport(url, e)
            }
        })?;

        Ok((releases, next_url))
    }
}

fn is_rate_limited(status: u16, headers: &HeaderMap) -> bool {
    status == 429
        || (status == 403
            && headers
                .get(RATE_LIMIT_REMAINING_HEADER)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v.trim() == "0"))
}

/// Checks that `repo` looks like `owner/name`.
fn validate_repo(repo: &str) -> Result<(&str, &str), ReleaseError> {
    let (owner, name) = repo
        .split_once('/')
        .ok_or_else(|| ReleaseError::invalid_repo(repo))?;
    let valid_part = |part: &str| {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    };
    if valid_part(owner) && valid_part(name) {
        Ok((owner, name))
    } else {
        Err(ReleaseError::invalid_repo(repo))
    }
}

fn first_page_url(api_base: &str, repo: &str) -> Result<Url, ReleaseError> {
    let (owner, name) = validate_repo(repo)?;
    let invalid = || ReleaseError::InvalidApiUrl {
        url: api_base.to_string(),
    };

    let mut url = Url::parse(api_base.trim_end_matches('/')).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    url.path_segments_mut()
        .map_err(|()| invalid())?
        .pop_if_empty()
        .extend(["repos", owner, name, "releases"]);
    url.query_pairs_mut()
        .append_pair("per_page", &PER_PAGE.to_string())
        .append_pair("page", "1");
    Ok(url)
}
