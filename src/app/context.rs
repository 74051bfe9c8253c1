//! Run context built once from CLI arguments before any network traffic.

use thiserror::Error;

use release_probe_core::probe::{delay_from_secs, timeout_from_secs};
use release_probe_core::{
    BaseUrl, GithubReleaseSource, ProbeConfig, ProbeEngine, ProbeError, ReleaseError,
    ReleaseSourceConfig, StopPolicy,
};

use crate::cli::Args;

/// Everything a run needs, validated up front.
///
/// Owned by `runtime::run` and dropped when it returns, so the HTTP clients
/// and their connection pools live exactly as long as the run.
#[derive(Debug)]
pub(crate) struct RunContext {
    pub(crate) base_url: BaseUrl,
    pub(crate) repo: String,
    pub(crate) has_token: bool,
    pub(crate) source: GithubReleaseSource,
    pub(crate) engine: ProbeEngine,
    pub(crate) include_not_found: bool,
}

/// Why the context could not be built.
#[derive(Debug, Error)]
pub(crate) enum SetupError {
    #[error(transparent)]
    Probe(#[from] ProbeError),
    #[error(transparent)]
    Release(#[from] ReleaseError),
}

impl SetupError {
    /// Whether the operator supplied bad input, as opposed to an environment failure.
    pub(crate) fn is_input_error(&self) -> bool {
        match self {
            Self::Probe(ProbeError::Client { .. }) | Self::Release(ReleaseError::Client { .. }) => {
                false
            }
            Self::Probe(_) => true,
            Self::Release(e) => matches!(
                e,
                ReleaseError::InvalidRepo { .. } | ReleaseError::InvalidApiUrl { .. }
            ),
        }
    }
}

impl RunContext {
    /// Validates arguments and builds both HTTP clients.
    pub(crate) fn from_args(args: &Args) -> Result<Self, SetupError> {
        let base_url = BaseUrl::parse(args.base_url.as_deref().unwrap_or_default())?;
        let timeout = timeout_from_secs(args.timeout)?;
        let delay = delay_from_secs(args.sleep)?;

        let release_config = ReleaseSourceConfig::new(args.repo.trim(), timeout)
            .with_api_base(args.api_url.trim())
            .with_token(args.github_token.clone());
        let has_token = release_config.token.is_some();
        let source = GithubReleaseSource::new(release_config)?;

        let probe_config = ProbeConfig::default()
            .with_timeout(timeout)
            .with_delay(delay)
            .with_range_bytes(args.range_bytes)
            .with_follow_redirects(!args.no_follow_redirects)
            .with_stop_policy(StopPolicy::from_exhaustive_flag(args.all))
            .with_verbose(args.verbose > 0);
        let engine = ProbeEngine::new(probe_config)?;

        Ok(Self {
            base_url,
            repo: args.repo.trim().to_string(),
            has_token,
            source,
            engine,
            include_not_found: args.include_404,
        })
    }
}
