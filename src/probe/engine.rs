//! Sequential probe loop.
//!
//! Walks the version list in order, one request at a time, hands every
//! result to a [`ProbeSink`] as soon as it is known, and applies the stop and
//! pacing policy from [`ProbeConfig`].

use tracing::{debug, info, instrument};

use crate::release::VersionTag;

use super::client::ProbeClient;
use super::config::ProbeConfig;
use super::error::ProbeError;
use super::outcome::{ProbeOutcome, ProbeResult};
use super::target::{BaseUrl, ProbeTarget};

/// One attempt about to be made, reported in verbose mode.
#[derive(Debug, Clone, Copy)]
pub struct ProbeAttempt<'a> {
    /// 1-based position in the version list.
    pub index: usize,
    /// Length of the version list.
    pub total: usize,
    /// Version about to be probed.
    pub version: &'a VersionTag,
}

/// Receives probe events as they happen.
///
/// An error from the sink aborts the run; probe failures never do.
pub trait ProbeSink {
    /// Error type raised by the sink (usually output I/O).
    type Error;

    /// Called before each request when verbose mode is on.
    ///
    /// # Errors
    ///
    /// Implementation-defined; aborts the run.
    fn on_attempt(&mut self, _attempt: ProbeAttempt<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called once per probed version, in order.
    ///
    /// # Errors
    ///
    /// Implementation-defined; aborts the run.
    fn on_result(&mut self, result: &ProbeResult) -> Result<(), Self::Error>;
}

impl<F, E> ProbeSink for F
where
    F: FnMut(&ProbeResult) -> Result<(), E>,
{
    type Error = E;

    fn on_result(&mut self, result: &ProbeResult) -> Result<(), E> {
        self(result)
    }
}

/// Tallies for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeSummary {
    /// Versions actually requested.
    pub probed: usize,
    /// Hits among them.
    pub hits: usize,
    /// Misses among them (any HTTP status other than 200/206).
    pub misses: usize,
    /// Probes that got no HTTP response.
    pub transport_failures: usize,
    /// First version that hit, if any.
    pub first_hit: Option<VersionTag>,
    /// Whether versions were left unprobed because of the stop policy.
    pub stopped_early: bool,
}

impl ProbeSummary {
    fn record(&mut self, result: &ProbeResult) {
        self.probed += 1;
        match &result.outcome {
            ProbeOutcome::Hit { .. } => {
                self.hits += 1;
                if self.first_hit.is_none() {
                    self.first_hit = Some(result.version.clone());
                }
            }
            ProbeOutcome::Miss { .. } => self.misses += 1,
            ProbeOutcome::TransportFailure { .. } => self.transport_failures += 1,
        }
    }
}

/// Drives probes for a version list against one base URL.
#[derive(Debug, Clone)]
pub struct ProbeEngine {
    client: ProbeClient,
    config: ProbeConfig,
}

impl ProbeEngine {
    /// Builds the engine and its HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Client`] if the HTTP client cannot be built.
    pub fn new(config: ProbeConfig) -> Result<Self, ProbeError> {
        let client = ProbeClient::new(&config)?;
        Ok(Self { client, config })
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Probes `versions` in order against `base`, streaming results into `sink`.
    ///
    /// # Errors
    ///
    /// Only sink errors are returned; individual probe failures are reported
    /// as results.
    #[instrument(skip(self, versions, sink), fields(base = %base, versions = versions.len()))]
    pub async fn run<S: ProbeSink>(
        &self,
        base: &BaseUrl,
        versions: &[VersionTag],
        sink: &mut S,
    ) -> Result<ProbeSummary, S::Error> {
        let total = versions.len();
        let mut summary = ProbeSummary::default();

        for (position, version) in versions.iter().enumerate() {
            if position > 0 && !self.config.delay.is_zero() {
                tokio::time::sleep(self.config.delay).await;
            }

            if self.config.verbose {
                sink.on_attempt(ProbeAttempt {
                    index: position + 1,
                    total,
                    version,
                })?;
            }

            let result = self.client.probe(&ProbeTarget::new(base, version)).await;
            summary.record(&result);
            if result.outcome.is_hit() {
                info!(version = %result.version, url = %result.url, "asset found");
            }
            sink.on_result(&result)?;

            if self.config.stop.should_stop_after(&result.outcome) {
                summary.stopped_early = position + 1 < total;
                debug!(remaining = total - position - 1, "stopping at first hit");
                break;
            }
        }

        Ok(summary)
    }
}
