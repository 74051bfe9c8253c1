//! Probe run settings: request shape, stopping, pacing, diagnostics.

use std::time::Duration;

use super::constants::{DEFAULT_RANGE_BYTES, DEFAULT_TIMEOUT_SECS};
use super::error::ProbeError;
use super::outcome::ProbeOutcome;

/// When the engine stops walking the version list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopPolicy {
    /// Stop right after the first hit.
    #[default]
    FirstHit,
    /// Probe every version regardless of hits.
    Exhaustive,
}

impl StopPolicy {
    /// Picks [`StopPolicy::Exhaustive`] when `all` is set.
    #[must_use]
    pub fn from_exhaustive_flag(all: bool) -> Self {
        if all { Self::Exhaustive } else { Self::FirstHit }
    }

    /// Whether the run ends after `outcome`.
    #[must_use]
    pub fn should_stop_after(self, outcome: &ProbeOutcome) -> bool {
        match self {
            Self::FirstHit => outcome.is_hit(),
            Self::Exhaustive => false,
        }
    }
}

/// Settings for [`ProbeEngine`](super::ProbeEngine).
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Partial-content window; zero requests the full body.
    pub range_bytes: u64,
    /// Follow redirects before classifying.
    pub follow_redirects: bool,
    /// Stopping rule.
    pub stop: StopPolicy,
    /// Pause between successive requests, never before the first.
    pub delay: Duration,
    /// Announce each attempt on the diagnostic stream.
    pub verbose: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS),
            range_bytes: DEFAULT_RANGE_BYTES,
            follow_redirects: true,
            stop: StopPolicy::FirstHit,
            delay: Duration::ZERO,
            verbose: false,
        }
    }
}

impl ProbeConfig {
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_range_bytes(mut self, range_bytes: u64) -> Self {
        self.range_bytes = range_bytes;
        self
    }

    #[must_use]
    pub fn with_follow_redirects(mut self, follow_redirects: bool) -> Self {
        self.follow_redirects = follow_redirects;
        self
    }

    #[must_use]
    pub fn with_stop_policy(mut self, stop: StopPolicy) -> Self {
        self.stop = stop;
        self
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Converts a CLI timeout in seconds. Must be positive and finite.
///
/// # Errors
///
/// Returns [`ProbeError::InvalidTimeout`] otherwise.
pub fn timeout_from_secs(seconds: f64) -> Result<Duration, ProbeError> {
    if seconds.is_finite() && seconds > 0.0 {
        Duration::try_from_secs_f64(seconds).map_err(|_| ProbeError::InvalidTimeout { seconds })
    } else {
        Err(ProbeError::InvalidTimeout { seconds })
    }
}

/// Converts a CLI delay in seconds. Zero disables pacing.
///
/// # Errors
///
/// Returns [`ProbeError::InvalidDelay`] for negative or non-finite values.
pub fn delay_from_secs(seconds: f64) -> Result<Duration, ProbeError> {
    if seconds.is_finite() && seconds >= 0.0 {
        Duration::try_from_secs_f64(seconds).map_err(|_| ProbeError::InvalidDelay { seconds })
    } else {
        Err(ProbeError::InvalidDelay { seconds })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::probe::Checksum;

    #[test]
    fn test_default_config() {
        let config = ProbeConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.range_bytes, 1024);
        assert!(config.follow_redirects);
        assert_eq!(config.stop, StopPolicy::FirstHit);
        assert_eq!(config.delay, Duration::ZERO);
        assert!(!config.verbose);
    }

    #[test]
    fn test_stop_policy_from_flag() {
        assert_eq!(StopPolicy::from_exhaustive_flag(false), StopPolicy::FirstHit);
        assert_eq!(StopPolicy::from_exhaustive_flag(true), StopPolicy::Exhaustive);
    }

    #[test]
    fn test_stop_policy_decisions() {
        let hit = ProbeOutcome::from_response(200, Checksum::of(b"x"), 1);
        let miss = ProbeOutcome::from_response(404, Checksum::of(b""), 0);
        let failure = ProbeOutcome::transport_failure("timeout");

        assert!(StopPolicy::FirstHit.should_stop_after(&hit));
        assert!(!StopPolicy::FirstHit.should_stop_after(&miss));
        assert!(!StopPolicy::FirstHit.should_stop_after(&failure));
        assert!(!StopPolicy::Exhaustive.should_stop_after(&hit));
    }

    #[test]
    fn test_timeout_from_secs() {
        assert_eq!(timeout_from_secs(2.5).unwrap(), Duration::from_millis(2500));
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(timeout_from_secs(bad).is_err(), "{bad} must be rejected");
        }
    }

    #[test]
    fn test_delay_from_secs() {
        assert_eq!(delay_from_secs(0.0).unwrap(), Duration::ZERO);
        assert_eq!(delay_from_secs(0.25).unwrap(), Duration::from_millis(250));
        for bad in [-0.5, f64::NAN, f64::NEG_INFINITY] {
            assert!(delay_from_secs(bad).is_err(), "{bad} must be rejected");
        }
    }
}
