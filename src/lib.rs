//! Release Probe Core Library
//!
//! Fingerprints the version of a deployed web application by checking which
//! versioned static asset the server actually serves.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`release`] - Release tag fetching, normalization and deduplication
//! - [`probe`] - Sequential asset probes with partial-content requests
//! - [`report`] - Streaming tab-separated output
//! - [`http_client`] - Shared HTTP client construction policy
//!
//! Data flows strictly one way: the release source produces a
//! [`VersionList`], the [`ProbeEngine`] walks it one request at a time, and
//! each [`ProbeResult`] is handed to the [`Reporter`] as soon as it exists.

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod http_client;
pub mod probe;
pub mod release;
pub mod report;
mod user_agent;

// Re-export commonly used types
pub use probe::{
    BaseUrl, Checksum, ProbeConfig, ProbeEngine, ProbeError, ProbeOutcome, ProbeResult,
    ProbeSink, ProbeSummary, StopPolicy,
};
pub use release::{
    DEFAULT_API_BASE, DEFAULT_REPO, GithubReleaseSource, ReleaseError, ReleaseSourceConfig,
    VersionList, VersionTag,
};
pub use report::{HEADER, ReportError, Reporter};
