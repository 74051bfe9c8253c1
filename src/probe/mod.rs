//! Probe engine for versioned static assets.
//!
//! For each candidate version the engine requests
//! `{base}/static/dist/admin/AdminInterface-{version}.js` with a small
//! `Range` header, classifies the response, and decides whether to go on.
//!
//! # Classification
//!
//! - [`ProbeOutcome::Hit`] - 206 (range honored) or 200 (range ignored)
//! - [`ProbeOutcome::Miss`] - any other HTTP status, with the error body checksum
//! - [`ProbeOutcome::TransportFailure`] - no HTTP response at all
//!
//! # Example
//!
//! ```no_run
//! use release_probe_core::probe::{BaseUrl, ProbeConfig, ProbeEngine, ProbeResult};
//! use release_probe_core::release::VersionTag;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = ProbeEngine::new(ProbeConfig::default())?;
//! let base = BaseUrl::parse("https://sso.example.com")?;
//! let versions: Vec<VersionTag> = ["2024.2.1", "2024.2.0"]
//!     .into_iter()
//!     .filter_map(VersionTag::new)
//!     .collect();
//! let mut print = |result: &ProbeResult| -> Result<(), std::io::Error> {
//!     println!("{} {:?}", result.version, result.outcome.status());
//!     Ok(())
//! };
//! let summary = engine.run(&base, &versions, &mut print).await?;
//! println!("hits: {}", summary.hits);
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
pub mod constants;
mod engine;
mod error;
mod outcome;
mod target;

pub use client::ProbeClient;
pub use config::{ProbeConfig, StopPolicy, delay_from_secs, timeout_from_secs};
pub use engine::{ProbeAttempt, ProbeEngine, ProbeSink, ProbeSummary};
pub use error::ProbeError;
pub use outcome::{BodyDigest, Checksum, ProbeOutcome, ProbeResult, is_hit_status};
pub use target::{BaseUrl, ProbeTarget};
