//! Release source client.
//!
//! Produces the ordered, duplicate-free list of candidate versions that the
//! probe engine walks. Tags come from the GitHub releases API and are
//! normalized (`version/` and a single leading `v` stripped) before dedup.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use release_probe_core::release::{GithubReleaseSource, ReleaseSourceConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ReleaseSourceConfig::new("goauthentik/authentik", Duration::from_secs(30));
//! let versions = GithubReleaseSource::new(config)?.fetch_versions().await?;
//! println!("{} versions", versions.len());
//! # Ok(())
//! # }
//! ```

mod error;
mod github;
mod link;
mod tag;

pub use error::ReleaseError;
pub use github::{
    DEFAULT_API_BASE, DEFAULT_MAX_PAGES, DEFAULT_REPO, GithubReleaseSource, ReleaseSourceConfig,
};
pub use link::next_page_url;
pub use tag::{VersionList, VersionTag, normalize_tag};
