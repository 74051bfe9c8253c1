//! Shared User-Agent string for release API and probe traffic.
//!
//! Both clients send the same product token so server and API operators can
//! tell this tool's traffic apart from browsers.

/// Product token sent before the crate version.
const PRODUCT: &str = "release-probe";

/// Default User-Agent for every request the tool sends.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("{PRODUCT}/{version} (version-fingerprinting)")
}
