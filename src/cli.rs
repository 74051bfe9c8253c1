//! CLI argument definitions using clap derive macros.

use clap::Parser;

use release_probe_core::probe::constants::{DEFAULT_RANGE_BYTES, DEFAULT_TIMEOUT_SECS};
use release_probe_core::{DEFAULT_API_BASE, DEFAULT_REPO};

const EXIT_CODES_HELP: &str = "Exit codes:\n  \
    0 = run completed (whether or not a version was found)\n  \
    1 = release list could not be fetched\n  \
    2 = missing or invalid input\n  \
    130 = interrupted";

/// Fingerprint a deployed web application version by probing versioned assets.
///
/// Fetches the release tags of a GitHub project, then checks which
/// AdminInterface-{version}.js bundle the target server serves. Results are
/// printed as a tab-separated table on stdout; diagnostics go to stderr.
#[derive(Parser, Debug)]
#[command(name = "release-probe")]
#[command(author, version, about, after_help = EXIT_CODES_HELP)]
pub struct Args {
    /// Target server root, e.g. https://sso.example.com
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// GitHub repository to query for releases
    #[arg(long, value_name = "OWNER/NAME", default_value = DEFAULT_REPO)]
    pub repo: String,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: f64,

    /// Seconds to sleep between probes
    #[arg(long, value_name = "SECS", default_value_t = 0.0)]
    pub sleep: f64,

    /// Do not stop at the first hit; probe every version
    #[arg(long)]
    pub all: bool,

    /// Print 404 rows (skipped by default)
    #[arg(long = "include-404")]
    pub include_404: bool,

    /// Print each checked version to stderr (-vv for debug logs, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Bytes requested per probe via a Range header (0 fetches the whole file)
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_RANGE_BYTES)]
    pub range_bytes: u64,

    /// Classify redirects as misses instead of following them
    #[arg(long)]
    pub no_follow_redirects: bool,

    /// GitHub API root (for GitHub Enterprise)
    #[arg(long, value_name = "URL", default_value = DEFAULT_API_BASE)]
    pub api_url: String,

    /// Token for the GitHub API, raises the rate limit
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,
}
