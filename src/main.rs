//! CLI entry point for the release-probe tool.

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

mod app;
mod cli;

use app::{runtime, terminal};
use cli::Args;

/// How the process ends, mapped to the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    /// Run completed, hit or not.
    Success,
    /// Release list unavailable or an internal failure.
    Failure,
    /// Base URL missing or another argument invalid.
    InvalidInput,
    /// Stopped by Ctrl-C.
    Interrupted,
}

impl ProcessExit {
    pub(crate) fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
            Self::InvalidInput => 2,
            Self::Interrupted => 130,
        }
    }
}

// Requests are strictly sequential, so a single-threaded runtime is enough.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    terminal::init_tracing(terminal::resolve_default_log_level(args.quiet, args.verbose));
    debug!(
        base_url = ?args.base_url,
        repo = %args.repo,
        all = args.all,
        include_404 = args.include_404,
        "CLI arguments parsed"
    );

    match runtime::run_probe(&args).await {
        Ok(exit) => ExitCode::from(exit.code()),
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(ProcessExit::Failure.code())
        }
    }
}
