use std::io;

use anyhow::{Result, anyhow};
use release_probe_core::{ReleaseError, Reporter};
use tracing::{debug, info, warn};

use crate::ProcessExit;
use crate::app::context::RunContext;
use crate::app::exit_handler;
use crate::cli::Args;

const TOKEN_TIP: &str = "Tip: set GITHUB_TOKEN to avoid GitHub rate limits.";

pub(crate) async fn run_probe(args: &Args) -> Result<ProcessExit> {
    let ctx = match RunContext::from_args(args) {
        Ok(ctx) => ctx,
        Err(error) => {
            eprintln!("{error}");
            return Ok(exit_handler::exit_for_setup_error(&error));
        }
    };
    debug!(?ctx, "run context ready");

    let mut reporter = Reporter::new(io::stdout(), io::stderr(), ctx.include_not_found);

    tokio::select! {
        exit = execute(&ctx, &mut reporter) => exit,
        Ok(()) = tokio::signal::ctrl_c() => {
            // The in-flight request future was dropped with its connection.
            warn!("interrupted, stopping probes");
            let _ = reporter.flush();
            Ok(ProcessExit::Interrupted)
        }
    }
}

async fn execute(
    ctx: &RunContext,
    reporter: &mut Reporter<io::Stdout, io::Stderr>,
) -> Result<ProcessExit> {
    let versions = match ctx.source.fetch_versions().await {
        Ok(versions) => versions,
        Err(error) => {
            report_release_failure(ctx, &error);
            return Ok(ProcessExit::Failure);
        }
    };
    if versions.is_empty() {
        warn!(repo = %ctx.repo, "repository has no releases; nothing to probe");
    }

    if let Err(error) = reporter.write_header() {
        return finish_with_report_error(&error);
    }

    let summary = match ctx
        .engine
        .run(&ctx.base_url, versions.as_slice(), reporter)
        .await
    {
        Ok(summary) => summary,
        Err(error) => return finish_with_report_error(&error),
    };

    info!(
        probed = summary.probed,
        hits = summary.hits,
        misses = summary.misses,
        transport_failures = summary.transport_failures,
        suppressed = reporter.suppressed(),
        first_hit = summary.first_hit.as_ref().map(|v| v.as_str()),
        "probe run complete"
    );
    if summary.hits == 0 && summary.probed > 0 {
        info!(base = %ctx.base_url, "no candidate version found");
    }

    Ok(ProcessExit::Success)
}

fn report_release_failure(ctx: &RunContext, error: &ReleaseError) {
    eprintln!("Failed to fetch GitHub releases for {}: {error}", ctx.repo);
    if !ctx.has_token || error.suggests_token() {
        eprintln!("{TOKEN_TIP}");
    }
}

fn finish_with_report_error(error: &release_probe_core::ReportError) -> Result<ProcessExit> {
    match exit_handler::exit_for_report_error(error) {
        ProcessExit::Success => {
            debug!("output closed by reader");
            Ok(ProcessExit::Success)
        }
        _ => Err(anyhow!("{error}")),
    }
}
