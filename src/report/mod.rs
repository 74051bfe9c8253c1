//! Tab-separated result reporting.
//!
//! Rows go to the primary stream as soon as each probe finishes; attempt
//! announcements go to a separate diagnostic stream so redirecting stdout to
//! a file captures only the table.

use std::io::{self, Write};

use thiserror::Error;
use tracing::{trace, warn};

use crate::probe::constants::{ABSENT_CHECKSUM, TRANSPORT_FAILURE_STATUS};
use crate::probe::{ProbeAttempt, ProbeResult, ProbeSink};

/// Header line of the result table.
pub const HEADER: &str = "version\thttp_status\tchecksum\tbytes\turl";

/// Failure writing to one of the output streams.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing the result table failed (closed pipe, full disk).
    #[error("failed to write results: {source}")]
    Output {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Writing a diagnostic line failed.
    #[error("failed to write diagnostics: {source}")]
    Diagnostic {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

impl ReportError {
    /// Whether the reader of the result table went away.
    #[must_use]
    pub fn is_broken_pipe(&self) -> bool {
        match self {
            Self::Output { source } | Self::Diagnostic { source } => {
                source.kind() == io::ErrorKind::BrokenPipe
            }
        }
    }
}

/// Formats one result as a table row (without newline).
///
/// Transport failures render status `0` and checksum `-`.
#[must_use]
pub fn format_row(result: &ProbeResult) -> String {
    let status = result
        .outcome
        .status()
        .unwrap_or(TRANSPORT_FAILURE_STATUS);
    let checksum = result
        .outcome
        .checksum()
        .map_or(ABSENT_CHECKSUM, |c| c.as_str());
    format!(
        "{}\t{}\t{}\t{}\t{}",
        result.version,
        status,
        checksum,
        result.outcome.bytes(),
        result.url
    )
}

/// Streams probe results as TSV rows.
#[derive(Debug)]
pub struct Reporter<W, D> {
    out: W,
    diag: D,
    include_not_found: bool,
    rows_written: usize,
    suppressed: usize,
    diag_closed: bool,
}

impl<W: Write, D: Write> Reporter<W, D> {
    /// Creates a reporter. With `include_not_found` off, 404 rows are dropped.
    pub fn new(out: W, diag: D, include_not_found: bool) -> Self {
        Self {
            out,
            diag,
            include_not_found,
            rows_written: 0,
            suppressed: 0,
            diag_closed: false,
        }
    }

    /// Writes and flushes the header line.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Output`] when the primary stream fails.
    pub fn write_header(&mut self) -> Result<(), ReportError> {
        writeln!(self.out, "{HEADER}").map_err(|source| ReportError::Output { source })?;
        self.flush()
    }

    /// Whether `result` is shown under the current filter.
    #[must_use]
    pub fn is_reported(&self, result: &ProbeResult) -> bool {
        self.include_not_found || !result.outcome.is_not_found()
    }

    /// Writes one result row (unless filtered) and flushes it.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Output`] when the primary stream fails.
    pub fn report(&mut self, result: &ProbeResult) -> Result<(), ReportError> {
        if !self.is_reported(result) {
            trace!(version = %result.version, "suppressing not-found row");
            self.suppressed += 1;
            return Ok(());
        }
        writeln!(self.out, "{}", format_row(result))
            .map_err(|source| ReportError::Output { source })?;
        self.rows_written += 1;
        self.flush()
    }

    /// Writes `checking [i/n] version` to the diagnostic stream.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Diagnostic`] when the diagnostic stream fails.
    pub fn announce(&mut self, attempt: ProbeAttempt<'_>) -> Result<(), ReportError> {
        writeln!(
            self.diag,
            "checking [{}/{}] {}",
            attempt.index, attempt.total, attempt.version
        )
        .and_then(|()| self.diag.flush())
        .map_err(|source| ReportError::Diagnostic { source })
    }

    /// Rows written so far (header excluded).
    #[must_use]
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Rows dropped by the not-found filter.
    #[must_use]
    pub fn suppressed(&self) -> usize {
        self.suppressed
    }

    /// Flushes the primary stream.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Output`] when the flush fails.
    pub fn flush(&mut self) -> Result<(), ReportError> {
        self.out
            .flush()
            .map_err(|source| ReportError::Output { source })
    }

    /// Returns the underlying streams.
    pub fn into_inner(self) -> (W, D) {
        (self.out, self.diag)
    }
}

impl<W: Write, D: Write> ProbeSink for Reporter<W, D> {
    type Error = ReportError;

    /// Attempt lines are best effort: a failing diagnostic stream is logged
    /// once and then skipped, and the result table keeps going.
    fn on_attempt(&mut self, attempt: ProbeAttempt<'_>) -> Result<(), ReportError> {
        if self.diag_closed {
            return Ok(());
        }
        if let Err(error) = self.announce(attempt) {
            warn!(%error, "diagnostic stream unavailable, dropping attempt lines");
            self.diag_closed = true;
        }
        Ok(())
    }

    fn on_result(&mut self, result: &ProbeResult) -> Result<(), ReportError> {
        self.report(result)
    }
}
