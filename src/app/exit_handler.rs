//! Exit code logic for the release-probe process.
//!
//! Single responsibility: map how a run ended to the process exit outcome.

use release_probe_core::ReportError;

use crate::ProcessExit;
use crate::app::context::SetupError;

/// Exit outcome when the run context could not be built.
pub(crate) fn exit_for_setup_error(error: &SetupError) -> ProcessExit {
    if error.is_input_error() {
        ProcessExit::InvalidInput
    } else {
        ProcessExit::Failure
    }
}

/// Exit outcome when writing results failed mid-run.
///
/// A closed reader (e.g. `| head`) is a normal way for a pipeline to end.
pub(crate) fn exit_for_report_error(error: &ReportError) -> ProcessExit {
    if error.is_broken_pipe() {
        ProcessExit::Success
    } else {
        ProcessExit::Failure
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use release_probe_core::{ProbeError, ReleaseError};

    use super::*;

    #[test]
    fn test_missing_base_url_exits_invalid_input() {
        let error = SetupError::Probe(ProbeError::MissingBaseUrl);
        assert_eq!(exit_for_setup_error(&error), ProcessExit::InvalidInput);
    }

    #[test]
    fn test_invalid_repo_exits_invalid_input() {
        let error = SetupError::Release(ReleaseError::invalid_repo("x"));
        assert_eq!(exit_for_setup_error(&error), ProcessExit::InvalidInput);
    }

    #[test]
    fn test_broken_pipe_exits_success() {
        let error = ReportError::Output {
            source: io::Error::new(io::ErrorKind::BrokenPipe, "closed"),
        };
        assert_eq!(exit_for_report_error(&error), ProcessExit::Success);
    }

    #[test]
    fn test_other_output_error_exits_failure() {
        let error = ReportError::Output {
            source: io::Error::other("disk full"),
        };
        assert_eq!(exit_for_report_error(&error), ProcessExit::Failure);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ProcessExit::Success.code(), 0);
        assert_eq!(ProcessExit::Failure.code(), 1);
        assert_eq!(ProcessExit::InvalidInput.code(), 2);
        assert_eq!(ProcessExit::Interrupted.code(), 130);
    }
}
