//! Clean command (concurrent cache sweep)

use std::num::NonZeroUsize;
use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use crate::cancel::CancelToken;
use crate::cleaner::{SelectionFilter, SweepSummary};
use crate::output;
use crate::roots;
use crate::sweeper::{self, SweepOptions};

/// Options gathered from the command line.
#[derive(Debug, Clone, Default)]
pub struct CleanArgs {
    pub tokens: Vec<String>,
    pub all: bool,
    pub dry_run: bool,
    pub jobs: Option<NonZeroUsize>,
    pub timeout: Option<Duration>,
}

/// Sweep the detected cache roots and print per-entry notices.
///
/// Returns the sweep tally so the caller can decide on an exit status.
pub fn clean(args: CleanArgs) -> Result<SweepSummary> {
    let filter = if args.all {
        SelectionFilter::All
    } else if let Some(filter) = SelectionFilter::targeted(args.tokens) {
        filter
    } else {
        output::print_warning("No names given. Pass one or more names, or --all to clean everything.");
        output::print_clean_complete(&SweepSummary::default());
        return Ok(SweepSummary::default());
    };

    output::print_clean_header(args.all);

    let roots = roots::detect_cache_roots();
    if roots.is_empty() {
        output::print_info("No cache directory is known for this platform.");
    }

    let options = SweepOptions {
        dry_run: args.dry_run,
        jobs: args.jobs,
        cancel: args
            .timeout
            .map_or_else(CancelToken::new, CancelToken::with_timeout),
    };
    debug!(?filter, ?options, "starting sweep");

    let summary = sweeper::sweep(&roots, &filter, &options, |notice| {
        output::print_notice(&notice);
    });

    output::print_clean_complete(&summary);
    Ok(summary)
}

/// Process exit status for a finished sweep. Partial failures only turn
/// into a non-zero status when `fail_on_error` is set.
pub fn exit_status(summary: &SweepSummary, fail_on_error: bool) -> u8 {
    if fail_on_error && summary.has_failures() {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaner::Candidate;
    use std::io;
    use std::path::Path;

    fn failing_sweep() -> SweepSummary {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("ok"), b"x").unwrap();
        std::fs::write(tmp.path().join("stuck"), b"x").unwrap();
        let candidates: Vec<Candidate> = sweeper::enumerate(tmp.path(), |_| true).unwrap();

        sweeper::run_units(
            &candidates,
            &SweepOptions::default(),
            |path: &Path| {
                if path.ends_with("stuck") {
                    Err(io::Error::new(io::ErrorKind::PermissionDenied, "stuck"))
                } else {
                    crate::utils::remove_entry(path)
                }
            },
            |_| {},
        )
    }

    #[test]
    fn failed_unit_fails_the_process_only_when_asked() {
        let summary = failing_sweep();
        assert_eq!(summary.failed, 1);
        assert_eq!(exit_status(&summary, true), 1);
        assert_eq!(exit_status(&summary, false), 0);
    }

    #[test]
    fn clean_sweep_never_fails_the_process() {
        let summary = SweepSummary {
            scheduled: 2,
            removed: 2,
            ..SweepSummary::default()
        };
        assert_eq!(exit_status(&summary, true), 0);
    }
}
