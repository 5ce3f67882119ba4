use std::collections::HashSet;
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use tracing::{debug, info, warn};

use crate::cancel::CancelToken;
use crate::cleaner::{Candidate, Notice, ScanEntry, ScanResult, SelectionFilter, SweepSummary};
use crate::error::SweepError;
use crate::roots::CacheRoot;
use crate::utils;

/// Knobs for one sweep.
#[derive(Debug, Clone, Default)]
pub struct SweepOptions {
    /// Report what would be deleted without touching anything.
    pub dry_run: bool,
    /// Upper bound on concurrent deletions. `None` uses the shared rayon
    /// pool, one worker per CPU.
    pub jobs: Option<NonZeroUsize>,
    pub cancel: CancelToken,
}

/// Direct children of `root` whose name `keep` accepts. Never recurses.
pub fn enumerate<F>(root: &Path, keep: F) -> Result<Vec<Candidate>, SweepError>
where
    F: Fn(&str) -> bool,
{
    let read_dir = std::fs::read_dir(root).map_err(|source| SweepError::Enumerate {
        root: root.to_path_buf(),
        source,
    })?;

    let mut candidates = Vec::new();
    for entry in read_dir.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        if keep(&name) {
            candidates.push(Candidate {
                path: entry.path(),
                name,
            });
        }
    }
    Ok(candidates)
}

/// Everything `filter` selects across `roots`, in scheduling order.
///
/// Targeted filters enumerate token by token, then root by root. A path
/// reached by several tokens is kept once. A root that cannot be listed is
/// reported through `notify` and skipped.
pub fn select_candidates<N>(roots: &[CacheRoot], filter: &SelectionFilter, notify: N) -> Vec<Candidate>
where
    N: Fn(Notice<'_>),
{
    let mut seen = HashSet::new();
    let mut selected = Vec::new();

    let mut collect = |result: Result<Vec<Candidate>, SweepError>| match result {
        Ok(batch) => {
            for candidate in batch {
                if seen.insert(candidate.path.clone()) {
                    selected.push(candidate);
                }
            }
        }
        Err(e) => notify(Notice::Failed(&e)),
    };

    match filter {
        SelectionFilter::All => {
            for root in roots {
                collect(enumerate(&root.path, |name| filter.matches(name)));
            }
        }
        SelectionFilter::Tokens(tokens) => {
            for token in tokens {
                for root in roots {
                    collect(enumerate(&root.path, |name| {
                        SelectionFilter::token_matches(name, token)
                    }));
                }
            }
        }
    }

    debug!(count = selected.len(), "selected candidates");
    selected
}

/// Select candidates under `roots` and delete them concurrently.
///
/// Returns once every scheduled deletion has finished. Per-entry failures
/// are reported through `notify` and tallied; they never stop the sweep.
pub fn sweep<N>(
    roots: &[CacheRoot],
    filter: &SelectionFilter,
    options: &SweepOptions,
    notify: N,
) -> SweepSummary
where
    N: Fn(Notice<'_>) + Sync,
{
    let candidates = select_candidates(roots, filter, &notify);
    run_units(&candidates, options, utils::remove_entry, notify)
}

/// Dedicated pool capped at `jobs` workers.
fn bounded_pool(jobs: NonZeroUsize) -> Result<ThreadPool, ThreadPoolBuildError> {
    ThreadPoolBuilder::new()
        .num_threads(jobs.get())
        .thread_name(|i| format!("act-sweep-{i}"))
        .build()
}

/// Run one deletion unit per candidate and wait for all of them.
pub(crate) fn run_units<R, N>(
    candidates: &[Candidate],
    options: &SweepOptions,
    remove: R,
    notify: N,
) -> SweepSummary
where
    R: Fn(&Path) -> io::Result<u64> + Sync,
    N: Fn(Notice<'_>) + Sync,
{
    let pool = match options.jobs {
        Some(jobs) if !options.dry_run && !candidates.is_empty() => Some(bounded_pool(jobs)),
        _ => None,
    };
    run_units_on(candidates, options, pool, remove, notify)
}

/// Like [`run_units`], with the worker pool chosen by the caller. `None`,
/// or a pool that failed to build, runs on the shared rayon pool.
fn run_units_on<R, N>(
    candidates: &[Candidate],
    options: &SweepOptions,
    pool: Option<Result<ThreadPool, ThreadPoolBuildError>>,
    remove: R,
    notify: N,
) -> SweepSummary
where
    R: Fn(&Path) -> io::Result<u64> + Sync,
    N: Fn(Notice<'_>) + Sync,
{
    let mut summary = SweepSummary {
        scheduled: candidates.len(),
        dry_run: options.dry_run,
        ..SweepSummary::default()
    };

    if options.dry_run {
        for candidate in candidates {
            notify(Notice::WouldClean {
                candidate,
                size_bytes: utils::entry_size(&candidate.path),
            });
        }
        return summary;
    }

    if candidates.is_empty() {
        return summary;
    }

    let removed = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);
    let cancelled = AtomicUsize::new(0);
    let freed = AtomicU64::new(0);

    let unit = |candidate: &Candidate| {
        if options.cancel.is_cancelled() {
            cancelled.fetch_add(1, Ordering::Relaxed);
            notify(Notice::Failed(&SweepError::Cancelled {
                path: candidate.path.clone(),
            }));
            return;
        }

        notify(Notice::Cleaning(candidate));
        match remove(&candidate.path) {
            Ok(bytes) => {
                removed.fetch_add(1, Ordering::Relaxed);
                freed.fetch_add(bytes, Ordering::Relaxed);
                notify(Notice::Removed {
                    candidate,
                    freed: bytes,
                });
            }
            Err(source) => {
                failed.fetch_add(1, Ordering::Relaxed);
                notify(Notice::Failed(&SweepError::Remove {
                    path: candidate.path.clone(),
                    source,
                }));
            }
        }
    };

    // `for_each` returns only after every unit has finished.
    match pool {
        Some(Ok(pool)) => {
            debug!(units = candidates.len(), threads = pool.current_num_threads(), "scheduling deletions");
            pool.install(|| candidates.par_iter().for_each(&unit));
        }
        Some(Err(e)) => {
            warn!(error = %e, "could not start bounded deletion pool, using the shared pool");
            candidates.par_iter().for_each(&unit);
        }
        None => {
            debug!(units = candidates.len(), threads = rayon::current_num_threads(), "scheduling deletions");
            candidates.par_iter().for_each(&unit);
        }
    }

    summary.removed = removed.into_inner();
    summary.failed = failed.into_inner();
    summary.cancelled = cancelled.into_inner();
    summary.bytes_freed = freed.into_inner();

    info!(
        removed = summary.removed,
        failed = summary.failed,
        cancelled = summary.cancelled,
        bytes_freed = summary.bytes_freed,
        "sweep finished"
    );
    summary
}

/// Size every direct child of every root, collecting the results.
pub fn report(roots: &[CacheRoot], deep: bool) -> ScanResult {
    let mut result = ScanResult::default();
    report_with(roots, deep, |line| match line {
        Ok(entry) => {
            result.total_bytes += entry.size_bytes;
            result.entries.push(entry);
        }
        Err(err) => result.errors.push(err),
    });
    result
}

/// Size every direct child of every root, handing each entry or error to
/// `on_line` in enumeration order.
///
/// Sizes come from `metadata` (symlinks followed), so a directory reports
/// its own entry size unless `deep` is set, in which case its contents are
/// summed.
pub fn report_with<F>(roots: &[CacheRoot], deep: bool, mut on_line: F)
where
    F: FnMut(Result<ScanEntry, SweepError>),
{
    for root in roots {
        let read_dir = match std::fs::read_dir(&root.path) {
            Ok(read_dir) => read_dir,
            Err(source) => {
                on_line(Err(SweepError::Enumerate {
                    root: root.path.clone(),
                    source,
                }));
                continue;
            }
        };

        for entry in read_dir.flatten() {
            let path: PathBuf = entry.path();
            let meta = match std::fs::metadata(&path) {
                Ok(meta) => meta,
                Err(source) => {
                    on_line(Err(SweepError::Stat { path, source }));
                    continue;
                }
            };

            let size_bytes = if deep && meta.is_dir() {
                utils::dir_size(&path)
            } else {
                meta.len()
            };
            on_line(Ok(ScanEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
                size_bytes,
            }));
        }
    }
}
