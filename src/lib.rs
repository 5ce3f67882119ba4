//! act - concurrent cache sweeper
//!
//! Detects the platform cache directory, selects its direct children by
//! name, deletes them on a thread pool and reports each outcome.

pub mod cancel;
pub mod cleaner;
pub mod cli;
pub mod cmd;
pub mod error;
pub mod output;
pub mod roots;
pub mod sweeper;
pub mod utils;

pub use cancel::CancelToken;
pub use cleaner::{Candidate, Notice, ScanEntry, ScanResult, SelectionFilter, SweepSummary};
pub use error::SweepError;
pub use roots::{detect_cache_roots, CacheRoot, OsFamily};
pub use sweeper::{report, report_with, sweep, SweepOptions};
