use std::path::PathBuf;

use crate::error::SweepError;

/// One direct child of a cache root, picked for deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub name: String,
}

/// Which children of a cache root get swept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionFilter {
    /// Every direct child.
    All,
    /// Children whose name contains any of these tokens. Never empty.
    Tokens(Vec<String>),
}

impl SelectionFilter {
    /// Build a targeted filter. Returns `None` when no usable token is given,
    /// since an empty token would select everything.
    pub fn targeted<I, S>(tokens: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens
            .into_iter()
            .map(Into::into)
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.is_empty() {
            None
        } else {
            Some(Self::Tokens(tokens))
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Tokens(tokens) => tokens.iter().any(|t| Self::token_matches(name, t)),
        }
    }

    /// Whether a single token selects `name`: literal, case-sensitive substring.
    pub fn token_matches(name: &str, token: &str) -> bool {
        name.contains(token)
    }
}

/// Events emitted while a sweep runs. Units run concurrently, so these
/// arrive in no particular order.
#[derive(Debug)]
pub enum Notice<'a> {
    /// A unit started deleting this candidate.
    Cleaning(&'a Candidate),
    /// Dry-run: this candidate would have been deleted.
    WouldClean {
        candidate: &'a Candidate,
        size_bytes: u64,
    },
    /// The candidate is gone. `freed` is what it occupied before removal.
    Removed { candidate: &'a Candidate, freed: u64 },
    /// A root could not be listed, a removal failed, or a unit was cancelled.
    Failed(&'a SweepError),
}

/// Tally of one sweep, available once every unit has finished.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepSummary {
    pub scheduled: usize,
    pub removed: usize,
    pub failed: usize,
    pub cancelled: usize,
    pub bytes_freed: u64,
    pub dry_run: bool,
}

impl SweepSummary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// One line of the sizing report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEntry {
    pub name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Result of sizing every cache root.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Entries in filesystem enumeration order, root by root.
    pub entries: Vec<ScanEntry>,
    pub total_bytes: u64,
    pub errors: Vec<SweepError>,
}
