use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::FinderError;

/// The output of a completed search.
///
/// `errors` is opt-in: enable it on the builder with `.collect_errors(true)`.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Final state of the shared found flag.
    pub found: bool,

    /// The winning match. `Some` exactly when `found` is `true`.
    pub matched: Option<MatchResult>,

    /// Scan statistics, summed over all workers.
    pub stats: ScanStats,

    /// Non-fatal errors encountered during the search (unreadable
    /// directories, panicked workers).
    /// Only populated if `.collect_errors(true)` was set on the builder.
    pub errors: Vec<FinderError>,
}

impl SearchOutcome {
    /// Outcome of a run that never started a worker.
    pub(crate) fn empty(errors: Vec<FinderError>) -> Self {
        Self {
            found: false,
            matched: None,
            stats: ScanStats::default(),
            errors,
        }
    }

    /// Path of the matching file, if one was found.
    pub fn path(&self) -> Option<&Path> {
        self.matched.as_ref().map(|m| m.path.as_path())
    }

    /// 1-based id of the worker that found the match.
    pub fn finder(&self) -> Option<usize> {
        self.matched.as_ref().map(|m| m.worker)
    }
}

/// Where the file was found and by whom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Path of the matching file.
    pub path: PathBuf,

    /// 1-based id of the worker that claimed the match.
    pub worker: usize,
}

/// Statistics for a completed search.
#[derive(Debug, Clone, Default)]
pub struct ScanStats {
    /// Directories listed (including ones that failed to list).
    pub dirs: usize,

    /// Non-directory entries compared against the target.
    pub files: usize,

    /// Worker threads started. Zero when the root had nothing to search.
    pub workers: usize,

    /// Wall-clock time from partitioning to the end of the join barrier.
    pub duration: Duration,
}
