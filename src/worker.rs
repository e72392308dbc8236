//! The per-worker depth-first searcher.
//!
//! A worker owns one [`SearchTask`] and walks each of its directories in
//! order, depth-first, on its own thread. It never spawns further work and
//! only talks to other workers through the shared [`FoundFlag`].
//!
//! Cancellation is cooperative: the flag is polled before each assigned
//! directory, before each directory listing and before each child entry.
//! After some other worker claims a match, a worker does at most the
//! listing it is already in the middle of.

use std::vec;

use tracing::{debug, info};

use crate::entry::Entry;
use crate::error::FinderError;
use crate::flag::FoundFlag;
use crate::results::MatchResult;
use crate::traits::{Matcher, Source};

// ---------------------------------------------------------------------------
// SearchTask
// ---------------------------------------------------------------------------

/// The ordered directories assigned to exactly one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTask {
    /// 1-based worker id this task belongs to.
    pub worker: usize,

    /// Directories to search, in order.
    pub dirs: Vec<Entry>,
}

// ---------------------------------------------------------------------------
// Worker state
// ---------------------------------------------------------------------------

/// How a worker's run ended.
///
/// A [`Searcher`] is idle until [`Searcher::run`] is called and running until
/// it returns, so only the two terminal states are ever reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Exhausted the task without seeing the flag set.
    Completed,
    /// Saw the flag set (by another worker, or by its own match) and stopped.
    Cancelled,
}

/// What a worker hands back to the coordinator when it finishes.
#[derive(Debug)]
pub struct WorkerReport {
    pub worker: usize,
    pub state:  WorkerState,
    /// Directories listed.
    pub dirs:   usize,
    /// Non-directory entries compared against the target.
    pub files:  usize,
    /// Listing failures, if error collection is on.
    pub errors: Vec<FinderError>,
}

// ---------------------------------------------------------------------------
// Searcher
// ---------------------------------------------------------------------------

enum Visit {
    Exhausted,
    Stopped,
}

/// Runs one [`SearchTask`] against a source.
pub struct Searcher<'a> {
    id:             usize,
    source:         &'a dyn Source,
    matcher:        &'a dyn Matcher,
    flag:           &'a FoundFlag,
    collect_errors: bool,
    dirs:           usize,
    files:          usize,
    errors:         Vec<FinderError>,
}

impl<'a> Searcher<'a> {
    pub fn new(
        id: usize,
        source: &'a dyn Source,
        matcher: &'a dyn Matcher,
        flag: &'a FoundFlag,
    ) -> Self {
        Self {
            id,
            source,
            matcher,
            flag,
            collect_errors: false,
            dirs: 0,
            files: 0,
            errors: Vec::new(),
        }
    }

    /// Keep listing failures in the report instead of only logging them.
    pub fn collect_errors(mut self, yes: bool) -> Self {
        self.collect_errors = yes;
        self
    }

    /// Search every directory of `task`, stopping as soon as the flag is set.
    pub fn run(mut self, task: &SearchTask) -> WorkerReport {
        debug!(worker = self.id, dirs = task.dirs.len(), "worker starting");

        let state = self.run_task(task);

        match state {
            WorkerState::Cancelled => debug!(worker = self.id, "worker stopping, target already found"),
            _ => debug!(worker = self.id, "worker finished its search"),
        }

        WorkerReport {
            worker: self.id,
            state,
            dirs:   self.dirs,
            files:  self.files,
            errors: self.errors,
        }
    }

    fn run_task(&mut self, task: &SearchTask) -> WorkerState {
        for dir in &task.dirs {
            if self.flag.is_set() {
                return WorkerState::Cancelled;
            }

            debug!(worker = self.id, dir = %dir.path.display(), "searching");
            if let Visit::Stopped = self.visit(dir) {
                return WorkerState::Cancelled;
            }
        }
        WorkerState::Completed
    }

    /// Depth-first over `root` and its descendants.
    ///
    /// Uses a stack of sibling iterators rather than recursion so deep trees
    /// cannot overflow the thread stack. Order is the same as the recursive
    /// walk: a subdirectory is exhausted before its next sibling is looked at.
    fn visit(&mut self, root: &Entry) -> Visit {
        if self.flag.is_set() {
            return Visit::Stopped;
        }

        let mut stack: Vec<vec::IntoIter<Entry>> = vec![self.children(root).into_iter()];

        while let Some(siblings) = stack.last_mut() {
            let Some(child) = siblings.next() else {
                stack.pop();
                continue;
            };

            if self.flag.is_set() {
                return Visit::Stopped;
            }

            if child.is_dir() {
                let grandchildren = self.children(&child);
                stack.push(grandchildren.into_iter());
            } else {
                self.files += 1;
                if self.matcher.is_match(&child) {
                    self.claim(child);
                    return Visit::Stopped;
                }
            }
        }

        Visit::Exhausted
    }

    /// List `dir`, treating a failed listing as an empty directory.
    fn children(&mut self, dir: &Entry) -> Vec<Entry> {
        self.dirs += 1;
        match self.source.list_children(dir) {
            Ok(children) => children,
            Err(err) => {
                debug!(worker = self.id, error = %err, "skipping unreadable directory");
                if self.collect_errors {
                    self.errors.push(err);
                }
                Vec::new()
            }
        }
    }

    fn claim(&self, entry: Entry) {
        let result = MatchResult {
            path:   entry.path,
            worker: self.id,
        };
        let path = result.path.display().to_string();

        if self.flag.claim(result) {
            info!(worker = self.id, path = %path, "file found");
        } else {
            debug!(worker = self.id, path = %path, "match discarded, target already found");
        }
    }
}
