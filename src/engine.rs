use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::entry::Entry;
use crate::error::FinderError;
use crate::flag::FoundFlag;
use crate::results::{ScanStats, SearchOutcome};
use crate::traits::{Matcher, Source};
use crate::worker::{SearchTask, Searcher, WorkerReport};

// ---------------------------------------------------------------------------
// Engine options
// ---------------------------------------------------------------------------

/// Internal options passed from the builder to `run()`.
///
/// `pub(crate)`: callers configure these through
/// [`SearchBuilder`](crate::SearchBuilder), which validates them first.
pub(crate) struct EngineOptions {
    pub workers:        usize,
    pub source:         Arc<dyn Source>,
    pub matcher:        Arc<dyn Matcher>,
    pub collect_errors: bool,
}

// ---------------------------------------------------------------------------
// Partitioning
// ---------------------------------------------------------------------------

/// Split `dirs` into `workers` round-robin buckets.
///
/// The directory at index `j` goes to bucket `j % workers`, so no bucket
/// holds more than `ceil(len / workers)` directories. Buckets that end up
/// empty are dropped; the returned tasks carry 1-based worker ids matching
/// their bucket index.
///
/// ```rust
/// use parfind::{Entry, EntryKind};
/// use parfind::engine::round_robin;
///
/// let dirs: Vec<Entry> = (0..6).map(|i| Entry::new(format!("/r/{i}"), EntryKind::Dir)).collect();
/// let tasks = round_robin(dirs, 4);
///
/// assert_eq!(tasks.len(), 4);
/// assert_eq!(tasks[1].worker, 2);
/// assert_eq!(tasks[1].dirs[1].name, "5");
/// ```
///
/// # Panics
///
/// Panics if `workers` is zero.
pub fn round_robin(dirs: Vec<Entry>, workers: usize) -> Vec<SearchTask> {
    assert!(workers > 0, "round_robin needs at least one bucket");

    let mut buckets: Vec<Vec<Entry>> = (0..workers).map(|_| Vec::new()).collect();
    for (j, dir) in dirs.into_iter().enumerate() {
        buckets[j % workers].push(dir);
    }

    buckets
        .into_iter()
        .enumerate()
        .filter(|(_, dirs)| !dirs.is_empty())
        .map(|(i, dirs)| SearchTask { worker: i + 1, dirs })
        .collect()
}

// ---------------------------------------------------------------------------
// run()
// ---------------------------------------------------------------------------

/// Search `root` for the first entry `opts.matcher` accepts.
///
/// This is the coordinator: it lists the root once, distributes the root and
/// its immediate subdirectories across the workers, and blocks until every
/// started worker has finished. `root` must already be a validated directory.
///
/// A listing failure anywhere, including at the root, never fails the run.
/// A worker that panics is recorded and the remaining workers are still
/// joined. The only error is failing to spawn a thread at all, which is
/// reported after every worker that did start has been joined.
pub(crate) fn run(root: Entry, opts: EngineOptions) -> Result<SearchOutcome, FinderError> {
    let start = Instant::now();
    let mut errors = Vec::new();

    let children = match opts.source.list_children(&root) {
        Ok(children) => children,
        Err(err) => {
            debug!(error = %err, "root directory unreadable, treating as empty");
            if opts.collect_errors {
                errors.push(err);
            }
            Vec::new()
        }
    };

    // Nothing under the root at all: not even the root itself can hold a match.
    if children.is_empty() {
        info!(root = %root.path.display(), "no subdirectories to search");
        let mut outcome = SearchOutcome::empty(errors);
        outcome.stats.dirs = 1;
        outcome.stats.duration = start.elapsed();
        return Ok(outcome);
    }

    // The root goes first so files directly inside it are covered too.
    let mut dirs = Vec::with_capacity(children.len() + 1);
    dirs.push(root);
    dirs.extend(children.into_iter().filter(Entry::is_dir));

    info!(
        dirs = dirs.len(),
        workers = opts.workers,
        "distributing directories among workers"
    );

    let tasks = round_robin(dirs, opts.workers);
    let flag = Arc::new(FoundFlag::new());

    let mut handles: Vec<(usize, JoinHandle<WorkerReport>)> = Vec::with_capacity(tasks.len());
    let mut spawn_error = None;

    for task in tasks {
        let id = task.worker;
        let source = Arc::clone(&opts.source);
        let matcher = Arc::clone(&opts.matcher);
        let flag_ref = Arc::clone(&flag);
        let collect_errors = opts.collect_errors;

        let spawned = thread::Builder::new()
            .name(format!("parfind-{id}"))
            .spawn(move || {
                Searcher::new(id, source.as_ref(), matcher.as_ref(), &flag_ref)
                    .collect_errors(collect_errors)
                    .run(&task)
            });

        match spawned {
            Ok(handle) => handles.push((id, handle)),
            Err(e) => {
                warn!(worker = id, error = %e, "failed to spawn worker");
                spawn_error = Some(FinderError::ThreadPool(e.to_string()));
                break;
            }
        }
    }

    // Join barrier. Every started worker is joined, even after a failure.
    let mut stats = ScanStats {
        workers: handles.len(),
        ..ScanStats::default()
    };

    for (id, handle) in handles {
        match handle.join() {
            Ok(report) => {
                stats.dirs += report.dirs;
                stats.files += report.files;
                errors.extend(report.errors);
            }
            Err(_) => {
                warn!(worker = id, "worker panicked, its remaining directories were not searched");
                if opts.collect_errors {
                    errors.push(FinderError::WorkerPanicked(id));
                }
            }
        }
    }

    if let Some(err) = spawn_error {
        return Err(err);
    }

    stats.duration = start.elapsed();

    let matched = flag.winner().cloned();
    let found = flag.is_set();

    debug!(found, duration_ms = stats.duration.as_millis() as u64, "search completed");

    Ok(SearchOutcome {
        found,
        matched,
        stats,
        errors,
    })
}
