use std::path::PathBuf;
use std::sync::Arc;

use crate::engine::{run, EngineOptions};
use crate::error::FinderError;
use crate::fs::FsSource;
use crate::results::SearchOutcome;
use crate::traits::{Matcher, NameMatcher, Source};

/// Worker count used when none is configured.
pub const DEFAULT_WORKERS: usize = 4;

// ---------------------------------------------------------------------------
// SearchBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and executing a search.
///
/// Created via [`parfind::search()`](crate::search). Configure with chained
/// builder methods, then call [`run()`](SearchBuilder::run) to execute.
///
/// # Example
///
/// ```rust,no_run
/// let outcome = parfind::search()
///     .root("/var/log")
///     .named("syslog")
///     .workers(8)
///     .collect_errors(true)
///     .run()?;
///
/// if let Some(path) = outcome.path() {
///     println!("found {}", path.display());
/// }
/// # Ok::<(), parfind::FinderError>(())
/// ```
pub struct SearchBuilder {
    root:           Option<PathBuf>,
    source:         Arc<dyn Source>,
    target:         Option<String>,
    matcher:        Option<Arc<dyn Matcher>>,
    workers:        usize,
    collect_errors: bool,
}

impl Default for SearchBuilder {
    fn default() -> Self {
        Self {
            root:           None,
            source:         Arc::new(FsSource),
            target:         None,
            matcher:        None,
            workers:        DEFAULT_WORKERS,
            collect_errors: false,
        }
    }
}

impl SearchBuilder {
    // ── Root & source ─────────────────────────────────────────────────────

    /// The directory to search. Must exist and be a directory.
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Search a custom [`Source`] instead of the local filesystem.
    pub fn source(mut self, s: impl Source + 'static) -> Self {
        self.source = Arc::new(s);
        self
    }

    // ── Target ────────────────────────────────────────────────────────────

    /// Look for a file whose name is exactly `name`.
    ///
    /// Replaces any matcher set with `.with_matcher()`.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.target = Some(name.into());
        self.matcher = None;
        self
    }

    /// Use custom matching logic instead of an exact name.
    ///
    /// Replaces any name set with `.named()`.
    pub fn with_matcher(mut self, m: impl Matcher + 'static) -> Self {
        self.matcher = Some(Arc::new(m));
        self.target = None;
        self
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Number of worker threads. Defaults to [`DEFAULT_WORKERS`].
    ///
    /// Fewer threads are started when there are fewer directories to hand out.
    pub fn workers(mut self, n: usize) -> Self {
        self.workers = n;
        self
    }

    /// Collect non-fatal errors into [`SearchOutcome::errors`].
    ///
    /// Disabled by default. When enabled, unreadable directories and
    /// panicked workers are recorded instead of only being logged.
    pub fn collect_errors(mut self, yes: bool) -> Self {
        self.collect_errors = yes;
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Validate the configuration and run the search.
    ///
    /// Blocks until every worker has finished.
    ///
    /// # Errors
    ///
    /// Returns `Err` before any worker starts for an empty or missing target,
    /// a zero worker count, or a root that is missing or not a directory.
    /// Returns [`FinderError::ThreadPool`] if a worker thread cannot be spawned.
    pub fn run(self) -> Result<SearchOutcome, FinderError> {
        let matcher: Arc<dyn Matcher> = match (self.matcher, self.target) {
            (Some(m), _) => m,
            (None, Some(name)) if name.is_empty() => return Err(FinderError::EmptyTarget),
            (None, Some(name)) => Arc::new(NameMatcher::new(name)),
            (None, None) => return Err(FinderError::NoTarget),
        };

        if self.workers == 0 {
            return Err(FinderError::InvalidWorkerCount(self.workers));
        }

        let root_path = self.root.ok_or(FinderError::NoRoot)?;
        let root = self.source.entry(&root_path)?;
        if !root.is_dir() {
            return Err(FinderError::NotADirectory(root.path));
        }

        let opts = EngineOptions {
            workers:        self.workers,
            source:         self.source,
            matcher,
            collect_errors: self.collect_errors,
        };

        run(root, opts)
    }
}
