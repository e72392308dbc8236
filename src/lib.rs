//! # parfind
//!
//! Parallel first-match file finder.
//!
//! parfind looks for one file by name under a directory tree. The root and
//! its immediate subdirectories are dealt out round-robin to a fixed number
//! of worker threads; each worker walks its share depth-first and everyone
//! stops as soon as any of them finds the file. First found wins, not best
//! found.
//!
//! Workers only share a [`FoundFlag`]: a one-way atomic boolean with a
//! write-once slot for the winning [`MatchResult`]. Cancellation is
//! cooperative. Workers poll the flag before every directory and every entry.
//!
//! # Quick Start
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! std::fs::create_dir_all(dir.path().join("a/b"))?;
//! std::fs::write(dir.path().join("a/b/needle.txt"), "")?;
//!
//! let outcome = parfind::search()
//!     .root(dir.path())
//!     .named("needle.txt")
//!     .workers(4)
//!     .run()?;
//!
//! assert!(outcome.found);
//! assert!(outcome.path().unwrap().ends_with("a/b/needle.txt"));
//! # Ok(())
//! # }
//! ```
//!
//! # Custom Sources
//!
//! The filesystem is reached only through [`Source`], so anything with a
//! directory shape can be searched: implement [`Source`] and pass it to
//! [`SearchBuilder::source`]. A [`Source`] whose listing fails is treated as
//! an empty directory; the rest of the tree is still searched.

#![forbid(unsafe_code)]

pub mod engine;
pub mod worker;

mod builder;
mod entry;
mod error;
mod flag;
mod fs;
mod results;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::{SearchBuilder, DEFAULT_WORKERS};
pub use entry::{Entry, EntryKind};
pub use error::FinderError;
pub use flag::FoundFlag;
pub use fs::FsSource;
pub use results::{MatchResult, ScanStats, SearchOutcome};
pub use traits::{Matcher, NameMatcher, Source};

use std::path::Path;

// ── Entry points ──────────────────────────────────────────────────────────────

/// Create a new [`SearchBuilder`] to configure and run a search.
pub fn search() -> SearchBuilder {
    SearchBuilder::default()
}

/// Search the local filesystem under `root` for a file named `target`
/// using `workers` threads.
///
/// Shorthand for `search().root(root).named(target).workers(workers).run()`.
///
/// ```rust,no_run
/// let outcome = parfind::run_search("/etc", "hosts", 4)?;
/// println!("found: {}", outcome.found);
/// # Ok::<(), parfind::FinderError>(())
/// ```
pub fn run_search(
    root: impl AsRef<Path>,
    target: &str,
    workers: usize,
) -> Result<SearchOutcome, FinderError> {
    search()
        .root(root.as_ref())
        .named(target)
        .workers(workers)
        .run()
}
