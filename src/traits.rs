use std::ffi::OsStr;
use std::path::Path;

use crate::entry::Entry;
use crate::error::FinderError;

/// The filesystem collaborator the search runs against.
///
/// [`FsSource`](crate::fs::FsSource) is the real-disk implementation.
/// Implement this to search an in-memory tree, a remote listing API, or a
/// fixture that fails on purpose.
///
/// # Thread Safety
///
/// `Send + Sync` are required: one source is shared by every worker and
/// `list_children` is called concurrently on different directories.
///
/// # Error Handling
///
/// `list_children` returns `Err` when the directory itself cannot be read.
/// The search treats such a directory as empty and keeps going; it never
/// aborts a run because of a listing failure.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use parfind::{Entry, EntryKind, FinderError, Source};
///
/// struct Flat(Vec<&'static str>);
///
/// impl Source for Flat {
///     fn entry(&self, path: &Path) -> Result<Entry, FinderError> {
///         Ok(Entry::new(path, EntryKind::Dir))
///     }
///
///     fn list_children(&self, dir: &Entry) -> Result<Vec<Entry>, FinderError> {
///         Ok(self.0.iter().map(|n| Entry::new(dir.path.join(n), EntryKind::File)).collect())
///     }
/// }
/// ```
pub trait Source: Send + Sync {
    /// Resolve `path` to an entry. Used to validate the search root.
    fn entry(&self, path: &Path) -> Result<Entry, FinderError>;

    /// List the immediate children of `dir`, in whatever order the
    /// underlying store yields them.
    fn list_children(&self, dir: &Entry) -> Result<Vec<Entry>, FinderError>;
}

/// Decides whether a non-directory entry is the file being looked for.
///
/// # Thread Safety
///
/// `Send + Sync` are required: matchers are shared across workers and
/// called concurrently on different entries.
///
/// # Example
///
/// ```rust
/// use parfind::{Matcher, Entry};
///
/// struct CaseInsensitive(String);
///
/// impl Matcher for CaseInsensitive {
///     fn is_match(&self, entry: &Entry) -> bool {
///         entry.name.eq_ignore_ascii_case(&self.0)
///     }
/// }
/// ```
pub trait Matcher: Send + Sync {
    /// Returns `true` if this entry is a match.
    fn is_match(&self, entry: &Entry) -> bool;
}

/// Matches entries whose name equals the target exactly.
///
/// Compares the raw final path component rather than [`Entry::name`], which
/// is a lossy UTF-8 rendering: a file named `a\xff` does not match `"a\u{FFFD}"`.
#[derive(Debug, Clone)]
pub struct NameMatcher {
    name: String,
}

impl NameMatcher {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Matcher for NameMatcher {
    fn is_match(&self, entry: &Entry) -> bool {
        entry.path.file_name() == Some(OsStr::new(&self.name))
    }
}
