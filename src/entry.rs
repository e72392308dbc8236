use std::path::PathBuf;

/// A single directory entry handed out by a [`Source`](crate::traits::Source).
///
/// A read-only view: the search never mutates or owns the underlying file.
/// `path` is absolute when produced by [`FsSource`](crate::fs::FsSource);
/// custom sources may use any path shape they like as long as they accept
/// it back in [`Source::list_children`](crate::traits::Source::list_children).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Full path to the entry.
    pub path: PathBuf,

    /// The final path component, lossily converted to UTF-8. Exact name
    /// matching goes through `path` instead, see [`NameMatcher`](crate::NameMatcher).
    pub name: String,

    /// What kind of entry this is.
    pub kind: EntryKind,
}

impl Entry {
    /// Build an entry, taking the name from the last path component.
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name, kind }
    }

    /// Whether the search descends into this entry.
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

/// The kind of a listed entry.
///
/// Only `Dir` is traversed. Everything else is a leaf that may match by name.
/// [`FsSource`](crate::fs::FsSource) resolves symlinks to the kind of their
/// target, so `Symlink` only ever marks a dangling link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file.
    File,

    /// A directory.
    Dir,

    /// A symbolic link whose target cannot be resolved.
    Symlink,

    /// Anything else (device files, pipes, sockets, etc.).
    Other,
}
