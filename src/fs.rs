use std::path::{Path, PathBuf};

use ignore::{DirEntry, WalkBuilder};
use tracing::debug;

use crate::entry::{Entry, EntryKind};
use crate::error::FinderError;
use crate::traits::Source;

// ---------------------------------------------------------------------------
// FsSource
// ---------------------------------------------------------------------------

/// The local filesystem.
///
/// Listings go through `ignore` with every filter switched off, so hidden
/// files, `.gitignore`d paths and parent ignore files make no difference:
/// a directory lists exactly what `readdir` returns. A symlink takes the kind
/// of its target, so links to directories are descended into; there is no
/// cycle detection. Only a dangling link is reported as [`EntryKind::Symlink`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl Source for FsSource {
    fn entry(&self, path: &Path) -> Result<Entry, FinderError> {
        let path = std::path::absolute(path).map_err(|e| FinderError::from_io(path, e))?;
        let meta = std::fs::metadata(&path).map_err(|e| FinderError::from_io(&path, e))?;

        let kind = if meta.is_dir() {
            EntryKind::Dir
        } else if meta.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        };

        Ok(Entry::new(path, kind))
    }

    fn list_children(&self, dir: &Entry) -> Result<Vec<Entry>, FinderError> {
        let walker = WalkBuilder::new(&dir.path)
            .standard_filters(false)
            .ignore(false)
            .parents(false)
            .hidden(false)
            .follow_links(false)
            .same_file_system(false)
            .max_depth(Some(1))
            .build();

        let mut children = Vec::new();
        for res in walker {
            let dent = match res {
                Ok(d) => d,
                Err(e) => {
                    let err = map_ignore_error(e);
                    // Failing to read `dir` itself makes the whole listing fail;
                    // a single bad child is only skipped.
                    if err.path().map_or(true, |p| p == &dir.path) {
                        return Err(err);
                    }
                    debug!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };

            // Skip the directory itself
            if dent.depth() == 0 {
                continue;
            }

            children.push(to_entry(dent));
        }

        Ok(children)
    }
}

fn to_entry(dent: DirEntry) -> Entry {
    let kind = match dent.file_type() {
        Some(ft) if ft.is_dir() => EntryKind::Dir,
        Some(ft) if ft.is_file() => EntryKind::File,
        Some(ft) if ft.is_symlink() => link_target_kind(dent.path()),
        _ => EntryKind::Other,
    };

    Entry {
        name: dent.file_name().to_string_lossy().into_owned(),
        path: dent.into_path(),
        kind,
    }
}

/// Classify a symlink by what it points at.
fn link_target_kind(path: &Path) -> EntryKind {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => EntryKind::Dir,
        Ok(meta) if meta.is_file() => EntryKind::File,
        Ok(_) => EntryKind::Other,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "dangling symlink");
            EntryKind::Symlink
        }
    }
}

// ---------------------------------------------------------------------------
// Map ignore::Error to FinderError
// ---------------------------------------------------------------------------

fn map_ignore_error(e: ignore::Error) -> FinderError {
    match e {
        ignore::Error::WithDepth { err, .. } => map_ignore_error(*err),
        ignore::Error::WithPath { path, err } => match *err {
            ignore::Error::Io(io_err) => FinderError::from_io(path, io_err),
            other => FinderError::Source(format!("{}: {}", path.display(), other)),
        },
        ignore::Error::Io(io_err) => FinderError::Io {
            path: PathBuf::new(),
            source: io_err,
        },
        other => FinderError::Source(other.to_string()),
    }
}
