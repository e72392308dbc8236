use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinderError {
    // Arguments
    #[error("target file name cannot be empty")]
    EmptyTarget,

    #[error("no target file name or matcher provided")]
    NoTarget,

    #[error("no root directory provided")]
    NoRoot,

    #[error("invalid worker count: {0}")]
    InvalidWorkerCount(usize),

    #[error("path does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    // Traversal
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("IO error at {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Runtime
    #[error("thread pool failure: {0}")]
    ThreadPool(String),

    #[error("worker {0} panicked")]
    WorkerPanicked(usize),

    // Third-party extensibility
    #[error("source error: {0}")]
    Source(String),
}

impl FinderError {
    /// Map an I/O error at `path` onto the closest variant.
    pub fn from_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            _ => Self::Io { path, source: err },
        }
    }

    /// The path this error occurred at, if applicable.
    /// Callers use this to present "Skipped: <path>" without pattern matching on variants.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::NotFound(p)
            | Self::NotADirectory(p)
            | Self::PermissionDenied(p)
            | Self::Io { path: p, .. } => Some(p),
            _ => None,
        }
    }

    /// Whether the search can continue after this error.
    ///
    /// Recoverable errors (an unreadable or vanished directory, a panicked
    /// worker) are collected and surfaced after the search completes.
    ///
    /// Fatal errors (bad arguments, thread pool failure) halt before or
    /// instead of producing an outcome.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied(_)
                | Self::NotFound(_)
                | Self::Io { .. }
                | Self::WorkerPanicked(_)
                | Self::Source(_)
        )
    }
}
