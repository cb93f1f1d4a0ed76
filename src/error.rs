//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for start-up and command-line operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Errors raised while walking, reading or resolving documentation paths.
#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    /// A single file could not be read during a bulk scan.
    #[error("Failed to read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The documentation root (or a directory under it) is missing or inaccessible.
    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The requested path escapes the documentation root.
    #[error("Invalid documentation path '{path}': must be relative to the docs root")]
    InvalidPath { path: String },
}

impl DocsError {
    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}

/// Missing entries and path components that are files rather than directories.
pub(crate) fn is_missing(err: &std::io::Error) -> bool {
    matches!(
        err.kind(),
        std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory
    )
}
