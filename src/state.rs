//! Shared server state: docs root, listing cache and the top-level path index.

use crate::error::DocsError;
use crate::resolve::available_paths;
use crate::search::FileCache;
use std::path::{Path, PathBuf};

/// Documentation state shared by every tool call.
#[derive(Debug)]
pub struct DocsState {
    /// Root of the served documentation snapshot
    docs_dir: PathBuf,

    /// Recursive file listings, filled on first walk
    cache: FileCache,

    /// Rendered top-level listing, computed once at start-up
    available_paths: String,
}

impl DocsState {
    /// Create state with a precomputed top-level listing.
    pub fn new(docs_dir: impl Into<PathBuf>, available_paths: String) -> Self {
        Self {
            docs_dir: docs_dir.into(),
            cache: FileCache::new(),
            available_paths,
        }
    }

    /// Load state for a docs directory, listing its top level.
    ///
    /// Fails if the directory is missing or unreadable.
    pub async fn load(docs_dir: impl Into<PathBuf>) -> Result<Self, DocsError> {
        let docs_dir = docs_dir.into();
        let available = available_paths(&docs_dir).await?;
        tracing::debug!("Loaded documentation index from {}", docs_dir.display());
        Ok(Self::new(docs_dir, available))
    }

    pub fn docs_dir(&self) -> &Path {
        &self.docs_dir
    }

    pub fn cache(&self) -> &FileCache {
        &self.cache
    }

    /// The top-level listing shown when a path has no existing ancestor.
    pub fn available_paths(&self) -> &str {
        &self.available_paths
    }
}
