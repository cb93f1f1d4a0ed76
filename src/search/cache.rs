//! In-memory cache of documentation file listings.
//!
//! Listings are keyed by the directory that was walked and hold every
//! documentation file beneath it. Entries are never invalidated while the
//! process runs; edits to the docs tree after the first walk are not seen.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared list of absolute file paths under one directory.
pub type FileListing = Arc<[PathBuf]>;

/// Directory → recursive file listing cache.
///
/// Owned by [`DocsState`](crate::state::DocsState) and passed to the walker
/// explicitly, so every test gets its own cache.
#[derive(Debug, Default)]
pub struct FileCache {
    listings: RwLock<HashMap<PathBuf, FileListing>>,
}

impl FileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached listing for a directory.
    pub async fn get(&self, dir: &Path) -> Option<FileListing> {
        self.listings.read().await.get(dir).cloned()
    }

    /// Check whether a directory has been walked.
    pub async fn contains(&self, dir: &Path) -> bool {
        self.listings.read().await.contains_key(dir)
    }

    /// Number of cached directories.
    pub async fn len(&self) -> usize {
        self.listings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.listings.read().await.is_empty()
    }

    /// Insert listings for several directories at once.
    ///
    /// The first listing stored for a directory wins. Two walks racing on the
    /// same directory produce identical listings, so dropping the later one
    /// loses nothing.
    pub async fn insert_many(&self, entries: Vec<(PathBuf, Vec<PathBuf>)>) {
        let mut listings = self.listings.write().await;
        for (dir, files) in entries {
            listings.entry(dir).or_insert_with(|| files.into());
        }
    }

    /// Insert one listing, returning whichever listing is now cached.
    pub async fn insert(&self, dir: PathBuf, files: Vec<PathBuf>) -> FileListing {
        let mut listings = self.listings.write().await;
        listings.entry(dir).or_insert_with(|| files.into()).clone()
    }
}
