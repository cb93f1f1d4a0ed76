//! Recursive discovery of documentation files.

use super::cache::{FileCache, FileListing};
use crate::error::DocsError;
use ignore::WalkBuilder;
use std::io;
use std::path::{Path, PathBuf};

/// File extensions treated as documentation.
pub const DOC_EXTENSIONS: &[&str] = &["mdx", "md"];

/// Check whether a path names a documentation file by extension.
pub fn is_doc_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| DOC_EXTENSIONS.contains(&ext))
}

/// Read a documentation file as text.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD, so only I/O failures
/// are errors.
pub async fn read_doc_text(path: &Path) -> io::Result<String> {
    let bytes = tokio::fs::read(path).await?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

/// Result of a single uncached walk.
#[derive(Debug)]
pub(crate) struct WalkListing {
    /// Every documentation file under the root, in walk order.
    pub files: Vec<PathBuf>,
    /// Every directory visited, the root included.
    pub dirs: Vec<PathBuf>,
}

impl WalkListing {
    /// Split the listing into one cache entry per visited directory.
    fn into_cache_entries(self) -> Vec<(PathBuf, Vec<PathBuf>)> {
        let Self { files, dirs } = self;
        dirs.into_iter()
            .map(|dir| {
                let below: Vec<PathBuf> = files
                    .iter()
                    .filter(|file| file.starts_with(&dir))
                    .cloned()
                    .collect();
                (dir, below)
            })
            .collect()
    }
}

/// List every documentation file under `dir`, using the cache when possible.
///
/// The first walk of a directory also caches every subdirectory it passes
/// through, so later lookups below it are free. Two callers walking the same
/// uncached directory at once both do the work; the cache keeps one result.
pub async fn walk_doc_files(cache: &FileCache, dir: &Path) -> Result<FileListing, DocsError> {
    if let Some(files) = cache.get(dir).await {
        tracing::trace!("Listing cache hit for {}", dir.display());
        return Ok(files);
    }

    let root = dir.to_path_buf();
    let listing = tokio::task::spawn_blocking(move || collect_doc_files(&root))
        .await
        .map_err(|e| DocsError::filesystem(dir, io::Error::other(e)))??;

    tracing::debug!(
        "Walked {}: {} documentation files in {} directories",
        dir.display(),
        listing.files.len(),
        listing.dirs.len()
    );

    let files = listing.files.clone();
    cache.insert_many(listing.into_cache_entries()).await;
    Ok(cache.insert(dir.to_path_buf(), files).await)
}

/// Walk `root` synchronously, collecting documentation files depth-first.
///
/// Entries in each directory are visited in file-name order so the listing
/// is stable across runs. Hidden files and ignore files are not special.
pub(crate) fn collect_doc_files(root: &Path) -> Result<WalkListing, DocsError> {
    let metadata = std::fs::metadata(root).map_err(|e| DocsError::filesystem(root, e))?;
    if !metadata.is_dir() {
        return Err(DocsError::filesystem(
            root,
            io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
        ));
    }

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    let mut dirs = Vec::new();

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = walk_error_path(&e).unwrap_or_else(|| root.to_path_buf());
            let source = e
                .into_io_error()
                .unwrap_or_else(|| io::Error::other("directory walk failed"));
            DocsError::filesystem(path, source)
        })?;

        let Some(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            dirs.push(entry.into_path());
        } else if file_type.is_file() && is_doc_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(WalkListing { files, dirs })
}

fn walk_error_path(err: &ignore::Error) -> Option<PathBuf> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.clone()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            walk_error_path(err)
        }
        _ => None,
    }
}
