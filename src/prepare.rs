//! Rebuilding the served documentation snapshot from the docs source tree.

use crate::error::Result;
use crate::search::is_doc_file;
use anyhow::{Context, bail};
use ignore::WalkBuilder;
use std::path::Path;

/// Replace `dest` with a copy of the documentation files under `source`.
///
/// Directories are recreated as-is; only `.md` and `.mdx` files are copied.
/// Returns the number of files copied.
pub fn copy_docs(source: &Path, dest: &Path) -> Result<usize> {
    if !source.is_dir() {
        bail!("Documentation source {} is not a directory", source.display());
    }

    match std::fs::remove_dir_all(dest) {
        Ok(()) => tracing::debug!("Removed previous snapshot at {}", dest.display()),
        Err(e) => tracing::debug!("No previous snapshot removed at {}: {}", dest.display(), e),
    }

    std::fs::create_dir_all(dest)
        .with_context(|| format!("Failed to create {}", dest.display()))?;

    let walker = WalkBuilder::new(source)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut copied = 0;
    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", source.display()))?;
        let Some(file_type) = entry.file_type() else {
            continue;
        };
        let relative = entry
            .path()
            .strip_prefix(source)
            .context("Walked entry outside the source tree")?;
        let target = dest.join(relative);

        if file_type.is_dir() {
            std::fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create {}", target.display()))?;
        } else if file_type.is_file() && is_doc_file(entry.path()) {
            std::fs::copy(entry.path(), &target).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    entry.path().display(),
                    target.display()
                )
            })?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Rebuild the snapshot on the blocking pool.
pub async fn prepare(source: &Path, dest: &Path) -> Result<usize> {
    tracing::info!("Preparing documentation from {}", source.display());

    let source = source.to_path_buf();
    let dest = dest.to_path_buf();
    let copied = tokio::task::spawn_blocking(move || copy_docs(&source, &dest))
        .await
        .context("Documentation copy task failed")??;

    tracing::info!("Documentation preparation complete: {} files copied", copied);
    Ok(copied)
}
