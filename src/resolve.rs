//! Resolution of requested documentation paths to content or suggestions.
//!
//! A path names either a documentation file (returned verbatim), a directory
//! (rendered as a listing plus the contents of its files), or nothing. Missing
//! paths are answered by [`find_nearest_directory`], which lists the closest
//! existing ancestor.

use crate::error::{DocsError, is_missing};
use crate::search::{is_doc_file, matching_paths_suggestion, read_doc_text};
use crate::state::DocsState;
use std::fmt::Write as _;
use std::path::{Component, Path};

/// Immediate contents of a documentation directory, sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirListing {
    /// Subdirectory names with a trailing `/`
    pub dirs: Vec<String>,
    /// Documentation file names
    pub files: Vec<String>,
}

/// Outcome of reading a documentation path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocLookup {
    Found(String),
    NotFound,
}

/// Reject absolute paths and paths that climb out of the docs root.
pub fn validate_doc_path(doc_path: &str) -> Result<(), DocsError> {
    let escapes = Path::new(doc_path).components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });

    if escapes {
        Err(DocsError::InvalidPath {
            path: doc_path.to_string(),
        })
    } else {
        Ok(())
    }
}

/// List the immediate subdirectories and documentation files of `dir`.
pub async fn list_dir_contents(dir: &Path) -> Result<DirListing, DocsError> {
    tracing::debug!("Listing directory contents: {}", dir.display());

    let mut listing = DirListing::default();
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| DocsError::filesystem(dir, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| DocsError::filesystem(dir, e))?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| DocsError::filesystem(entry.path(), e))?;
        let name = entry.file_name().to_string_lossy().into_owned();

        if file_type.is_dir() {
            listing.dirs.push(format!("{}/", name));
        } else if file_type.is_file() && is_doc_file(Path::new(&name)) {
            listing.files.push(name);
        }
    }

    listing.dirs.sort();
    listing.files.sort();
    Ok(listing)
}

/// Read a documentation path relative to the docs root.
///
/// Files are returned verbatim. Directories are rendered as a listing, the
/// contents of every file directly inside them, and related paths ranked
/// against `query_keywords`.
pub async fn read_doc_content(
    state: &DocsState,
    doc_path: &str,
    query_keywords: &[String],
) -> Result<DocLookup, DocsError> {
    let full_path = state.docs_dir().join(doc_path);
    tracing::debug!("Reading documentation from: {}", full_path.display());

    let metadata = match tokio::fs::metadata(&full_path).await {
        Ok(metadata) => metadata,
        Err(e) if is_missing(&e) => {
            tracing::debug!("Documentation path not found: {}", full_path.display());
            return Ok(DocLookup::NotFound);
        }
        Err(e) => {
            tracing::error!(path = %full_path.display(), error = %e, "Failed to read documentation");
            return Err(DocsError::filesystem(full_path, e));
        }
    };

    if metadata.is_dir() {
        let document = render_directory(state, doc_path, &full_path, query_keywords)
            .await
            .inspect_err(|e| {
                tracing::error!(path = %full_path.display(), error = %e, "Failed to read documentation directory");
            })?;
        return Ok(DocLookup::Found(document));
    }

    match read_doc_text(&full_path).await {
        Ok(content) => Ok(DocLookup::Found(content)),
        Err(e) if is_missing(&e) => Ok(DocLookup::NotFound),
        Err(e) => {
            tracing::error!(path = %full_path.display(), error = %e, "Failed to read documentation");
            Err(DocsError::filesystem(full_path, e))
        }
    }
}

async fn render_directory(
    state: &DocsState,
    doc_path: &str,
    full_path: &Path,
    query_keywords: &[String],
) -> Result<String, DocsError> {
    let DirListing { dirs, files } = list_dir_contents(full_path).await?;

    let mut lines = vec![format!("Directory contents of {}:", doc_path), String::new()];
    lines.push(
        if dirs.is_empty() {
            "No subdirectories."
        } else {
            "Subdirectories:"
        }
        .to_string(),
    );
    lines.extend(dirs.iter().map(|d| format!("- {}", d)));
    lines.push(String::new());
    lines.push(
        if files.is_empty() {
            "No files in this directory."
        } else {
            "Files in this directory:"
        }
        .to_string(),
    );
    lines.extend(files.iter().map(|f| format!("- {}", f)));
    lines.extend(
        ["", "---", "", "Contents of all files in this directory:", ""].map(String::from),
    );

    let mut document = lines.join("\n");

    for file in &files {
        let file_path = full_path.join(file);
        let content = read_doc_text(&file_path)
            .await
            .map_err(|e| DocsError::filesystem(&file_path, e))?;
        let _ = write!(document, "\n\n# {}\n\n{}", file, content);
    }

    let suggestions =
        matching_paths_suggestion(state.cache(), doc_path, query_keywords, state.docs_dir())
            .await?;
    let _ = write!(document, "\n\n---\n\n{}\n", suggestions);

    Ok(document)
}

/// Describe the closest existing ancestor directory of a missing path.
///
/// Tries the path itself, then each shorter `/`-prefix. Falls back to the
/// top-level listing when no ancestor exists.
pub async fn find_nearest_directory(state: &DocsState, doc_path: &str) -> String {
    tracing::debug!("Finding nearest directory for: {}", doc_path);

    let mut parts: Vec<&str> = doc_path.split('/').collect();

    while !parts.is_empty() {
        let test_path = parts.join("/");
        let full_path = state.docs_dir().join(&test_path);

        let is_dir = tokio::fs::metadata(&full_path)
            .await
            .is_ok_and(|metadata| metadata.is_dir());

        if is_dir {
            match list_dir_contents(&full_path).await {
                Ok(listing) => return render_nearest(doc_path, &test_path, &listing),
                Err(e) => tracing::debug!("Failed to list {}: {}", test_path, e),
            }
        }

        parts.pop();
        tracing::debug!("Directory not found, trying parent: {}", parts.join("/"));
    }

    [
        format!("Path \"{}\" not found.", doc_path),
        "Here are all available paths:".to_string(),
        String::new(),
        state.available_paths().to_string(),
    ]
    .join("\n")
}

fn render_nearest(doc_path: &str, test_path: &str, listing: &DirListing) -> String {
    let mut lines = vec![
        format!("Path \"{}\" not found.", doc_path),
        format!("Here are the available paths in \"{}\":", test_path),
        String::new(),
        if listing.dirs.is_empty() {
            "No subdirectories."
        } else {
            "Directories:"
        }
        .to_string(),
    ];
    lines.extend(listing.dirs.iter().map(|d| format!("- {}/{}", test_path, d)));
    lines.push(String::new());
    lines.push(
        if listing.files.is_empty() {
            "No files."
        } else {
            "Files:"
        }
        .to_string(),
    );
    lines.extend(
        listing
            .files
            .iter()
            .map(|f| format!("- {}/{}", test_path, f)),
    );
    lines.join("\n")
}

/// Render the top-level listing of the docs root.
///
/// Includes one level of `reference/` subdirectories when that section exists.
pub async fn available_paths(docs_dir: &Path) -> Result<String, DocsError> {
    let DirListing { dirs, files } = list_dir_contents(docs_dir).await.inspect_err(|e| {
        tracing::error!(error = %e, "Failed to list documentation root");
    })?;

    let reference_dirs: Vec<String> = if dirs.iter().any(|d| d == "reference/") {
        list_dir_contents(&docs_dir.join("reference"))
            .await?
            .dirs
            .into_iter()
            .map(|d| format!("reference/{}", d))
            .collect()
    } else {
        Vec::new()
    };

    let mut lines = vec![
        "Available top-level paths:".to_string(),
        "Directories:".to_string(),
    ];
    lines.extend(dirs.iter().map(|d| format!("- {}", d)));
    if !reference_dirs.is_empty() {
        lines.push("Reference subdirectories:".to_string());
        lines.extend(reference_dirs.iter().map(|d| format!("- {}", d)));
    }
    lines.push("Files:".to_string());
    lines.extend(files.iter().map(|f| format!("- {}", f)));

    Ok(lines.join("\n"))
}
