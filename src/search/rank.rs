//! Content search over the documentation tree.

use super::cache::FileCache;
use super::keywords::combined_keywords;
use super::scoring::MatchScore;
use super::walk::{read_doc_text, walk_doc_files};
use crate::error::DocsError;
use ahash::AHashSet;
use std::fmt::Write as _;
use std::path::Path;

/// Maximum number of ranked paths returned by a search.
pub const MAX_RESULTS: usize = 10;

/// Render a file path relative to the docs root with `/` separators.
pub fn relative_doc_path(base_dir: &Path, file: &Path) -> String {
    file.strip_prefix(base_dir)
        .unwrap_or(file)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Rank every documentation file under `base_dir` against `keywords`.
///
/// Matching is case-insensitive. Files are decoded lossily and skipped only
/// when they cannot be read at all. Returns at most [`MAX_RESULTS`] relative
/// paths, best first; equal scores keep walk order.
pub async fn search_document_content(
    cache: &FileCache,
    keywords: &[String],
    base_dir: &Path,
) -> Result<Vec<String>, DocsError> {
    if keywords.is_empty() {
        return Ok(Vec::new());
    }

    let mut seen = AHashSet::new();
    let keywords: Vec<String> = keywords
        .iter()
        .map(|k| k.to_lowercase())
        .filter(|k| seen.insert(k.clone()))
        .collect();
    let files = walk_doc_files(cache, base_dir).await?;
    let mut scores = Vec::new();

    for file in files.iter() {
        let content = match read_doc_text(file).await {
            Ok(content) => content,
            Err(source) => {
                let err = DocsError::Unreadable {
                    path: file.clone(),
                    source,
                };
                tracing::debug!("Skipping file during content search: {}", err);
                continue;
            }
        };

        let path = relative_doc_path(base_dir, file);
        if let Some(score) = MatchScore::score_document(path, &content, &keywords) {
            scores.push(score);
        }
    }

    Ok(rank(scores, keywords.len()))
}

/// Order scored files best first and keep the top [`MAX_RESULTS`] paths.
pub fn rank(mut scores: Vec<MatchScore>, total_keywords: usize) -> Vec<String> {
    // sort_by is stable: ties stay in walk order
    scores.sort_by(|a, b| {
        b.final_score(total_keywords)
            .cmp(&a.final_score(total_keywords))
    });

    scores
        .into_iter()
        .take(MAX_RESULTS)
        .map(|score| score.path)
        .collect()
}

/// Build the "related paths" block for a requested documentation path.
///
/// Returns an empty string when the path and query yield no keywords or no
/// document matches.
pub async fn matching_paths_suggestion(
    cache: &FileCache,
    path: &str,
    query_keywords: &[String],
    base_dir: &Path,
) -> Result<String, DocsError> {
    let keywords = combined_keywords(path, query_keywords);
    if keywords.is_empty() {
        return Ok(String::new());
    }

    let suggested = search_document_content(cache, &keywords, base_dir).await?;
    if suggested.is_empty() {
        return Ok(String::new());
    }

    let mut output =
        String::from("Here are some paths that might be relevant based on your query:\n\n");
    for (i, path) in suggested.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        let _ = write!(output, "- {}", path);
    }

    Ok(output)
}
