//! Handler for the `kaibanjsDocs` tool.

use crate::resolve::{DocLookup, find_nearest_directory, read_doc_content, validate_doc_path};
use crate::search::matching_paths_suggestion;
use crate::state::DocsState;
use futures::future::join_all;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocsRequest {
    /// One or more documentation paths to fetch (e.g. "get-started", "reference/agents")
    pub paths: Vec<String>,
    /// Keywords from the user query to use for matching documentation. Each keyword should
    /// be a single word or short phrase; whitespace-separated keywords are split automatically.
    #[serde(default)]
    pub query_keywords: Option<Vec<String>>,
}

/// Answer for one requested path: content, or an error/suggestion message.
#[derive(Debug)]
struct PathResult {
    path: String,
    body: Result<String, String>,
}

impl PathResult {
    fn render(&self) -> String {
        let text = match &self.body {
            Ok(content) | Err(content) => content,
        };
        format!("## {}\n\n{}\n\n---\n", self.path, text)
    }
}

/// Fetch every requested path concurrently and join the answers in request order.
///
/// A failure on one path produces an error block for that path only.
pub async fn handle_docs(state: &DocsState, request: DocsRequest) -> Result<String, String> {
    tracing::debug!(paths = ?request.paths, "Executing kaibanjsDocs tool");

    if request.paths.is_empty() {
        tracing::error!("kaibanjsDocs called without any paths");
        return Err("At least one documentation path is required".to_string());
    }

    let query_keywords = request.query_keywords.unwrap_or_default();

    let results = join_all(
        request
            .paths
            .iter()
            .map(|path| resolve_path(state, path, &query_keywords)),
    )
    .await;

    Ok(results
        .iter()
        .map(PathResult::render)
        .collect::<Vec<_>>()
        .join("\n"))
}

async fn resolve_path(state: &DocsState, path: &str, query_keywords: &[String]) -> PathResult {
    let body = lookup(state, path, query_keywords).await.unwrap_or_else(Err);
    PathResult {
        path: path.to_string(),
        body,
    }
}

/// Outer error: the lookup itself failed. Inner error: path missing, with suggestions.
async fn lookup(
    state: &DocsState,
    path: &str,
    query_keywords: &[String],
) -> Result<Result<String, String>, String> {
    validate_doc_path(path).map_err(|e| {
        tracing::warn!(path, error = %e, "Rejected documentation path");
        e.to_string()
    })?;

    let lookup = read_doc_content(state, path, query_keywords)
        .await
        .map_err(|e| {
            tracing::warn!(path, error = %e, "Failed to read content for path");
            e.to_string()
        })?;

    match lookup {
        DocLookup::Found(content) => Ok(Ok(content)),
        DocLookup::NotFound => {
            let directory_suggestions = find_nearest_directory(state, path).await;
            let content_suggestions = matching_paths_suggestion(
                state.cache(),
                path,
                query_keywords,
                state.docs_dir(),
            )
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(path, error = %e, "Content search failed for missing path");
                String::new()
            });

            Ok(Err(format!(
                "{}\n\n{}",
                directory_suggestions, content_suggestions
            )))
        }
    }
}
