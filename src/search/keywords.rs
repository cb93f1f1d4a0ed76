//! Keyword extraction from documentation paths and free-text queries.

use ahash::AHashSet;

/// Tokens shorter than this are dropped from path-derived keywords.
const MIN_KEYWORD_LENGTH: usize = 3;

/// Extract keywords from a documentation path.
///
/// Every segment is split on `-`, `_` and before each upper-case ASCII letter,
/// so `custom-tools/WebSearchTool.mdx` yields
/// `["custom", "tools", "web", "search", "tool"]`. The `.md`/`.mdx` extension
/// of the last segment is ignored and tokens of two characters or fewer are
/// dropped.
pub fn keywords_from_path(path: &str) -> Vec<String> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let last = segments.len().saturating_sub(1);

    let tokens = segments.iter().copied().enumerate().flat_map(|(i, segment)| {
        let segment = if i == last {
            strip_doc_extension(segment)
        } else {
            segment
        };
        split_segment(segment)
    });

    dedup_lowercase(
        tokens.filter(|token| token.chars().count() >= MIN_KEYWORD_LENGTH),
    )
}

/// Split free-text keywords on whitespace, lowercase and de-duplicate them.
pub fn normalize_keywords<I, S>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = AHashSet::new();
    let mut out = Vec::new();
    for keyword in keywords {
        for term in keyword.as_ref().split_whitespace() {
            let term = term.to_lowercase();
            if seen.insert(term.clone()) {
                out.push(term);
            }
        }
    }
    out
}

/// The keyword set used to rank documents for a requested path.
///
/// Path keywords come first, followed by any new terms from the query.
pub fn combined_keywords(path: &str, query_keywords: &[String]) -> Vec<String> {
    let path_keywords = keywords_from_path(path);
    normalize_keywords(path_keywords.iter().chain(query_keywords))
}

fn strip_doc_extension(name: &str) -> &str {
    name.strip_suffix(".mdx")
        .or_else(|| name.strip_suffix(".md"))
        .unwrap_or(name)
}

/// Split on separators and camelCase boundaries. May yield empty tokens.
fn split_segment(segment: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;

    for (i, c) in segment.char_indices() {
        if c == '-' || c == '_' {
            tokens.push(&segment[start..i]);
            start = i + c.len_utf8();
        } else if c.is_ascii_uppercase() && i > start {
            tokens.push(&segment[start..i]);
            start = i;
        }
    }
    tokens.push(&segment[start..]);
    tokens
}

fn dedup_lowercase<'a>(tokens: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = AHashSet::new();
    tokens
        .map(str::to_lowercase)
        .filter(|token| seen.insert(token.clone()))
        .collect()
}
