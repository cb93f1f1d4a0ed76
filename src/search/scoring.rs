//! Relevance scoring for documentation files.
//!
//! A file's score combines raw keyword hits, hits on title-like lines, a
//! path-based relevance bonus, the number of distinct keywords matched and a
//! flat bonus for matching every keyword.

use std::collections::BTreeSet;

/// Path prefix of the API reference section.
const REFERENCE_PREFIX: &str = "reference/";

/// Path fragments that mark the most frequently requested topics.
const HIGH_VALUE_SEGMENTS: &[&str] = &["rag", "memory", "agents", "workflows"];

const TITLE_WEIGHT: u32 = 3;
const PATH_WEIGHT: u32 = 2;
const DISTINCT_KEYWORD_WEIGHT: u32 = 5;
const ALL_KEYWORDS_BONUS: u32 = 10;

/// Calculate the path-based relevance of a relative documentation path.
///
/// Scoring:
/// - +2 if the path lives under `reference/`
/// - +3 for each keyword contained in the path
/// - +1 if the path mentions any high-value topic
pub fn path_relevance(relative_path: &str, keywords: &[String]) -> u32 {
    let path = relative_path.to_lowercase();
    let mut relevance = 0;

    if path.starts_with(REFERENCE_PREFIX) {
        relevance += 2;
    }

    for keyword in keywords {
        if path.contains(keyword.to_lowercase().as_str()) {
            relevance += 3;
        }
    }

    if HIGH_VALUE_SEGMENTS.iter().any(|segment| path.contains(segment)) {
        relevance += 1;
    }

    relevance
}

/// Whether a lowercased line looks like a heading or title.
///
/// Any `#` or the word "title" anywhere in the line counts.
pub fn is_title_line(lower_line: &str) -> bool {
    lower_line.contains('#') || lower_line.contains("title")
}

/// Accumulated match statistics for one file during one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchScore {
    /// Path relative to the docs root, `/`-separated
    pub path: String,
    /// Distinct keywords found in the file
    pub keyword_matches: BTreeSet<String>,
    /// Keyword hits across all lines
    pub total_matches: u32,
    /// Keyword hits on title-like lines
    pub title_matches: u32,
    pub path_relevance: u32,
}

impl MatchScore {
    pub fn new(path: String, keywords: &[String]) -> Self {
        let path_relevance = path_relevance(&path, keywords);
        Self {
            path,
            keyword_matches: BTreeSet::new(),
            total_matches: 0,
            title_matches: 0,
            path_relevance,
        }
    }

    /// Score a document's content against the keywords.
    ///
    /// Returns `None` when no keyword occurs in any line.
    pub fn score_document(path: String, content: &str, keywords: &[String]) -> Option<Self> {
        let mut score: Option<Self> = None;

        for line in content.lines() {
            let lower_line = line.to_lowercase();
            for keyword in keywords {
                if lower_line.contains(keyword.as_str()) {
                    score
                        .get_or_insert_with(|| Self::new(path.clone(), keywords))
                        .record(keyword, &lower_line);
                }
            }
        }

        score
    }

    /// Record one keyword hit on a lowercased line.
    pub fn record(&mut self, keyword: &str, lower_line: &str) {
        if !self.keyword_matches.contains(keyword) {
            self.keyword_matches.insert(keyword.to_string());
        }
        self.total_matches += 1;
        if is_title_line(lower_line) {
            self.title_matches += 1;
        }
    }

    /// Whether every requested keyword was found.
    pub fn matched_all(&self, total_keywords: usize) -> bool {
        self.keyword_matches.len() == total_keywords
    }

    /// Final ranking score.
    pub fn final_score(&self, total_keywords: usize) -> u32 {
        let distinct = u32::try_from(self.keyword_matches.len()).unwrap_or(u32::MAX);
        let bonus = if self.matched_all(total_keywords) {
            ALL_KEYWORDS_BONUS
        } else {
            0
        };

        self.total_matches
            + self.title_matches * TITLE_WEIGHT
            + self.path_relevance * PATH_WEIGHT
            + distinct * DISTINCT_KEYWORD_WEIGHT
            + bonus
    }
}
