//! Documentation search: file discovery, keyword extraction and ranking.
//!
//! The entry points are [`search_document_content`], which ranks files under
//! a docs root for a keyword set, and [`matching_paths_suggestion`], which
//! renders the ranked paths for a requested documentation path.

pub mod cache;
pub mod keywords;
pub mod rank;
pub mod scoring;
pub mod walk;

pub use cache::{FileCache, FileListing};
pub use keywords::{combined_keywords, keywords_from_path, normalize_keywords};
pub use rank::{MAX_RESULTS, matching_paths_suggestion, relative_doc_path, search_document_content};
pub use scoring::{MatchScore, is_title_line, path_relevance};
pub use walk::{DOC_EXTENSIONS, is_doc_file, read_doc_text, walk_doc_files};
