//! Shared test fixtures and utilities for integration tests.
//!
//! # Test Isolation Strategy
//!
//! Every test builds its own documentation tree in a temporary directory and
//! its own `DocsState`, so listing caches never leak between tests.
//!
//! # Available Fixtures
//!
//! - `docs_tree`: a small KaibanJS-style docs tree (recommended)
//! - [`TempWorkspace`]: an empty temp directory for custom layouts

use kaibanjs_docs_mcp::DocsState;
use rstest::fixture;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary workspace directory for test isolation.
///
/// Provides basic filesystem operations within a temp directory that is
/// automatically cleaned up when dropped.
///
/// # Example
///
/// ```ignore
/// let workspace = TempWorkspace::new();
/// workspace.create_file("guides/intro.md", "# Intro");
/// assert!(workspace.path().join("guides/intro.md").exists());
/// ```
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempWorkspace {
    /// Creates a new empty temporary workspace.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    /// Returns the root path of this workspace.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Creates a file with the given content within this workspace.
    ///
    /// Parent directories are created automatically if they don't exist.
    ///
    /// # Panics
    /// Panics if file creation fails.
    pub fn create_file(&self, path: &str, content: &str) {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path, e)
            });
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
    }

    /// Loads a fresh `DocsState` rooted at this workspace.
    pub async fn state(&self) -> DocsState {
        DocsState::load(self.path())
            .await
            .expect("Failed to load docs state")
    }
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Quick-start guide content.
#[allow(dead_code)]
pub const QUICK_START: &str = "# Quick Start\n\n\
Install KaibanJS with npm and create your first team.\n\
Agents collaborate on tasks.\n";

/// Web search tool page content.
#[allow(dead_code)]
pub const WEB_SEARCH_TOOL: &str = "---\ntitle: Web Search Tool\n---\n\n\
# Web Search Tool\n\n\
The web search tool lets an agent search the web.\n\
Configure the search provider with an API key.\n";

/// A small documentation tree shaped like the KaibanJS docs.
///
/// ```text
/// index.md
/// notes.txt                       (ignored: not documentation)
/// get-started/01-Quick-Start.md
/// get-started/02-Core-Concepts.md
/// tools-docs/custom-tools/WebSearchTool.mdx
/// tools-docs/custom-tools/Create-a-Custom-Tool.md
/// tools-docs/langchain-tools/TavilySearchResults.md
/// reference/agents/Agent.md
/// reference/tasks/Task.md
/// ```
#[fixture]
pub fn docs_tree() -> TempWorkspace {
    let workspace = TempWorkspace::new();
    workspace.create_file(
        "index.md",
        "# KaibanJS\n\nKaibanJS is a framework for multi-agent systems.\n",
    );
    workspace.create_file("notes.txt", "search search search");
    workspace.create_file("get-started/01-Quick-Start.md", QUICK_START);
    workspace.create_file(
        "get-started/02-Core-Concepts.md",
        "# Core Concepts\n\nAgents, tasks and teams are the core concepts.\n",
    );
    workspace.create_file("tools-docs/custom-tools/WebSearchTool.mdx", WEB_SEARCH_TOOL);
    workspace.create_file(
        "tools-docs/custom-tools/Create-a-Custom-Tool.md",
        "# Create a Custom Tool\n\nExtend the Tool class to build your own tool.\n",
    );
    workspace.create_file(
        "tools-docs/langchain-tools/TavilySearchResults.md",
        "# Tavily Search Results\n\nA search engine optimized for LLMs.\n",
    );
    workspace.create_file(
        "reference/agents/Agent.md",
        "title: Agent\n\nAn agent has a role, a goal and memory.\n",
    );
    workspace.create_file(
        "reference/tasks/Task.md",
        "# Task\n\nA task is assigned to an agent.\n",
    );
    workspace
}
