mod common;

use assert2::check;
use common::{QUICK_START, TempWorkspace, WEB_SEARCH_TOOL, docs_tree};
use kaibanjs_docs_mcp::resolve::{
    available_paths, find_nearest_directory, list_dir_contents, read_doc_content,
};
use kaibanjs_docs_mcp::tracing::error_log_layer;
use kaibanjs_docs_mcp::{DocLookup, DocsState};
use rstest::rstest;
use tracing_subscriber::layer::SubscriberExt;

const LATIN1_PAGE: &[u8] = b"# Caf\xe9 agents memory\n";

/// Test: An existing file comes back verbatim.
#[rstest]
#[tokio::test]
async fn file_returns_raw_content(docs_tree: TempWorkspace) {
    let state = docs_tree.state().await;

    let lookup = read_doc_content(&state, "get-started/01-Quick-Start.md", &[])
        .await
        .unwrap();
    check!(lookup == DocLookup::Found(QUICK_START.to_string()));

    let lookup = read_doc_content(&state, "tools-docs/custom-tools/WebSearchTool.mdx", &[])
        .await
        .unwrap();
    check!(lookup == DocLookup::Found(WEB_SEARCH_TOOL.to_string()));
}

/// Test: A directory renders its listing, file contents and related paths.
#[rstest]
#[tokio::test]
async fn directory_renders_listing_and_contents(docs_tree: TempWorkspace) {
    let state = docs_tree.state().await;

    let DocLookup::Found(document) =
        read_doc_content(&state, "get-started", &["agents".to_string()])
            .await
            .unwrap()
    else {
        panic!("get-started should resolve");
    };

    check!(document.starts_with(
        "Directory contents of get-started:\n\
         \n\
         No subdirectories.\n\
         \n\
         Files in this directory:\n\
         - 01-Quick-Start.md\n\
         - 02-Core-Concepts.md\n\
         \n\
         ---\n\
         \n\
         Contents of all files in this directory:\n"
    ));
    check!(document.contains(&format!("\n\n# 01-Quick-Start.md\n\n{}", QUICK_START)));
    check!(document.contains("\n\n# 02-Core-Concepts.md\n\n# Core Concepts"));
    check!(document.contains("Here are some paths that might be relevant based on your query:"));
    check!(document.contains("- get-started/01-Quick-Start.md"));
}

/// Test: A file that is not valid UTF-8 is returned with replacement characters.
#[tokio::test]
async fn latin1_file_decoded_lossily() {
    let workspace = TempWorkspace::new();
    workspace.create_file("guide/intro.md", "# Intro\n");
    std::fs::write(workspace.path().join("guide/cafe.md"), LATIN1_PAGE).unwrap();
    let state = workspace.state().await;

    let lookup = read_doc_content(&state, "guide/cafe.md", &[]).await.unwrap();
    check!(lookup == DocLookup::Found("# Caf\u{FFFD} agents memory\n".to_string()));
}

/// Test: A directory holding a file that is not valid UTF-8 still renders.
#[tokio::test]
async fn directory_with_latin1_file_renders() {
    let workspace = TempWorkspace::new();
    workspace.create_file("guide/intro.md", "# Intro\n");
    std::fs::write(workspace.path().join("guide/cafe.md"), LATIN1_PAGE).unwrap();
    let state = workspace.state().await;

    let DocLookup::Found(document) = read_doc_content(&state, "guide", &["memory".to_string()])
        .await
        .unwrap()
    else {
        panic!("guide should resolve");
    };

    check!(document.contains("Files in this directory:\n- cafe.md\n- intro.md\n"));
    check!(document.contains("\n\n# cafe.md\n\n# Caf\u{FFFD} agents memory\n"));
    check!(document.contains("\n\n# intro.md\n\n# Intro\n"));
    check!(document.contains("- guide/cafe.md"));
}

/// Test: A directory that fails to render is written to the error log.
#[tokio::test]
async fn directory_failure_reaches_error_log() {
    let docs = TempWorkspace::new();
    docs.create_file("guides/intro.md", "# Intro\n");
    let logs = TempWorkspace::new();

    // The directory is addressed absolutely while the docs root is gone, so
    // the listing succeeds and the suggestion walk fails.
    let state = DocsState::new(docs.path().join("removed"), String::new());
    let guides = docs.path().join("guides");

    let subscriber =
        tracing_subscriber::registry().with(error_log_layer(logs.path().to_path_buf()));
    let guard = tracing::subscriber::set_default(subscriber);
    let result = read_doc_content(&state, guides.to_str().unwrap(), &["intro".to_string()]).await;
    drop(guard);

    check!(result.is_err());

    let entries: Vec<serde_json::Value> = std::fs::read_dir(logs.path())
        .unwrap()
        .flat_map(|e| {
            let content = std::fs::read_to_string(e.unwrap().path()).unwrap();
            content
                .lines()
                .map(|line| serde_json::from_str(line).unwrap())
                .collect::<Vec<_>>()
        })
        .collect();

    check!(entries.iter().any(|entry| {
        entry["message"] == "Failed to read documentation directory"
            && entry["level"] == "ERROR"
            && entry["path"] == guides.display().to_string()
    }));
}

/// Test: A directory with only subdirectories says so.
#[rstest]
#[tokio::test]
async fn directory_without_files(docs_tree: TempWorkspace) {
    let state = docs_tree.state().await;

    let DocLookup::Found(document) = read_doc_content(&state, "reference", &[]).await.unwrap()
    else {
        panic!("reference should resolve");
    };

    check!(document.contains("Subdirectories:\n- agents/\n- tasks/\n"));
    check!(document.contains("No files in this directory."));
}

/// Test: Missing paths, including paths through a file, are not found.
#[rstest]
#[tokio::test]
async fn missing_paths_not_found(docs_tree: TempWorkspace) {
    let state = docs_tree.state().await;

    for path in ["nothing/here", "get-started/99-Missing.md", "index.md/extra"] {
        let lookup = read_doc_content(&state, path, &[]).await.unwrap();
        check!(lookup == DocLookup::NotFound, "{} should be missing", path);
    }
}

/// Test: A missing path lists the closest existing ancestor.
#[tokio::test]
async fn nearest_directory_lists_parent() {
    let workspace = TempWorkspace::new();
    workspace.create_file("a/b/x.md", "x");
    workspace.create_file("a/b/sub/y.md", "y");
    workspace.create_file("a/b/skip.json", "{}");
    let state = workspace.state().await;

    let message = find_nearest_directory(&state, "a/b/c").await;

    check!(
        message
            == "Path \"a/b/c\" not found.\n\
                Here are the available paths in \"a/b\":\n\
                \n\
                Directories:\n\
                - a/b/sub/\n\
                \n\
                Files:\n\
                - a/b/x.md"
    );
}

/// Test: Deeper misses walk up more than one level.
#[rstest]
#[tokio::test]
async fn nearest_directory_walks_up(docs_tree: TempWorkspace) {
    let state = docs_tree.state().await;

    let message = find_nearest_directory(&state, "tools-docs/custom-tools/Missing/Deep").await;

    check!(message.contains("Here are the available paths in \"tools-docs/custom-tools\":"));
    check!(message.contains("No subdirectories."));
    check!(message.contains("- tools-docs/custom-tools/Create-a-Custom-Tool.md\n"));
    check!(message.ends_with("- tools-docs/custom-tools/WebSearchTool.mdx"));
}

/// Test: With no existing ancestor, the full top-level listing is shown.
#[rstest]
#[tokio::test]
async fn nearest_directory_falls_back_to_top_level(docs_tree: TempWorkspace) {
    let state = docs_tree.state().await;

    let message = find_nearest_directory(&state, "nothing/here").await;

    check!(message.starts_with("Path \"nothing/here\" not found.\nHere are all available paths:\n\n"));
    check!(message.ends_with(state.available_paths()));
}

/// Test: The top-level listing includes reference subdirectories.
#[rstest]
#[tokio::test]
async fn available_paths_listing(docs_tree: TempWorkspace) {
    let listing = available_paths(docs_tree.path()).await.unwrap();

    check!(
        listing
            == "Available top-level paths:\n\
                Directories:\n\
                - get-started/\n\
                - reference/\n\
                - tools-docs/\n\
                Reference subdirectories:\n\
                - reference/agents/\n\
                - reference/tasks/\n\
                Files:\n\
                - index.md"
    );
}

/// Test: Without a reference section the header is omitted.
#[tokio::test]
async fn available_paths_without_reference() {
    let workspace = TempWorkspace::new();
    workspace.create_file("guides/intro.md", "intro");

    let listing = available_paths(workspace.path()).await.unwrap();
    check!(listing == "Available top-level paths:\nDirectories:\n- guides/\nFiles:");
}

/// Test: Directory listings are sorted and skip non-doc files.
#[rstest]
#[tokio::test]
async fn list_dir_contents_sorted(docs_tree: TempWorkspace) {
    let listing = list_dir_contents(docs_tree.path()).await.unwrap();

    check!(listing.dirs == vec!["get-started/", "reference/", "tools-docs/"]);
    check!(listing.files == vec!["index.md"]);
}
