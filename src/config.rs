//! Process-wide configuration from environment variables.

use std::path::PathBuf;

/// Default location of the served documentation snapshot.
pub const DEFAULT_DOCS_DIR: &str = ".docs/raw";

/// Default location of the documentation sources the snapshot is built from.
pub const DEFAULT_SOURCE_DIR: &str = "docs";

/// Error log directory, relative to the home directory.
const LOG_SUBDIR: &str = ".cache/kaibanjs/mcp-docs-server-logs";

/// Runtime configuration for the documentation server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Snapshot directory served to the client (`KAIBANJS_DOCS_DIR`)
    pub docs_dir: PathBuf,
    /// Source tree copied into the snapshot (`KAIBANJS_DOCS_SOURCE`)
    pub source_dir: PathBuf,
    /// Rebuild the snapshot before serving (`REBUILD_DOCS_ON_START=true`)
    pub rebuild_on_start: bool,
    /// Verbose diagnostic logging (`DEBUG`)
    pub debug: bool,
    /// Hourly error log directory (`KAIBANJS_DOCS_LOG_DIR`); `None` disables it
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from(DEFAULT_DOCS_DIR),
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            rebuild_on_start: false,
            debug: false,
            log_dir: default_log_dir(),
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

        Self {
            docs_dir: non_empty("KAIBANJS_DOCS_DIR").map_or(defaults.docs_dir, PathBuf::from),
            source_dir: non_empty("KAIBANJS_DOCS_SOURCE")
                .map_or(defaults.source_dir, PathBuf::from),
            rebuild_on_start: lookup("REBUILD_DOCS_ON_START").as_deref() == Some("true"),
            debug: non_empty("DEBUG").is_some(),
            log_dir: non_empty("KAIBANJS_DOCS_LOG_DIR")
                .map(PathBuf::from)
                .or(defaults.log_dir),
        }
    }
}

fn default_log_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(LOG_SUBDIR))
}
