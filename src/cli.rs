use crate::config::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "kaibanjs-docs-mcp")]
#[command(about = "Serve KaibanJS documentation to AI assistants over MCP", long_about = None)]
pub struct Cli {
    /// Documentation snapshot to serve
    #[arg(long, global = true)]
    pub docs_dir: Option<PathBuf>,
    /// Documentation sources used to rebuild the snapshot
    #[arg(long, global = true)]
    pub source_dir: Option<PathBuf>,
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Serve documentation over stdio (default)
    Serve {
        /// Rebuild the snapshot from sources before serving
        #[arg(long)]
        rebuild: bool,
    },
    /// Rebuild the documentation snapshot and exit
    Prepare,
}

impl Cli {
    /// The subcommand to run, `serve` when none was given.
    pub fn command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Serve { rebuild: false })
    }

    /// Override environment configuration with command-line flags.
    pub fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.docs_dir {
            config.docs_dir.clone_from(dir);
        }
        if let Some(dir) = &self.source_dir {
            config.source_dir.clone_from(dir);
        }
        if self.debug {
            config.debug = true;
        }
        if let Some(Commands::Serve { rebuild: true }) = self.command {
            config.rebuild_on_start = true;
        }
    }
}
