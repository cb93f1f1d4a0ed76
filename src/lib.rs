pub mod cli;
pub mod client_log;
pub mod config;
pub mod error;
pub mod logfile;
pub mod prepare;
pub mod resolve;
pub mod search;
pub mod server;
pub mod state;
pub mod tools;
pub mod tracing;

pub use config::Config;
pub use error::DocsError;
pub use resolve::{DirListing, DocLookup};
pub use search::FileCache;
pub use server::DocsServer;
pub use state::DocsState;
