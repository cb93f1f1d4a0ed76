//! Tracing initialization.
//!
//! Human-readable logs go to stderr (stdout carries the MCP protocol). Errors
//! are also appended as JSON lines to hourly files when a log directory is
//! configured, and events can be forwarded to the MCP client.

use crate::client_log::ClientLogLayer;
use crate::config::Config;
use crate::logfile::HourlyLogWriter;
use std::path::PathBuf;
use std::sync::Once;
use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, fmt, fmt::format::FmtSpan, layer::SubscriberExt,
    registry::LookupSpan, util::SubscriberInitExt,
};

static INIT: Once = Once::new();

/// Layer appending ERROR events as flattened JSON lines to hourly files in `dir`.
pub fn error_log_layer<S>(dir: PathBuf) -> impl Layer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fmt::layer()
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_span_list(false)
        .with_writer(HourlyLogWriter::new(dir))
        .with_filter(LevelFilter::ERROR)
}

/// Initialize tracing. Safe to call multiple times; only the first call
/// installs a subscriber.
pub fn init(config: &Config, client_log: Option<ClientLogLayer>) {
    INIT.call_once(|| {
        let level = if config.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };
        let filter = EnvFilter::from_default_env().add_directive(level.into());

        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_target(true)
            .with_span_events(FmtSpan::NONE)
            .compact()
            .with_filter(filter);

        let error_log_layer = config.log_dir.clone().map(error_log_layer);

        let client_log_layer = client_log.map(|layer| {
            let filter = layer.filter();
            layer.with_filter(filter)
        });

        if let Err(e) = tracing_subscriber::registry()
            .with(stderr_layer)
            .with(error_log_layer)
            .with(client_log_layer)
            .try_init()
        {
            eprintln!("Failed to initialize tracing: {}", e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_error_log_writes_json_line() {
        let temp = TempDir::new().unwrap();
        let subscriber = tracing_subscriber::registry().with(error_log_layer(temp.path().to_path_buf()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Started server");
            tracing::warn!("Rejected documentation path");
            tracing::error!(path = "reference/agents", "Failed to read documentation");
        });

        let files: Vec<PathBuf> = std::fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(files.len(), 1);

        let name = files[0].file_name().unwrap().to_string_lossy().into_owned();
        let stem = name.strip_suffix(".log").unwrap();
        assert!(chrono::NaiveDateTime::parse_from_str(&format!("{stem}:00"), "%Y-%m-%dT%H:%M").is_ok());

        let content = std::fs::read_to_string(&files[0]).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 1);

        let entry: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(entry["message"], "Failed to read documentation");
        assert_eq!(entry["path"], "reference/agents");
        assert_eq!(entry["level"], "ERROR");
        assert!(entry["timestamp"].is_string());
    }
}
