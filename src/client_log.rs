//! Log forwarding to the connected MCP client.
//!
//! [`ClientLogLayer`] turns this crate's tracing events into
//! `notifications/message` payloads and queues them. Once the client is
//! connected, [`ClientLogReceiver::forward`] drains the queue through the
//! session's [`Peer`]. Debug events are only forwarded in debug mode.

use rmcp::model::{LoggingLevel, LoggingMessageNotificationParam};
use rmcp::{Peer, RoleServer, ServiceError};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use tokio::sync::mpsc;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Filter, Layer};

/// Logger name attached to every forwarded message.
const LOGGER_NAME: &str = "kaibanjs-docs";

/// Only events from this crate reach the client.
const CRATE_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Create a layer and the receiver that drains it.
pub fn channel(debug: bool) -> (ClientLogLayer, ClientLogReceiver) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (
        ClientLogLayer { sender, debug },
        ClientLogReceiver {
            receiver,
            level: ClientLogLevel::default(),
        },
    )
}

/// Map a tracing level to the MCP level it is forwarded at.
fn logging_level(level: &Level, debug: bool) -> Option<LoggingLevel> {
    match *level {
        Level::ERROR => Some(LoggingLevel::Error),
        Level::WARN => Some(LoggingLevel::Warning),
        Level::INFO => Some(LoggingLevel::Info),
        Level::DEBUG if debug => Some(LoggingLevel::Debug),
        _ => None,
    }
}

/// Severity rank, lowest first.
const fn severity(level: LoggingLevel) -> u8 {
    match level {
        LoggingLevel::Debug => 0,
        LoggingLevel::Info => 1,
        LoggingLevel::Notice => 2,
        LoggingLevel::Warning => 3,
        LoggingLevel::Error => 4,
        LoggingLevel::Critical => 5,
        LoggingLevel::Alert => 6,
        LoggingLevel::Emergency => 7,
    }
}

/// Minimum level requested by the client through `logging/setLevel`.
#[derive(Debug, Clone, Default)]
pub struct ClientLogLevel(Arc<AtomicU8>);

impl ClientLogLevel {
    pub fn set(&self, level: LoggingLevel) {
        self.0.store(severity(level), Ordering::Relaxed);
    }

    pub fn allows(&self, level: LoggingLevel) -> bool {
        severity(level) >= self.0.load(Ordering::Relaxed)
    }
}

/// Tracing layer queueing events for the client.
#[derive(Debug)]
pub struct ClientLogLayer {
    sender: mpsc::UnboundedSender<LoggingMessageNotificationParam>,
    debug: bool,
}

impl ClientLogLayer {
    /// Per-layer filter selecting the events this layer forwards.
    pub fn filter(&self) -> ClientLogFilter {
        ClientLogFilter { debug: self.debug }
    }
}

impl<S: Subscriber> Layer<S> for ClientLogLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let Some(level) = logging_level(event.metadata().level(), self.debug) else {
            return;
        };

        let mut fields = JsonFields::default();
        event.record(&mut fields);

        let param = LoggingMessageNotificationParam::new(level, Value::Object(fields.0))
            .with_logger(LOGGER_NAME);
        // The receiver is gone once the server has shut down.
        let _ = self.sender.send(param);
    }
}

/// Accepts this crate's events at forwarded levels, except the forwarder's own.
#[derive(Debug, Clone, Copy)]
pub struct ClientLogFilter {
    debug: bool,
}

impl ClientLogFilter {
    fn accepts(self, meta: &Metadata<'_>) -> bool {
        let target = meta.target();
        let ours = target == CRATE_TARGET || target.starts_with(&format!("{CRATE_TARGET}::"));
        ours && target != module_path!() && logging_level(meta.level(), self.debug).is_some()
    }
}

impl<S> Filter<S> for ClientLogFilter {
    fn enabled(&self, meta: &Metadata<'_>, _cx: &Context<'_, S>) -> bool {
        self.accepts(meta)
    }
}

/// Queued messages waiting for a connected client.
#[derive(Debug)]
pub struct ClientLogReceiver {
    receiver: mpsc::UnboundedReceiver<LoggingMessageNotificationParam>,
    level: ClientLogLevel,
}

impl ClientLogReceiver {
    /// Handle for the level the client asks for.
    pub fn level(&self) -> ClientLogLevel {
        self.level.clone()
    }

    /// Send queued messages to the client until the connection closes.
    pub async fn forward(mut self, peer: Peer<RoleServer>) {
        while let Some(param) = self.receiver.recv().await {
            if !self.level.allows(param.level) {
                continue;
            }
            match peer.notify_logging_message(param).await {
                Ok(()) => {}
                Err(ServiceError::TransportClosed) => break,
                Err(e) => tracing::debug!(error = %e, "Failed to send log message to client"),
            }
        }
    }
}

/// Collects event fields into a JSON object, `message` included.
#[derive(Default)]
struct JsonFields(Map<String, Value>);

impl Visit for JsonFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.0.insert(field.name().to_string(), Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.insert(field.name().to_string(), Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.0.insert(field.name().to_string(), Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0
            .insert(field.name().to_string(), Value::from(format!("{:?}", value)));
    }
}
