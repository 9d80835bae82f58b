//! Best-effort audit publishing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use super::channel::{AuditConnection, AuditConnector};
use super::error::{AuditError, AuditResult};
use super::event::AuditEvent;

/// Default audit channel endpoint.
pub const DEFAULT_AUDIT_ENDPOINT: &str = "tcp://127.0.0.1:9100";

/// Default topic audit events are published under.
pub const DEFAULT_AUDIT_TOPIC: &str = "catalog/log";

/// Audit publisher configuration, consumed once at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublisherConfig {
    /// Channel endpoint URL.
    pub endpoint: String,
    /// Topic prefix subscribers filter on.
    pub topic: String,
}

impl PublisherConfig {
    /// Create a configuration for the given endpoint and the default topic.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            topic: DEFAULT_AUDIT_TOPIC.to_string(),
        }
    }

    /// Set the topic.
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self::new(DEFAULT_AUDIT_ENDPOINT)
    }
}

/// Publish outcome counters.
#[derive(Debug, Default)]
pub struct AuditMetrics {
    sent: AtomicU64,
    failed: AtomicU64,
}

impl AuditMetrics {
    /// Events handed to the channel successfully.
    pub fn sent(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }

    /// Events dropped because the send failed.
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }
}

/// Reports completed operations to the audit channel.
///
/// Owns the single connection to the channel. [`AuditPublisher::publish`]
/// never fails and never blocks for longer than one send attempt.
pub struct AuditPublisher {
    config: PublisherConfig,
    connection: RwLock<Option<Arc<dyn AuditConnection>>>,
    metrics: AuditMetrics,
}

impl AuditPublisher {
    /// Start-up hook: establish the channel connection.
    ///
    /// A failure here means the deployment is misconfigured. It is logged as
    /// fatal and returned; the runtime must not accept traffic without audit.
    pub fn start(config: PublisherConfig, connector: &dyn AuditConnector) -> AuditResult<Self> {
        let connection = match connector.connect(&config) {
            Ok(connection) => connection,
            Err(e) => {
                tracing::error!(
                    fatal = true,
                    endpoint = %config.endpoint,
                    error = %e,
                    "problem connecting to audit channel"
                );
                return Err(e);
            }
        };

        tracing::info!(
            endpoint = %config.endpoint,
            topic = %config.topic,
            "audit publisher created"
        );

        Ok(Self {
            config,
            connection: RwLock::new(Some(Arc::from(connection))),
            metrics: AuditMetrics::default(),
        })
    }

    /// Shutdown hook: release the connection.
    ///
    /// Safe to call at any time and more than once. Publishes racing with
    /// shutdown either complete or fail and are logged.
    pub fn shutdown(&self) {
        let connection = self.connection.write().take();
        if let Some(connection) = connection {
            connection.close();
            tracing::info!(
                sent = self.metrics.sent(),
                failed = self.metrics.failed(),
                "audit publisher closing down"
            );
        }
    }

    /// Check if the connection is still held.
    pub fn is_running(&self) -> bool {
        self.connection.read().is_some()
    }

    /// Publish the outcome of an operation that started at `start`.
    ///
    /// Failures are logged and counted, never returned.
    pub fn publish(&self, operation: &str, origin: &str, payload: &str, start: DateTime<Utc>) {
        let event = AuditEvent::new(operation, origin, payload, start);
        self.publish_event(&event);
    }

    /// Publish a prepared event. Failures are logged and counted.
    pub fn publish_event(&self, event: &AuditEvent) {
        match self.try_send(event) {
            Ok(()) => {
                self.metrics.sent.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(
                    operation = %event.operation,
                    origin = %event.origin,
                    "sent audit event"
                );
            }
            Err(e) => {
                self.metrics.failed.fetch_add(1, Ordering::Relaxed);
                tracing::error!(
                    operation = %event.operation,
                    origin = %event.origin,
                    error = %e,
                    "failed to send audit event"
                );
            }
        }
    }

    fn try_send(&self, event: &AuditEvent) -> AuditResult<()> {
        // Clone the handle so the lock is not held across the send.
        let connection = self
            .connection
            .read()
            .as_ref()
            .map(Arc::clone)
            .ok_or(AuditError::Closed)?;

        let mut session = connection.open_session()?;
        let sent = session.send(event);
        let closed = session.close();
        sent.and(closed)
    }

    /// The configuration the publisher was started with.
    pub fn config(&self) -> &PublisherConfig {
        &self.config
    }

    /// Publish outcome counters.
    pub fn metrics(&self) -> &AuditMetrics {
        &self.metrics
    }
}

impl Drop for AuditPublisher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for AuditPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditPublisher")
            .field("config", &self.config)
            .field("running", &self.is_running())
            .field("metrics", &self.metrics)
            .finish()
    }
}

/// Captures when and where an operation started so its audit event can be
/// published when it finishes.
#[derive(Debug, Clone)]
pub struct OperationTimer {
    operation: String,
    origin: String,
    started_at: DateTime<Utc>,
}

impl OperationTimer {
    /// Start timing an operation.
    pub fn start(operation: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            origin: origin.into(),
            started_at: Utc::now(),
        }
    }

    /// When the operation started.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Name of the operation being timed.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Publish the operation's audit event, regardless of its outcome.
    pub fn finish(self, publisher: &AuditPublisher, payload: &str) {
        publisher.publish(&self.operation, &self.origin, payload, self.started_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::MemoryChannel;
    use chrono::Duration;

    fn started(channel: &MemoryChannel) -> AuditPublisher {
        AuditPublisher::start(PublisherConfig::default(), channel).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = PublisherConfig::default();
        assert_eq!(config.endpoint, DEFAULT_AUDIT_ENDPOINT);
        assert_eq!(config.topic, DEFAULT_AUDIT_TOPIC);

        let config = PublisherConfig::new("ipc:///tmp/audit.sock").with_topic("icat/log");
        assert_eq!(config.endpoint, "ipc:///tmp/audit.sock");
        assert_eq!(config.topic, "icat/log");
    }

    #[test]
    fn test_publish_delivers_event() {
        let channel = MemoryChannel::new();
        let publisher = started(&channel);

        let start = Utc::now() - Duration::milliseconds(40);
        publisher.publish("create", "10.0.0.5", "Sample:42", start);

        let events = channel.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].operation, "create");
        assert_eq!(events[0].origin, "10.0.0.5");
        assert_eq!(events[0].payload, "Sample:42");
        assert_eq!(events[0].start_timestamp, start.timestamp_millis());
        assert!(events[0].elapsed_millis >= 40);

        assert_eq!(publisher.metrics().sent(), 1);
        assert_eq!(publisher.metrics().failed(), 0);
        assert_eq!(channel.open_sessions(), 0);
    }

    #[test]
    fn test_publish_swallows_send_failure() {
        let channel = MemoryChannel::new();
        let publisher = started(&channel);
        channel.set_available(false);

        publisher.publish("delete", "10.0.0.5", "Dataset:1", Utc::now());

        assert!(channel.is_empty());
        assert_eq!(publisher.metrics().failed(), 1);
        assert_eq!(channel.open_sessions(), 0);

        channel.set_available(true);
        publisher.publish("delete", "10.0.0.5", "Dataset:2", Utc::now());
        assert_eq!(channel.len(), 1);
    }

    #[test]
    fn test_start_failure_is_returned() {
        let channel = MemoryChannel::new();
        channel.refuse_connections();

        let result = AuditPublisher::start(PublisherConfig::default(), &channel);
        assert!(matches!(result, Err(AuditError::Connect { .. })));
    }

    #[test]
    fn test_publish_after_shutdown_is_dropped() {
        let channel = MemoryChannel::new();
        let publisher = started(&channel);

        publisher.shutdown();
        assert!(!publisher.is_running());
        assert!(channel.is_closed());

        publisher.publish("update", "10.0.0.5", "Sample:42", Utc::now());
        assert!(channel.is_empty());
        assert_eq!(publisher.metrics().failed(), 1);

        // Second shutdown is a no-op.
        publisher.shutdown();
    }

    #[test]
    fn test_drop_closes_connection() {
        let channel = MemoryChannel::new();
        drop(started(&channel));
        assert!(channel.is_closed());
    }

    #[test]
    fn test_operation_timer() {
        let channel = MemoryChannel::new();
        let publisher = started(&channel);

        let timer = OperationTimer::start("search", "192.168.0.3");
        assert_eq!(timer.operation(), "search");
        let started_at = timer.started_at();
        timer.finish(&publisher, "Investigation");

        let events = channel.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start_timestamp, started_at.timestamp_millis());
        assert_eq!(events[0].payload, "Investigation");
    }
}
