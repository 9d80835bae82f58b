//! Server configuration.

use clap::Parser;
use metacat_core::audit::{DEFAULT_AUDIT_ENDPOINT, DEFAULT_AUDIT_TOPIC};
use metacat_core::{PublisherConfig, DEFAULT_MAX_ENTITIES};

use crate::error::{Error, Result};

/// metacat server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Audit channel endpoint (e.g., "tcp://127.0.0.1:9100").
    pub audit_endpoint: String,

    /// Topic audit events are published under.
    pub audit_topic: String,

    /// Default ceiling on entities touched by one cascading operation.
    pub max_entities: u64,
}

impl ServerConfig {
    /// Create a configuration with the given audit endpoint.
    pub fn new(audit_endpoint: impl Into<String>) -> Self {
        Self {
            audit_endpoint: audit_endpoint.into(),
            audit_topic: DEFAULT_AUDIT_TOPIC.to_string(),
            max_entities: DEFAULT_MAX_ENTITIES,
        }
    }

    /// Set the audit endpoint.
    pub fn with_audit_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.audit_endpoint = endpoint.into();
        self
    }

    /// Set the audit topic.
    pub fn with_audit_topic(mut self, topic: impl Into<String>) -> Self {
        self.audit_topic = topic.into();
        self
    }

    /// Set the default cascade ceiling.
    pub fn with_max_entities(mut self, max_entities: u64) -> Self {
        self.max_entities = max_entities;
        self
    }

    /// Check the configuration before start-up.
    pub fn validate(&self) -> Result<()> {
        if self.audit_endpoint.trim().is_empty() {
            return Err(Error::Config("audit endpoint must not be empty".into()));
        }
        if self.audit_topic.is_empty() {
            return Err(Error::Config("audit topic must not be empty".into()));
        }
        if self.max_entities == 0 {
            return Err(Error::Config("max entities must be at least 1".into()));
        }
        Ok(())
    }

    /// The part of the configuration the audit publisher consumes.
    pub fn publisher_config(&self) -> PublisherConfig {
        PublisherConfig::new(self.audit_endpoint.clone()).with_topic(self.audit_topic.clone())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_AUDIT_ENDPOINT)
    }
}

/// Command-line arguments for the server.
#[derive(Parser, Debug)]
#[command(name = "metacat-server")]
#[command(version, about = "metacat catalog service", long_about = None)]
pub struct Args {
    /// Audit channel endpoint to publish on.
    #[arg(long, default_value = DEFAULT_AUDIT_ENDPOINT)]
    pub audit_endpoint: String,

    /// Topic audit events are published under.
    #[arg(long, default_value = DEFAULT_AUDIT_TOPIC)]
    pub audit_topic: String,

    /// Maximum entities a cascading operation may touch.
    #[arg(long, default_value_t = DEFAULT_MAX_ENTITIES)]
    pub max_entities: u64,
}

impl Args {
    /// Convert command-line arguments to server configuration.
    pub fn into_config(self) -> ServerConfig {
        ServerConfig::new(self.audit_endpoint)
            .with_audit_topic(self.audit_topic)
            .with_max_entities(self.max_entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.audit_endpoint, DEFAULT_AUDIT_ENDPOINT);
        assert_eq!(config.audit_topic, "catalog/log");
        assert_eq!(config.max_entities, 10_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ServerConfig::new("tcp://0.0.0.0:7100")
            .with_audit_topic("facility/audit")
            .with_max_entities(500);

        assert_eq!(config.audit_endpoint, "tcp://0.0.0.0:7100");
        assert_eq!(config.audit_topic, "facility/audit");
        assert_eq!(config.max_entities, 500);

        let publisher = config.publisher_config();
        assert_eq!(publisher.endpoint, "tcp://0.0.0.0:7100");
        assert_eq!(publisher.topic, "facility/audit");
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            ServerConfig::new("  ").validate(),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ServerConfig::default().with_max_entities(0).validate(),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ServerConfig::default().with_audit_topic("").validate(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_args_into_config() {
        let args = Args::parse_from([
            "metacat-server",
            "--audit-endpoint",
            "ipc:///tmp/metacat-audit.sock",
            "--max-entities",
            "250",
        ]);
        let config = args.into_config();

        assert_eq!(config.audit_endpoint, "ipc:///tmp/metacat-audit.sock");
        assert_eq!(config.audit_topic, DEFAULT_AUDIT_TOPIC);
        assert_eq!(config.max_entities, 250);
    }

    #[test]
    fn test_args_defaults() {
        let config = Args::parse_from(["metacat-server"]).into_config();
        assert_eq!(config, ServerConfig::default());
    }
}
