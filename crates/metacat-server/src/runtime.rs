//! Service runtime: start-up and shutdown hooks.

use std::sync::Arc;

use metacat_core::audit::AuditConnector;
use metacat_core::{model, AuditPublisher, MetadataRegistry, QuotaGuard, ValidationEngine};

use crate::channel::NngConnector;
use crate::config::ServerConfig;
use crate::error::Result;

/// Everything a running catalog service shares across requests.
#[derive(Debug)]
pub struct Runtime {
    config: ServerConfig,
    engine: ValidationEngine,
    publisher: AuditPublisher,
}

impl Runtime {
    /// Start the runtime, publishing audit events over NNG.
    pub fn start(config: ServerConfig) -> Result<Self> {
        Self::start_with(config, &NngConnector)
    }

    /// Start the runtime with the given audit channel.
    ///
    /// Constraint sets for every catalog record type are built up front so a
    /// broken declaration stops start-up instead of the first request. Failing
    /// to reach the audit channel is also fatal.
    pub fn start_with(config: ServerConfig, connector: &dyn AuditConnector) -> Result<Self> {
        config.validate()?;

        let registry = Arc::new(MetadataRegistry::new());
        model::register_all(&registry)?;
        tracing::info!(entity_types = registry.len(), "constraint sets built");

        let publisher = AuditPublisher::start(config.publisher_config(), connector)?;

        tracing::info!(
            audit_endpoint = %config.audit_endpoint,
            max_entities = config.max_entities,
            "runtime started"
        );

        Ok(Self {
            engine: ValidationEngine::new(registry),
            publisher,
            config,
        })
    }

    /// The shared validation engine.
    pub fn engine(&self) -> &ValidationEngine {
        &self.engine
    }

    /// The shared audit publisher.
    pub fn publisher(&self) -> &AuditPublisher {
        &self.publisher
    }

    /// Default cascade ceiling.
    pub fn max_entities(&self) -> u64 {
        self.config.max_entities
    }

    /// A fresh guard for one cascading operation.
    pub fn quota_guard(&self) -> QuotaGuard {
        QuotaGuard::new(self.config.max_entities)
    }

    /// The configuration the runtime was started with.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Release the audit connection.
    pub fn shutdown(&self) {
        self.publisher.shutdown();
        tracing::info!("runtime shutdown complete");
    }

    /// Wait for ctrl+c, then shut down.
    pub async fn run_until_shutdown(self) -> Result<()> {
        tracing::info!("catalog service ready");
        tokio::signal::ctrl_c().await?;
        tracing::info!("received shutdown signal");
        self.shutdown();
        Ok(())
    }
}
