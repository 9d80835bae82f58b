//! Audit channel abstraction.
//!
//! A channel hands out one long-lived [`AuditConnection`]. Each publish opens
//! its own short-lived [`AuditSession`] on that connection so concurrent
//! publishers never share send state.

use super::error::AuditResult;
use super::event::AuditEvent;
use super::publisher::PublisherConfig;

/// Establishes the publisher's connection at start-up.
pub trait AuditConnector {
    /// Open a connection to the configured endpoint.
    fn connect(&self, config: &PublisherConfig) -> AuditResult<Box<dyn AuditConnection>>;
}

/// The single shared connection to the audit channel.
pub trait AuditConnection: Send + Sync {
    /// Open an independent send context.
    fn open_session(&self) -> AuditResult<Box<dyn AuditSession + '_>>;

    /// Release the connection. Later sessions fail with `Closed`.
    fn close(&self);
}

/// A short-lived send context used by one publish call.
pub trait AuditSession {
    /// Send one event.
    fn send(&mut self, event: &AuditEvent) -> AuditResult<()>;

    /// Close the session.
    fn close(self: Box<Self>) -> AuditResult<()>;
}
