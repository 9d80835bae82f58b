//! Audit publishing for completed operations.
//!
//! Every mutating operation reports what happened, from where and how long it
//! took. Publishing is best effort: a failed send is logged and never changes
//! the outcome of the operation that triggered it.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use metacat_core::audit::{AuditPublisher, MemoryChannel, PublisherConfig};
//!
//! let channel = MemoryChannel::new();
//! let publisher = AuditPublisher::start(PublisherConfig::default(), &channel).unwrap();
//!
//! publisher.publish("create", "10.0.0.5", "Sample:42", Utc::now());
//! assert_eq!(channel.len(), 1);
//!
//! publisher.shutdown();
//! ```

mod channel;
mod error;
mod event;
mod memory;
mod publisher;

pub use channel::{AuditConnection, AuditConnector, AuditSession};
pub use error::{AuditError, AuditResult};
pub use event::AuditEvent;
pub use memory::MemoryChannel;
pub use publisher::{
    AuditMetrics, AuditPublisher, OperationTimer, PublisherConfig, DEFAULT_AUDIT_ENDPOINT,
    DEFAULT_AUDIT_TOPIC,
};
