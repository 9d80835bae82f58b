//! metacat core - entity validation, cascade quotas and audit publishing.
//!
//! Every catalog record declares its constraints once; the
//! [`ValidationEngine`] enforces them before commit. Cascading operations are
//! bounded by a [`QuotaGuard`], and completed operations are reported through
//! the [`AuditPublisher`].

pub mod audit;
pub mod catalog;
pub mod constraint;
pub mod entity;
pub mod error;
pub mod model;
pub mod quota;

pub use catalog::{EntitySchema, FieldConstraintSet, FieldDef, FieldValue, MetadataRegistry};
pub use constraint::ValidationEngine;
pub use entity::{Entity, EntityBase, EntityId};
pub use error::{Error, ErrorKind, Result, ValidationError};
pub use quota::{check_descendant_count, QuotaGuard, DEFAULT_MAX_ENTITIES};

// Audit exports
pub use audit::{
    AuditConnection, AuditConnector, AuditError, AuditEvent, AuditPublisher, AuditSession,
    MemoryChannel, OperationTimer, PublisherConfig,
};
