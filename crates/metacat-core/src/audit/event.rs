//! Audit event records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::AuditResult;

/// Description of one completed operation.
///
/// Built after the operation finishes and discarded once the send attempt is
/// over, whether or not it succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEvent {
    /// Name of the action performed.
    pub operation: String,
    /// Caller address.
    pub origin: String,
    /// Time from start to event construction, in milliseconds.
    pub elapsed_millis: i64,
    /// Operation start, in milliseconds since the Unix epoch.
    pub start_timestamp: i64,
    /// What was affected.
    pub payload: String,
}

impl AuditEvent {
    /// Create an event for an operation that started at `start`, measuring
    /// elapsed time up to now.
    pub fn new(
        operation: impl Into<String>,
        origin: impl Into<String>,
        payload: impl Into<String>,
        start: DateTime<Utc>,
    ) -> Self {
        Self::at(operation, origin, payload, start, Utc::now())
    }

    /// Create an event whose elapsed time is measured up to `now`.
    ///
    /// A start later than `now` gives zero elapsed time.
    pub fn at(
        operation: impl Into<String>,
        origin: impl Into<String>,
        payload: impl Into<String>,
        start: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            operation: operation.into(),
            origin: origin.into(),
            elapsed_millis: (now - start).num_milliseconds().max(0),
            start_timestamp: start.timestamp_millis(),
            payload: payload.into(),
        }
    }

    /// Encode the event for the wire.
    pub fn to_json(&self) -> AuditResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode an event from the wire.
    pub fn from_json(bytes: &[u8]) -> AuditResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

}
