//! In-memory audit channel for testing.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use super::channel::{AuditConnection, AuditConnector, AuditSession};
use super::error::{AuditError, AuditResult};
use super::event::AuditEvent;
use super::publisher::PublisherConfig;

#[derive(Debug)]
struct Shared {
    events: Mutex<Vec<AuditEvent>>,
    available: AtomicBool,
    refuse_connect: AtomicBool,
    closed: AtomicBool,
    open_sessions: AtomicUsize,
}

/// In-memory channel that records every delivered event.
///
/// Clones share the same state, so a test can keep one handle while the
/// publisher owns the connection.
#[derive(Debug, Clone)]
pub struct MemoryChannel {
    shared: Arc<Shared>,
}

impl Default for MemoryChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryChannel {
    /// Create a new memory channel that accepts connections and messages.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                events: Mutex::new(Vec::new()),
                available: AtomicBool::new(true),
                refuse_connect: AtomicBool::new(false),
                closed: AtomicBool::new(false),
                open_sessions: AtomicUsize::new(0),
            }),
        }
    }

    /// Make sends fail (`false`) or succeed (`true`).
    pub fn set_available(&self, available: bool) {
        self.shared.available.store(available, Ordering::SeqCst);
    }

    /// Make the next connection attempt fail.
    pub fn refuse_connections(&self) {
        self.shared.refuse_connect.store(true, Ordering::SeqCst);
    }

    /// Get all delivered events.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.shared.events.lock().clone()
    }

    /// Get delivered event count.
    pub fn len(&self) -> usize {
        self.shared.events.lock().len()
    }

    /// Check if nothing was delivered.
    pub fn is_empty(&self) -> bool {
        self.shared.events.lock().is_empty()
    }

    /// Check if the connection was closed.
    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::SeqCst)
    }

    /// Sessions opened and not yet closed.
    pub fn open_sessions(&self) -> usize {
        self.shared.open_sessions.load(Ordering::SeqCst)
    }
}

impl AuditConnector for MemoryChannel {
    fn connect(&self, config: &PublisherConfig) -> AuditResult<Box<dyn AuditConnection>> {
        if self.shared.refuse_connect.load(Ordering::SeqCst) {
            return Err(AuditError::Connect {
                endpoint: config.endpoint.clone(),
                reason: "connection refused".into(),
            });
        }
        self.shared.closed.store(false, Ordering::SeqCst);
        Ok(Box::new(self.clone()))
    }
}

impl AuditConnection for MemoryChannel {
    fn open_session(&self) -> AuditResult<Box<dyn AuditSession + '_>> {
        if self.is_closed() {
            return Err(AuditError::Closed);
        }
        self.shared.open_sessions.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemorySession {
            shared: &self.shared,
        }))
    }

    fn close(&self) {
        self.shared.closed.store(true, Ordering::SeqCst);
    }
}

struct MemorySession<'a> {
    shared: &'a Shared,
}

impl AuditSession for MemorySession<'_> {
    fn send(&mut self, event: &AuditEvent) -> AuditResult<()> {
        if !self.shared.available.load(Ordering::SeqCst) {
            return Err(AuditError::Unavailable("memory channel is down".into()));
        }
        // Round-trip through the wire encoding so serialization failures surface here too.
        let decoded = AuditEvent::from_json(&event.to_json()?)?;
        self.shared.events.lock().push(decoded);
        Ok(())
    }

    fn close(self: Box<Self>) -> AuditResult<()> {
        self.shared.open_sessions.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}
