//! Audit channel over an NNG PUB socket.
//!
//! Each message is the topic bytes followed by the JSON-encoded event, so
//! SUB sockets can filter on the topic prefix.

use nng::{Message, Protocol, Socket};
use parking_lot::RwLock;

use metacat_core::audit::{
    AuditConnection, AuditConnector, AuditError, AuditEvent, AuditResult, AuditSession,
    PublisherConfig,
};

/// Encode an event as a topic-prefixed frame.
pub fn encode_frame(topic: &str, event: &AuditEvent) -> AuditResult<Vec<u8>> {
    let body = event.to_json()?;
    let mut frame = Vec::with_capacity(topic.len() + body.len());
    frame.extend_from_slice(topic.as_bytes());
    frame.extend_from_slice(&body);
    Ok(frame)
}

/// Decode a topic-prefixed frame. Returns `None` if the topic does not match.
pub fn decode_frame(topic: &str, frame: &[u8]) -> Option<AuditResult<AuditEvent>> {
    frame
        .strip_prefix(topic.as_bytes())
        .map(AuditEvent::from_json)
}

/// Connects by listening on the configured endpoint with a PUB socket.
#[derive(Debug, Default, Clone, Copy)]
pub struct NngConnector;

impl AuditConnector for NngConnector {
    fn connect(&self, config: &PublisherConfig) -> AuditResult<Box<dyn AuditConnection>> {
        let connect_error = |e: nng::Error| AuditError::Connect {
            endpoint: config.endpoint.clone(),
            reason: e.to_string(),
        };

        let socket = Socket::new(Protocol::Pub0).map_err(connect_error)?;
        socket.listen(&config.endpoint).map_err(connect_error)?;

        tracing::info!(endpoint = %config.endpoint, topic = %config.topic, "listening for audit subscribers");

        Ok(Box::new(NngConnection {
            socket: RwLock::new(Some(socket)),
            topic: config.topic.clone(),
        }))
    }
}

/// The publisher's shared PUB socket.
pub struct NngConnection {
    socket: RwLock<Option<Socket>>,
    topic: String,
}

impl AuditConnection for NngConnection {
    fn open_session(&self) -> AuditResult<Box<dyn AuditSession + '_>> {
        let socket = self.socket.read().clone().ok_or(AuditError::Closed)?;
        Ok(Box::new(NngSession {
            socket,
            topic: &self.topic,
        }))
    }

    fn close(&self) {
        // Dropping the last handle closes the socket once in-flight sessions finish.
        self.socket.write().take();
    }
}

impl std::fmt::Debug for NngConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NngConnection")
            .field("topic", &self.topic)
            .field("open", &self.socket.read().is_some())
            .finish()
    }
}

struct NngSession<'a> {
    socket: Socket,
    topic: &'a str,
}

impl AuditSession for NngSession<'_> {
    fn send(&mut self, event: &AuditEvent) -> AuditResult<()> {
        let frame = encode_frame(self.topic, event)?;
        self.socket
            .send(Message::from(frame.as_slice()))
            .map_err(|(_, e)| AuditError::Unavailable(e.to_string()))
    }

    fn close(self: Box<Self>) -> AuditResult<()> {
        Ok(())
    }
}
