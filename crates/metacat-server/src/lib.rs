//! metacat server library.
//!
//! Wires the core validation engine and audit publisher into a running
//! service, with audit events published over an NNG PUB socket.

pub mod channel;
pub mod config;
pub mod error;
pub mod runtime;

pub use channel::{NngConnection, NngConnector};
pub use config::{Args, ServerConfig};
pub use error::{Error, Result};
pub use runtime::Runtime;
