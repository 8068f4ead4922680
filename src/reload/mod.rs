//! Live reload for watch mode.
//!
//! ```text
//! BuildActor --broadcast--> Hub --"reload"--> browser (GET /ws)
//! ```
//!
//! # Modules
//!
//! - `hub` - client set with register/deregister/broadcast
//! - `server` - axum router: static output plus the upgrade endpoint

pub mod hub;
pub mod server;

pub use hub::{ClientId, Hub};

use thiserror::Error;

/// Failure scoped to a single connection.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("client {0} is no longer connected")]
    Disconnected(ClientId),

    #[error("websocket error on client {id}: {source}")]
    Socket {
        id: ClientId,
        #[source]
        source: axum::Error,
    },

    #[error("websocket upgrade failed: {0}")]
    Upgrade(#[source] axum::Error),
}
