//! Development HTTP server: build output plus the `/ws` reload endpoint.
//!
//! ```text
//! GET /ws   upgrade, register with the hub, wait for disconnect
//! GET /*    file from the output directory (`/` → index.html), else 404
//! ```

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::State,
    extract::ws::{Message, Utf8Bytes, WebSocket, WebSocketUpgrade},
    response::IntoResponse,
    routing::get,
};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::services::ServeDir;

use super::{Hub, ProtocolError};
use crate::core::wait_for_shutdown;

/// Path of the upgrade endpoint.
pub const WS_PATH: &str = "/ws";

/// Maximum port retry attempts
const MAX_PORT_RETRIES: u16 = 10;

/// Build the router serving `output` and the reload endpoint.
pub fn router(hub: Hub, output: &Path) -> Router {
    let files = ServeDir::new(output).append_index_html_on_directories(true);

    Router::new()
        .route(WS_PATH, get(ws_handler))
        .fallback_service(files)
        .with_state(hub)
}

/// Bind `addr`, moving to the next port while the current one is taken.
pub async fn bind(addr: SocketAddr) -> Result<(TcpListener, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..MAX_PORT_RETRIES {
        let mut candidate = addr;
        candidate.set_port(addr.port().saturating_add(offset));

        match TcpListener::bind(candidate).await {
            Ok(listener) => {
                let local = listener.local_addr()?;
                if offset > 0 {
                    crate::log!("serve"; "port {} in use, using {}", addr.port(), local.port());
                }
                return Ok((listener, local));
            }
            Err(e) => last_error = Some(e),
        }
    }

    let err = last_error.map(anyhow::Error::from).unwrap_or_else(|| anyhow::anyhow!("no port tried"));
    Err(err).with_context(|| {
        format!(
            "Failed to bind {} (tried {} ports)",
            addr,
            MAX_PORT_RETRIES
        )
    })
}

/// Serve until `shutdown` flips to true.
pub async fn serve(listener: TcpListener, app: Router, shutdown: watch::Receiver<bool>) -> Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown(shutdown))
        .await
        .context("HTTP server error")
}

async fn ws_handler(State(hub): State<Hub>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_failed_upgrade(|e| crate::debug!("hub"; "{}", ProtocolError::Upgrade(e)))
        .on_upgrade(move |socket| handle_socket(hub, socket))
}

/// Drive one upgraded connection until either side goes away.
async fn handle_socket(hub: Hub, socket: WebSocket) {
    let (id, mut rx) = hub.register();
    let (mut sender, mut receiver) = socket.split();

    let writer_hub = hub.clone();
    let mut writer = tokio::spawn(async move {
        while let Some(signal) = rx.recv().await {
            let frame = Message::Text(Utf8Bytes::from_static(signal.as_str()));
            if let Err(source) = sender.send(frame).await {
                crate::debug!("hub"; "{}", ProtocolError::Socket { id, source });
                writer_hub.deregister(id);
                return;
            }
        }
        // Dropped from the hub
        let _ = sender.send(Message::Close(None)).await;
    });

    // Inbound frames only signal liveness; content is ignored
    loop {
        tokio::select! {
            msg = receiver.next() => match msg {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(source)) => {
                    crate::debug!("hub"; "{}", ProtocolError::Socket { id, source });
                    break;
                }
            },
            _ = &mut writer => break,
        }
    }

    hub.deregister(id);
    writer.abort();
}
