//! Process-wide shutdown state.
//!
//! - `SHUTDOWN`: Has shutdown been requested? (Ctrl+C received)
//! - `LISTENING`: Is a long-running command waiting for the shutdown signal?
//!
//! One-shot commands (`setup`, `add`, `compile`) exit right away on Ctrl+C.
//! `watch` subscribes to the signal so the server and actors stop cleanly.

use std::sync::LazyLock;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// A subscriber handles shutdown gracefully
static LISTENING: AtomicBool = AtomicBool::new(false);

/// Shutdown broadcast for the server and actors
static SHUTDOWN_TX: LazyLock<watch::Sender<bool>> = LazyLock::new(|| watch::channel(false).0);

/// Setup the global Ctrl+C handler. Call once at program start
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        if LISTENING.load(Ordering::SeqCst) {
            crate::log!("serve"; "shutting down...");
            request_shutdown();
        } else {
            // Nothing to drain, exit like an interrupted process
            std::process::exit(130);
        }
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Subscribe to the shutdown signal.
///
/// After the first subscription Ctrl+C no longer exits the process directly.
pub fn shutdown_signal() -> watch::Receiver<bool> {
    LISTENING.store(true, Ordering::SeqCst);
    SHUTDOWN_TX.subscribe()
}

/// Flag shutdown and wake every subscriber.
pub fn request_shutdown() {
    SHUTDOWN.store(true, Ordering::SeqCst);
    SHUTDOWN_TX.send_replace(true);
}

/// Check if shutdown has been requested
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

/// Resolve once `rx` observes a shutdown request.
///
/// Also resolves when the sender is gone.
pub async fn wait_for_shutdown(mut rx: watch::Receiver<bool>) {
    let _ = rx.wait_for(|stop| *stop).await;
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_wait_for_local_signal() {
        let (tx, rx) = watch::channel(false);
        let waiter = tokio::spawn(wait_for_shutdown(rx));

        tx.send_replace(true);
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_wait_ends_when_sender_dropped() {
        let (tx, rx) = watch::channel(false);
        drop(tx);
        tokio::time::timeout(Duration::from_secs(1), wait_for_shutdown(rx))
            .await
            .unwrap();
    }
}
