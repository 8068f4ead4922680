//! Broadcast hub over live-reload connections.
//!
//! The hub owns the set of connected clients. `register`, `deregister` and
//! `broadcast` are the only ways to touch it, and each takes the lock for
//! membership changes only: sends happen on a snapshot outside the lock.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use super::ProtocolError;

/// Identity of one upgraded connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(u64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Server → client messages. Only one exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Reload,
}

impl Signal {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reload => "reload",
        }
    }
}

/// Handle to one registered connection: its id and outbound queue.
///
/// The queue holds one signal. A reload still waiting there already covers
/// any later one, so a stalled socket never accumulates more.
#[derive(Debug, Clone)]
pub struct ClientConnection {
    id: ClientId,
    tx: mpsc::Sender<Signal>,
}

impl ClientConnection {
    fn send(&self, signal: Signal) -> Result<(), ProtocolError> {
        match self.tx.try_send(signal) {
            Ok(()) | Err(TrySendError::Full(_)) => Ok(()),
            Err(TrySendError::Closed(_)) => Err(ProtocolError::Disconnected(self.id)),
        }
    }
}

/// Result of one broadcast pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: usize,
    pub removed: Vec<ClientId>,
}

/// Shared set of live-reload clients.
#[derive(Debug, Clone, Default)]
pub struct Hub {
    clients: Arc<Mutex<FxHashMap<ClientId, ClientConnection>>>,
    next_id: Arc<AtomicU64>,
}

impl Hub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection; the receiver yields what broadcasts send it.
    pub fn register(&self) -> (ClientId, mpsc::Receiver<Signal>) {
        let id = ClientId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = mpsc::channel(1);

        let count = {
            let mut clients = self.clients.lock();
            clients.insert(id, ClientConnection { id, tx });
            clients.len()
        };
        crate::debug!("hub"; "client {} connected ({} active)", id, count);

        (id, rx)
    }

    /// Remove a connection. Returns whether it was still registered.
    pub fn deregister(&self, id: ClientId) -> bool {
        let removed = self.clients.lock().remove(&id).is_some();
        if removed {
            crate::debug!("hub"; "client {} disconnected", id);
        }
        removed
    }

    /// Send `reload` to every client, dropping those that cannot take it.
    pub fn broadcast(&self) -> BroadcastReport {
        let snapshot: Vec<ClientConnection> = self.clients.lock().values().cloned().collect();

        let mut report = BroadcastReport::default();
        for client in &snapshot {
            match client.send(Signal::Reload) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    crate::debug!("hub"; "{}", e);
                    report.removed.push(client.id);
                }
            }
        }

        if !report.removed.is_empty() {
            let mut clients = self.clients.lock();
            for id in &report.removed {
                clients.remove(id);
            }
        }

        crate::debug!(
            "hub";
            "reload sent to {} clients, {} removed",
            report.delivered,
            report.removed.len()
        );
        report
    }

    pub fn len(&self) -> usize {
        self.clients.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[cfg(test)]
    pub fn contains(&self, id: ClientId) -> bool {
        self.clients.lock().contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_deregister() {
        let hub = Hub::new();
        let (a, _rx_a) = hub.register();
        let (b, _rx_b) = hub.register();
        assert_ne!(a, b);
        assert_eq!(hub.len(), 2);

        assert!(hub.deregister(a));
        assert!(!hub.deregister(a));
        assert!(!hub.contains(a));
        assert!(hub.contains(b));
    }

    #[test]
    fn test_broadcast_reaches_everyone() {
        let hub = Hub::new();
        let mut receivers: Vec<_> = (0..3).map(|_| hub.register().1).collect();

        let report = hub.broadcast();
        assert_eq!(report.delivered, 3);
        assert!(report.removed.is_empty());

        for rx in &mut receivers {
            assert_eq!(rx.try_recv().unwrap(), Signal::Reload);
            assert!(rx.try_recv().is_err());
        }
    }

    #[test]
    fn test_failed_member_removed() {
        let hub = Hub::new();
        let mut clients: Vec<_> = (0..4).map(|_| hub.register()).collect();

        // Connection 2's writer is gone
        let (dead, dead_rx) = clients.remove(2);
        drop(dead_rx);

        let report = hub.broadcast();
        assert_eq!(report.delivered, 3);
        assert_eq!(report.removed, vec![dead]);
        assert_eq!(hub.len(), 3);
        assert!(!hub.contains(dead));

        for (_, rx) in &mut clients {
            assert_eq!(rx.try_recv().unwrap(), Signal::Reload);
        }

        // Survivors stay reachable on the next pass
        let report = hub.broadcast();
        assert_eq!(report.delivered, 3);
        assert!(report.removed.is_empty());
        for (_, rx) in &mut clients {
            assert_eq!(rx.try_recv().unwrap(), Signal::Reload);
        }
    }

    #[test]
    fn test_stalled_client_holds_one_reload() {
        let hub = Hub::new();
        let (id, mut rx) = hub.register();

        for _ in 0..5 {
            let report = hub.broadcast();
            assert_eq!(report.delivered, 1);
            assert!(report.removed.is_empty());
        }

        // Still registered, with a single pending reload
        assert!(hub.contains(id));
        assert_eq!(rx.try_recv().unwrap(), Signal::Reload);
        assert!(rx.try_recv().is_err());

        hub.broadcast();
        assert_eq!(rx.try_recv().unwrap(), Signal::Reload);
    }

    #[test]
    fn test_broadcast_empty() {
        let hub = Hub::new();
        assert_eq!(hub.broadcast(), BroadcastReport::default());
        assert!(hub.is_empty());
    }

    #[test]
    fn test_concurrent_registration_during_broadcast() {
        let hub = Hub::new();
        let _keep: Vec<_> = (0..16).map(|_| hub.register()).collect();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let hub = hub.clone();
                std::thread::spawn(move || {
                    let mut held = Vec::new();
                    for _ in 0..50 {
                        held.push(hub.register());
                        hub.broadcast();
                    }
                    held
                })
            })
            .collect();

        // Receivers stay alive inside the join results
        let held: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let added: usize = held.iter().map(Vec::len).sum();
        assert_eq!(added, 200);
        assert_eq!(hub.len(), 16 + added);
    }
}
