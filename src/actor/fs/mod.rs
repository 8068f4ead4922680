//! FileSystem Actor
//!
//! Watches the pages and static-assets trees and asks the BuildActor for a
//! rebuild after a burst of qualifying changes settles.
//!
//! ```text
//! notify → EventFilter → Debouncer (window) → BuildMsg::Rebuild
//! ```
//!
//! With a zero window every qualifying write becomes its own rebuild request.

use std::path::PathBuf;
use std::time::Duration;

use notify::RecommendedWatcher;
use tokio::sync::{mpsc, watch};

use super::messages::BuildMsg;

// Pure timing and deduplication.
mod debouncer;
// Which raw events count.
mod filter;
// Shared fs event types.
mod types;
// Startup subscription of directory trees.
mod watch_dirs;


use debouncer::Debouncer;
use filter::EventFilter;
use watch_dirs::subscribe_tree;

/// FileSystem Actor - watches for file changes
pub struct FsActor {
    /// Channel to receive notify events (sync -> async bridge)
    notify_rx: std::sync::mpsc::Receiver<notify::Result<notify::Event>>,
    /// Watcher handle (must be kept alive)
    watcher: RecommendedWatcher,
    /// Channel to send messages to BuildActor
    build_tx: mpsc::Sender<BuildMsg>,
    filter: EventFilter,
    debouncer: Debouncer,
    /// Zero window: no coalescing
    immediate: bool,
}

impl FsActor {
    /// Start watching `roots` right away.
    ///
    /// Events buffer in the notify channel until `run` is called, so changes
    /// made during the initial build are not lost.
    pub fn new(
        roots: &[PathBuf],
        entry_ext: &str,
        debounce: Duration,
        build_tx: mpsc::Sender<BuildMsg>,
    ) -> notify::Result<Self> {
        let (notify_tx, notify_rx) = std::sync::mpsc::channel();

        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = notify_tx.send(res);
        })?;

        let mut watched = 0;
        for root in roots {
            watched += subscribe_tree(&mut watcher, root)?;
        }
        crate::debug!("watch"; "watching {} directories", watched);

        Ok(Self {
            notify_rx,
            watcher,
            build_tx,
            filter: EventFilter::new(entry_ext).writes_only(debounce.is_zero()),
            debouncer: Debouncer::new(debounce),
            immediate: debounce.is_zero(),
        })
    }

    /// Run the actor event loop until shutdown or the BuildActor is gone.
    pub async fn run(self, shutdown: watch::Receiver<bool>) {
        let Self {
            notify_rx,
            watcher,
            build_tx,
            filter,
            mut debouncer,
            immediate,
        } = self;
        let _watcher = watcher;

        let (async_tx, mut async_rx) = mpsc::channel::<notify::Event>(64);

        // Spawn a thread to poll notify events and send to async channel
        std::thread::spawn(move || {
            while let Ok(result) = notify_rx.recv() {
                match result {
                    Ok(event) => {
                        if async_tx.blocking_send(event).is_err() {
                            break; // Receiver dropped
                        }
                    }
                    Err(e) => crate::log!("watch"; "notify error: {}", e),
                }
            }
        });

        let stop = crate::core::wait_for_shutdown(shutdown);
        tokio::pin!(stop);

        loop {
            tokio::select! {
                biased;
                _ = &mut stop => break,
                Some(event) = async_rx.recv() => {
                    let Some((kind, paths)) = filter.accept(&event) else {
                        continue;
                    };
                    if !immediate {
                        debouncer.add(kind, paths);
                        continue;
                    }
                    crate::debug!("watch"; "{} {:?}", kind.label(), paths);
                    if build_tx.send(BuildMsg::Rebuild { paths }).await.is_err() {
                        break;
                    }
                }
                _ = tokio::time::sleep(debouncer.sleep_duration()) => {
                    let Some(paths) = debouncer.take_if_ready() else {
                        continue;
                    };
                    if build_tx.send(BuildMsg::Rebuild { paths }).await.is_err() {
                        break;
                    }
                }
            }
        }

        crate::debug!("watch"; "stopped");
    }
}
