use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::{mpsc, watch};

use crate::actor::build::BuildActor;
use crate::actor::fs::FsActor;
use crate::actor::messages::BuildMsg;

/// Grace period for each actor after the server stopped.
const STOP_TIMEOUT: Duration = Duration::from_millis(500);

/// Run both actors next to `server` until the server returns.
pub(super) async fn run_actors(
    fs: FsActor,
    build: BuildActor,
    build_tx: mpsc::Sender<BuildMsg>,
    server: impl Future<Output = Result<()>>,
    shutdown_rx: watch::Receiver<bool>,
) -> Result<()> {
    let fs_handle = tokio::spawn(fs.run(shutdown_rx));
    let build_handle = tokio::spawn(build.run());

    let result = server.await;

    crate::debug!("actor"; "sending shutdown to build");
    let _ = build_tx.send(BuildMsg::Shutdown).await;
    drop(build_tx);

    let _ = tokio::time::timeout(STOP_TIMEOUT, fs_handle).await;
    let _ = tokio::time::timeout(STOP_TIMEOUT, build_handle).await;

    result
}
