//! `statik watch`: build, serve and rebuild on change until Ctrl+C.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::actor::Coordinator;
use crate::config::cfg;

/// How long running build steps may hold up exit.
const BLOCKING_SHUTDOWN: Duration = Duration::from_secs(2);

/// Run watch mode with the loaded global config.
pub fn watch_project() -> Result<()> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    let result = rt.block_on(Coordinator::with_config(cfg()).run());
    rt.shutdown_timeout(BLOCKING_SHUTDOWN);
    result
}
