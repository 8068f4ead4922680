//! Actor Coordinator - Wires up the watch mode actor system
//!
//! The Coordinator is a thin orchestrator that:
//! - Creates the watcher before anything else, so no change is missed
//! - Queues the initial build
//! - Runs the actors next to the HTTP server

mod runtime;
mod watch_paths;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, watch};

use super::build::BuildActor;
use super::fs::FsActor;
use super::messages::BuildMsg;
use crate::config::SiteConfig;
use crate::pipeline::{CommandRunner, Project, StepRunner};
use crate::reload::{Hub, server};

const CHANNEL_BUFFER: usize = 32;

/// Coordinator - wires up and runs the actor system.
pub struct Coordinator {
    config: Arc<SiteConfig>,
    runner: Arc<dyn StepRunner>,
    shutdown_rx: Option<watch::Receiver<bool>>,
}

impl Coordinator {
    /// Create from Arc<SiteConfig>, running the configured step commands.
    pub fn with_config(config: Arc<SiteConfig>) -> Self {
        let runner = Arc::new(CommandRunner::new(config.build.commands()));
        Self {
            config,
            runner,
            shutdown_rx: None,
        }
    }

    /// Replace the step runner.
    #[cfg(test)]
    pub fn with_runner(mut self, runner: Arc<dyn StepRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Set shutdown signal receiver (defaults to Ctrl+C).
    pub fn with_shutdown_signal(mut self, rx: watch::Receiver<bool>) -> Self {
        self.shutdown_rx = Some(rx);
        self
    }

    /// Run the actor system until shutdown.
    pub async fn run(mut self) -> Result<()> {
        let config = Arc::clone(&self.config);
        let shutdown_rx = self
            .shutdown_rx
            .take()
            .unwrap_or_else(crate::core::shutdown_signal);

        let (build_tx, build_rx) = mpsc::channel::<BuildMsg>(CHANNEL_BUFFER);

        let watch_paths = watch_paths::collect_watch_paths(&config);
        let entry_ext = config.build.entry_extension().unwrap_or_default();
        let debounce = config.watch.debounce();
        let fs_actor = FsActor::new(&watch_paths, &entry_ext, debounce, build_tx.clone())
            .map_err(|e| anyhow::anyhow!("watcher failed: {}", e))?;

        // Initial build goes through the actor like every rebuild
        build_tx
            .send(BuildMsg::Rebuild { paths: Vec::new() })
            .await
            .context("build actor unavailable")?;

        let hub = Hub::new();
        let project = Arc::new(Project::from_config(&config));
        let build_actor = BuildActor::new(build_rx, project, Arc::clone(&self.runner), hub.clone())
            .with_coalesce(!debounce.is_zero());

        std::fs::create_dir_all(&config.build.output).with_context(|| {
            format!("Failed to create {}", config.build.output.display())
        })?;
        let (listener, addr) = server::bind(config.serve.addr()).await?;
        let app = server::router(hub.clone(), &config.build.output);
        crate::log!("serve"; "http://{}", addr);
        crate::log!("watch"; "watching for changes, press Ctrl+C to stop");

        crate::debug!("actor"; "start");
        let server = server::serve(listener, app, shutdown_rx.clone());
        runtime::run_actors(fs_actor, build_actor, build_tx, server, shutdown_rx).await?;

        if !hub.is_empty() {
            crate::debug!("hub"; "{} client(s) still connected at shutdown", hub.len());
        }
        crate::debug!("actor"; "stopped");
        Ok(())
    }
}
