//! Build Actor - serialized rebuilds with one reload per attempt.
//!
//! Rebuild requests are handled one at a time. Requests that queue up while a
//! build runs are merged into the next build (unless coalescing is off), and
//! every attempt, failed or not, ends with exactly one hub broadcast.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;

use super::messages::BuildMsg;
use crate::logger::{status_error, status_success};
use crate::pipeline::{self, BuildError, BuildReport, Project, StepRunner};
use crate::reload::Hub;

pub struct BuildActor {
    rx: mpsc::Receiver<BuildMsg>,
    project: Arc<Project>,
    runner: Arc<dyn StepRunner>,
    hub: Hub,
    coalesce: bool,
}

impl BuildActor {
    pub fn new(
        rx: mpsc::Receiver<BuildMsg>,
        project: Arc<Project>,
        runner: Arc<dyn StepRunner>,
        hub: Hub,
    ) -> Self {
        Self {
            rx,
            project,
            runner,
            hub,
            coalesce: true,
        }
    }

    /// Merge queued requests into a single build (on by default).
    pub fn with_coalesce(mut self, coalesce: bool) -> Self {
        self.coalesce = coalesce;
        self
    }

    /// Run until `Shutdown` or every sender is gone.
    pub async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            let BuildMsg::Rebuild { mut paths } = msg else {
                break;
            };
            // Ctrl+C arrived while this request was queued
            if crate::core::is_shutdown() {
                break;
            }

            let mut stop = false;
            if self.coalesce {
                while let Ok(next) = self.rx.try_recv() {
                    match next {
                        BuildMsg::Rebuild { paths: more } => paths.extend(more),
                        BuildMsg::Shutdown => {
                            stop = true;
                            break;
                        }
                    }
                }
                paths.sort();
                paths.dedup();
            }

            self.rebuild(&paths).await;
            if stop {
                break;
            }
        }

        crate::debug!("build"; "stopped");
    }

    /// One build attempt followed by one broadcast.
    ///
    /// An empty `paths` is the initial build.
    async fn rebuild(&self, paths: &[PathBuf]) -> bool {
        if !paths.is_empty() {
            crate::debug!("build"; "changed: {}", changed_summary(paths, &self.project.root));
        }

        let project = Arc::clone(&self.project);
        let runner = Arc::clone(&self.runner);
        let result =
            tokio::task::spawn_blocking(move || pipeline::compile(&project, runner.as_ref())).await;

        let ok = match result {
            Ok(Ok(report)) => {
                status_success(&success_message(&report, paths, &self.project.root));
                true
            }
            Ok(Err(e)) => {
                let (summary, detail) = describe(&e);
                status_error(&summary, &detail);
                false
            }
            Err(e) => {
                status_error("build task failed", &e.to_string());
                false
            }
        };

        self.hub.broadcast();
        ok
    }
}

fn success_message(report: &BuildReport, paths: &[PathBuf], root: &Path) -> String {
    if paths.is_empty() {
        return format!("built in {:.2?}", report.duration);
    }
    format!(
        "rebuilt in {:.2?}: {}",
        report.duration,
        changed_summary(paths, root)
    )
}

/// Summary line plus detail block for the status display.
fn describe(err: &BuildError) -> (String, String) {
    match err {
        BuildError::Step {
            step,
            status,
            output,
        } => (format!("`{step}` failed with {status}"), output.clone()),
        other => (other.to_string(), String::new()),
    }
}

/// `views/about/about.templ` or `views/a.templ (+2 more)`
fn changed_summary(paths: &[PathBuf], root: &Path) -> String {
    let Some(first) = paths.first() else {
        return "no paths".to_string();
    };
    let first = first.strip_prefix(root).unwrap_or(first).display().to_string();
    match paths.len() {
        1 => first,
        n => format!("{first} (+{} more)", n - 1),
    }
}
