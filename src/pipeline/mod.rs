//! Build orchestration.
//!
//! ```text
//! static.json ──► codegen ──► main.go
//!                               │
//!      resolve-dependencies ──► compile-templates ──► run ──► output/
//!      (skipped when tidied)
//! ```
//!
//! - `compile()`: regenerate the entrypoint then run the step pipeline
//! - `run_steps()`: the step pipeline alone
//!
//! A failing step stops the pipeline; nothing after it runs. The registry's
//! `tidied` flag is persisted only after the resolve step succeeded.

mod runner;
mod step;

pub use runner::{CommandRunner, StepCommands, StepOutput, StepRunner};
pub use step::BuildStep;

use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use thiserror::Error;

use crate::codegen::{self, CodegenError, DirLayout};
use crate::config::SiteConfig;
use crate::debug;
use crate::page::{Registry, RegistryError, RegistryStore};

// =============================================================================
// Types
// =============================================================================

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("step `{step}` failed with {status}\n{output}")]
    Step {
        step: BuildStep,
        status: String,
        output: String,
    },

    #[error("step `{step}` could not start `{command}`: {reason}")]
    Spawn {
        step: BuildStep,
        command: String,
        reason: String,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

/// Outcome of a successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub executed: Vec<BuildStep>,
    pub skipped: Vec<BuildStep>,
    pub duration: Duration,
    /// Whether `main.go` was rewritten.
    pub entry_written: bool,
}

/// Everything the orchestrator needs to know about one project.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub registry: RegistryStore,
    /// Generated entrypoint path.
    pub entry: PathBuf,
    pub dirs: DirLayout,
}

impl Project {
    pub fn from_config(config: &SiteConfig) -> Self {
        let rel = |path: &Path| -> String {
            config
                .root_relative(path)
                .to_string_lossy()
                .replace('\\', "/")
        };

        Self {
            root: config.root.clone(),
            registry: RegistryStore::new(&config.build.registry),
            entry: config.build.entry.clone(),
            dirs: DirLayout {
                views: rel(&config.build.views),
                public: rel(&config.build.public),
                output: rel(&config.build.output),
            },
        }
    }
}

// =============================================================================
// Orchestration
// =============================================================================

/// Regenerate the entrypoint from the registry and run every build step.
pub fn compile(project: &Project, runner: &dyn StepRunner) -> Result<BuildReport, BuildError> {
    let start = Instant::now();
    let registry = project.registry.load()?;

    let source = codegen::generate(&registry, &project.dirs);
    let entry_written = codegen::write_entrypoint(&project.entry, &source)?;
    debug!(
        "compile";
        "{} {} ({} pages)",
        if entry_written { "wrote" } else { "unchanged" },
        project.entry.display(),
        registry.pages().count()
    );

    let mut report = run_steps(project, &registry, runner)?;
    report.entry_written = entry_written;
    report.duration = start.elapsed();
    Ok(report)
}

/// Run the step pipeline in order, stopping at the first failure.
pub fn run_steps(
    project: &Project,
    registry: &Registry,
    runner: &dyn StepRunner,
) -> Result<BuildReport, BuildError> {
    let start = Instant::now();
    let mut executed = Vec::with_capacity(BuildStep::ALL.len());
    let mut skipped = Vec::new();

    for step in BuildStep::ALL {
        if step == BuildStep::ResolveDependencies && registry.is_tidied() {
            debug!("step"; "{step}: skipped, already tidied");
            skipped.push(step);
            continue;
        }

        let out = runner.run(step, &project.root)?;
        if !out.success() {
            return Err(BuildError::Step {
                step,
                status: out.status(),
                output: out.output,
            });
        }
        executed.push(step);

        if step == BuildStep::ResolveDependencies {
            project.registry.mark_tidied()?;
        }
    }

    Ok(BuildReport {
        executed,
        skipped,
        duration: start.elapsed(),
        entry_written: false,
    })
}
