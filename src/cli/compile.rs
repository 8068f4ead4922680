//! `statik compile`: regenerate `main.go` and run the build steps once.

use anyhow::Result;

use crate::config::SiteConfig;
use crate::log;
use crate::pipeline::{self, CommandRunner, Project};

pub fn compile_project(config: &SiteConfig) -> Result<()> {
    let project = Project::from_config(config);
    let runner = CommandRunner::new(config.build.commands());

    let report = pipeline::compile(&project, &runner)?;

    let skipped = if report.skipped.is_empty() {
        String::new()
    } else {
        let names: Vec<_> = report.skipped.iter().map(|s| s.name()).collect();
        format!(", skipped {}", names.join(", "))
    };
    log!(
        "compile";
        "done in {:.2?} ({} steps{})",
        report.duration,
        report.executed.len(),
        skipped
    );
    Ok(())
}
