//! Process execution behind the orchestrator.

use std::path::Path;

use super::{BuildError, BuildStep};
use crate::logger::is_verbose;
use crate::utils::exec::{Cmd, EMPTY_FILTER, FilterRule, GO_FILTER, TEMPL_FILTER, combined_output};

/// Result of one finished step command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutput {
    /// Exit code, `None` when killed by a signal.
    pub code: Option<i32>,
    /// Combined stderr and stdout.
    pub output: String,
}

impl StepOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn status(&self) -> String {
        match self.code {
            Some(code) => format!("exit status {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Executes a single build step in the project root.
///
/// Returns `Err` only when the step could not be started; a non-zero exit
/// is reported through [`StepOutput::code`].
pub trait StepRunner: Send + Sync {
    fn run(&self, step: BuildStep, root: &Path) -> Result<StepOutput, BuildError>;
}

/// Command lines for each step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepCommands {
    pub tidy: Vec<String>,
    pub generate: Vec<String>,
    pub run: Vec<String>,
}

impl StepCommands {
    pub fn for_step(&self, step: BuildStep) -> &[String] {
        match step {
            BuildStep::ResolveDependencies => &self.tidy,
            BuildStep::CompileTemplates => &self.generate,
            BuildStep::Run => &self.run,
        }
    }
}

impl Default for StepCommands {
    fn default() -> Self {
        let owned = |args: &[&str]| args.iter().map(|s| s.to_string()).collect();
        Self {
            tidy: owned(&["go", "mod", "tidy"]),
            generate: owned(&["templ", "generate"]),
            run: owned(&["go", "run", "."]),
        }
    }
}

/// Runs steps as external processes.
#[derive(Debug, Clone, Default)]
pub struct CommandRunner {
    commands: StepCommands,
}

impl CommandRunner {
    pub fn new(commands: StepCommands) -> Self {
        Self { commands }
    }

    fn filter(step: BuildStep) -> &'static FilterRule {
        match step {
            BuildStep::ResolveDependencies => &GO_FILTER,
            BuildStep::CompileTemplates => &TEMPL_FILTER,
            BuildStep::Run => &EMPTY_FILTER,
        }
    }
}

impl StepRunner for CommandRunner {
    fn run(&self, step: BuildStep, root: &Path) -> Result<StepOutput, BuildError> {
        let cmd = Cmd::from_slice(self.commands.for_step(step)).cwd(root);
        let command = cmd.display();
        crate::debug!("step"; "{step}: {command}");

        let output = cmd.output().map_err(|e| BuildError::Spawn {
            step,
            command,
            reason: format!("{e:#}"),
        })?;

        let filter = Self::filter(step);
        let text = filter.lines(&combined_output(&output)).join("\n");
        if output.status.success() && is_verbose() && !text.is_empty() {
            crate::log!(step.name(); "{text}");
        }

        Ok(StepOutput {
            code: output.status.code(),
            output: text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_commands() {
        let commands = StepCommands::default();
        assert_eq!(
            commands.for_step(BuildStep::ResolveDependencies),
            ["go", "mod", "tidy"]
        );
        assert_eq!(
            commands.for_step(BuildStep::CompileTemplates),
            ["templ", "generate"]
        );
        assert_eq!(commands.for_step(BuildStep::Run), ["go", "run", "."]);
    }

    #[test]
    fn test_step_output_status() {
        let ok = StepOutput {
            code: Some(0),
            output: String::new(),
        };
        assert!(ok.success());

        let failed = StepOutput {
            code: Some(2),
            output: String::new(),
        };
        assert!(!failed.success());
        assert_eq!(failed.status(), "exit status 2");

        let killed = StepOutput {
            code: None,
            output: String::new(),
        };
        assert!(!killed.success());
    }

    #[cfg(unix)]
    #[test]
    fn test_command_runner_reports_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let sh = |script: &str| vec!["sh".to_string(), "-c".to_string(), script.to_string()];
        let runner = CommandRunner::new(StepCommands {
            tidy: sh("true"),
            generate: sh("echo broken template >&2; exit 1"),
            run: sh("pwd"),
        });

        let out = runner.run(BuildStep::ResolveDependencies, dir.path()).unwrap();
        assert!(out.success());

        let out = runner.run(BuildStep::CompileTemplates, dir.path()).unwrap();
        assert_eq!(out.code, Some(1));
        assert_eq!(out.output, "broken template");

        let out = runner.run(BuildStep::Run, dir.path()).unwrap();
        let cwd = std::path::PathBuf::from(out.output.trim());
        assert_eq!(cwd.canonicalize().unwrap(), dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_command_runner_spawn_failure() {
        let dir = tempfile::tempdir().unwrap();
        let runner = CommandRunner::new(StepCommands {
            tidy: vec!["statik-no-such-binary".to_string()],
            ..StepCommands::default()
        });

        let err = runner
            .run(BuildStep::ResolveDependencies, dir.path())
            .unwrap_err();
        assert!(matches!(
            err,
            BuildError::Spawn {
                step: BuildStep::ResolveDependencies,
                ..
            }
        ));
    }
}
