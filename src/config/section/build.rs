//! `[build]` section configuration.
//!
//! Project paths and the command line of each build step.
//!
//! # Example
//!
//! ```toml
//! [build]
//! registry = "static.json"           # Page registry
//! entry = "main.go"                  # Generated entrypoint
//! views = "views"                    # templ pages (watched)
//! public = "public"                  # Static assets (watched, copied to output)
//! output = "output"                  # Rendered site
//! tidy = ["go", "mod", "tidy"]       # resolve-dependencies, runs until it succeeds once
//! generate = ["templ", "generate"]   # compile-templates
//! run = ["go", "run", "."]           # run
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::pipeline::StepCommands;
use crate::utils::path::resolve_path;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Page registry file.
    pub registry: PathBuf,

    /// Generated Go entrypoint.
    pub entry: PathBuf,

    /// templ sources; `home` lives here, other pages in subdirectories.
    pub views: PathBuf,

    /// Static assets copied into the output.
    pub public: PathBuf,

    /// Build output served in watch mode.
    pub output: PathBuf,

    /// `resolve-dependencies` command.
    pub tidy: Vec<String>,

    /// `compile-templates` command.
    pub generate: Vec<String>,

    /// `run` command.
    pub run: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        let StepCommands {
            tidy,
            generate,
            run,
        } = StepCommands::default();
        Self {
            registry: "static.json".into(),
            entry: "main.go".into(),
            views: "views".into(),
            public: "public".into(),
            output: "output".into(),
            tidy,
            generate,
            run,
        }
    }
}

impl BuildConfig {
    const TIDY: FieldPath = FieldPath::new("build.tidy");
    const GENERATE: FieldPath = FieldPath::new("build.generate");
    const RUN: FieldPath = FieldPath::new("build.run");
    const ENTRY: FieldPath = FieldPath::new("build.entry");

    pub fn commands(&self) -> StepCommands {
        StepCommands {
            tidy: self.tidy.clone(),
            generate: self.generate.clone(),
            run: self.run.clone(),
        }
    }

    /// Extension of the generated entrypoint (`go`).
    ///
    /// The watcher ignores files with this extension so generated code
    /// never triggers another rebuild.
    pub fn entry_extension(&self) -> Option<String> {
        self.entry
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
    }

    /// Resolve every path against `root`.
    pub fn normalize(&mut self, root: &Path) {
        for path in [
            &mut self.registry,
            &mut self.entry,
            &mut self.views,
            &mut self.public,
            &mut self.output,
        ] {
            *path = resolve_path(path, root);
        }
    }

    /// Structural checks that need no external state.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (field, cmd) in [
            (Self::TIDY, &self.tidy),
            (Self::GENERATE, &self.generate),
            (Self::RUN, &self.run),
        ] {
            if cmd.first().is_none_or(|program| program.trim().is_empty()) {
                diag.error(field, "command is empty");
            }
        }

        if self.entry.file_name().is_none() {
            diag.error(Self::ENTRY, "must name a file");
        }
    }

    /// Check that every step's program is installed.
    pub fn validate_tools(&self, diag: &mut ConfigDiagnostics) {
        for (field, cmd) in [
            (Self::TIDY, &self.tidy),
            (Self::GENERATE, &self.generate),
            (Self::RUN, &self.run),
        ] {
            let Some(program) = cmd.first() else { continue };
            if which::which(program).is_err() {
                diag.error_with_hint(field, format!("`{program}` not found"), install_hint(program));
            }
        }
    }
}

/// How to get a missing toolchain program.
pub fn install_hint(program: &str) -> String {
    match program {
        "go" => "install Go from https://go.dev/dl/".to_string(),
        "templ" => "go install github.com/a-h/templ/cmd/templ@latest".to_string(),
        other => format!("install `{other}` or update statik.toml"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_build_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.build, BuildConfig::default());
        assert_eq!(config.build.registry, PathBuf::from("static.json"));
        assert_eq!(config.build.entry_extension().as_deref(), Some("go"));
        assert_eq!(config.build.run, ["go", "run", "."]);
    }

    #[test]
    fn test_build_partial_override() {
        let config = test_parse_config(
            "[build]\noutput = \"dist\"\ngenerate = [\"go\", \"tool\", \"templ\", \"generate\"]",
        );
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert_eq!(config.build.generate, ["go", "tool", "templ", "generate"]);
        // untouched fields keep defaults
        assert_eq!(config.build.views, PathBuf::from("views"));
        assert_eq!(config.build.tidy, ["go", "mod", "tidy"]);
    }

    #[test]
    fn test_build_validate_empty_command() {
        let config = test_parse_config("[build]\ntidy = []\nrun = [\"  \"]");
        let mut diag = ConfigDiagnostics::new();
        config.build.validate(&mut diag);

        let fields: Vec<_> = diag.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["build.tidy", "build.run"]);
    }

    #[test]
    fn test_build_validate_tools() {
        let config = test_parse_config("[build]\nrun = [\"statik-missing-tool\"]");
        let mut diag = ConfigDiagnostics::new();
        config.build.validate_tools(&mut diag);

        let missing = diag
            .errors()
            .iter()
            .find(|e| e.field.as_str() == "build.run")
            .unwrap();
        assert!(missing.message.contains("statik-missing-tool"));
    }

    #[test]
    fn test_build_normalize() {
        let mut build = BuildConfig::default();
        build.normalize(Path::new("/project"));
        assert_eq!(build.registry, PathBuf::from("/project/static.json"));
        assert_eq!(build.output, PathBuf::from("/project/output"));
    }
}
