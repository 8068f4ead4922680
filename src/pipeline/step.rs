//! The fixed build step sequence.

use std::fmt;

/// One stage of the build pipeline, always run in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildStep {
    /// `go mod tidy`, skipped once the registry is marked tidied.
    ResolveDependencies,
    /// `templ generate`
    CompileTemplates,
    /// `go run .`, renders pages into the output directory.
    Run,
}

impl BuildStep {
    pub const ALL: [BuildStep; 3] = [
        BuildStep::ResolveDependencies,
        BuildStep::CompileTemplates,
        BuildStep::Run,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::ResolveDependencies => "resolve-dependencies",
            Self::CompileTemplates => "compile-templates",
            Self::Run => "run",
        }
    }
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_fixed() {
        assert_eq!(
            BuildStep::ALL.map(BuildStep::name),
            ["resolve-dependencies", "compile-templates", "run"]
        );
    }
}
