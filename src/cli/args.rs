//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Scaffold, compile and live-reload templ static sites
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Project root (default: current directory)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Config file path, relative to the project root (default: statik.toml)
    #[arg(short = 'C', long, global = true, default_value = "statik.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create the project layout, go module and page registry
    Setup {
        /// Go module name of the new project
        name: String,

        /// Skip `go mod init` and `go get github.com/a-h/templ`
        #[arg(long)]
        skip_go: bool,
    },

    /// Scaffold a page and register it
    #[command(visible_alias = "a")]
    Add {
        /// Page name (`home` is rendered at the site root)
        page: String,
    },

    /// Generate main.go and run the build steps once
    #[command(visible_alias = "c")]
    Compile,

    /// Compile, then rebuild and live-reload on every change
    #[command(visible_alias = "w")]
    Watch {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Milliseconds to coalesce file events before rebuilding (0 = every event)
        #[arg(short, long)]
        debounce: Option<u64>,
    },
}

impl Cli {
    pub const fn is_setup(&self) -> bool {
        matches!(self.command, Commands::Setup { .. })
    }
    pub const fn is_watch(&self) -> bool {
        matches!(self.command, Commands::Watch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_and_version_flags() {
        let cli = Cli::try_parse_from(["statik", "-v", "compile"]).unwrap();
        assert!(cli.verbose);

        let err = Cli::try_parse_from(["statik", "-V"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_parse_watch() {
        let cli = Cli::try_parse_from([
            "statik", "watch", "--port", "9000", "-d", "0", "--verbose",
        ])
        .unwrap();
        assert!(cli.is_watch());
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("statik.toml"));
        match cli.command {
            Commands::Watch {
                port,
                debounce,
                interface,
            } => {
                assert_eq!(port, Some(9000));
                assert_eq!(debounce, Some(0));
                assert!(interface.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_setup_and_add() {
        let cli = Cli::try_parse_from(["statik", "--root", "site", "setup", "demo", "--skip-go"])
            .unwrap();
        assert!(cli.is_setup());
        assert_eq!(cli.root, Some(PathBuf::from("site")));
        assert!(matches!(
            cli.command,
            Commands::Setup { ref name, skip_go: true } if name == "demo"
        ));

        let cli = Cli::try_parse_from(["statik", "add", "about"]).unwrap();
        assert!(matches!(cli.command, Commands::Add { ref page } if page == "about"));
    }

    #[test]
    fn test_missing_page_name() {
        assert!(Cli::try_parse_from(["statik", "add"]).is_err());
    }
}
