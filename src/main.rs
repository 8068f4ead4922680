//! statik - scaffold, compile and live-reload templ static sites.

mod actor;
mod cli;
mod codegen;
mod config;
mod core;
mod embed;
mod logger;
mod page;
mod pipeline;
mod reload;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{SiteConfig, init_config};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = init_config(SiteConfig::load(&cli)?);

    match &cli.command {
        Commands::Setup { name, skip_go } => cli::setup::new_project(&config, name, *skip_go),
        Commands::Add { page } => cli::add::add_page(&config, page),
        Commands::Compile => cli::compile::compile_project(&config),
        Commands::Watch { .. } => cli::watch::watch_project(),
    }
}
