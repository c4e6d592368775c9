//! caseboard library root.
//! Exposes the metrics pipeline, the CLI parser and the high-level run() function.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod models;
pub mod report;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use std::io::IsTerminal;
use std::path::PathBuf;
use utils::path::expand_tilde;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let color = !cli.no_color && std::io::stdout().is_terminal();

    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => {
            cli::commands::config::handle(&cli.command, cfg, &config_path(cli))
        }
        Commands::Columns { .. } => cli::commands::columns::handle(&cli.command, cfg, color),
        Commands::Analyze { .. } => cli::commands::analyze::handle(&cli.command, cfg, color),
        Commands::Session { .. } => cli::commands::session::handle(&cli.command, cfg, color),
    }
}

/// Configuration file in use: `--config` or the standard location.
pub fn config_path(cli: &Cli) -> PathBuf {
    cli.config
        .as_deref()
        .map(expand_tilde)
        .unwrap_or_else(Config::config_file)
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ `init` writes the file, it must not fail on a broken existing one
    let cfg = match cli.command {
        Commands::Init => Config::default(),
        _ => Config::load(Some(config_path(&cli).as_path()))?,
    };

    // 3️⃣ dispatch
    dispatch(&cli, &cfg)
}
