//! rCampus library root.
//! Exposes the CLI parser, the high-level run() function and the roster,
//! attendance and statistics modules behind it.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod fixtures;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Students { .. } => cli::commands::students::handle(&cli.command, cfg),
        Commands::Attendance { .. } => cli::commands::attendance::handle(&cli.command, cfg),
        Commands::Stats { .. } => cli::commands::stats::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // config is loaded once; --db wins over the file
    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = Some(Config::resolve_db_path(custom_db));
    }

    dispatch(&cli, &cfg)
}
