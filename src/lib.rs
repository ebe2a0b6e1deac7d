//! rAcademic library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let cmd = &cli.command;
    match cmd {
        Commands::Init { .. } => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(cmd, cfg),
        Commands::Db { .. } => commands::db::handle(cmd, cfg),
        Commands::Log { .. } => commands::log::handle(cmd, cfg),
        Commands::Backup { .. } => commands::backup::handle(cmd, cfg),
        Commands::Health => commands::health::handle(cfg),
        Commands::Dashboard { .. } => commands::dashboard::handle(cmd, cfg),
        Commands::List { .. } => commands::list::handle(cmd, cfg),
        Commands::User { .. } => commands::user::handle(cmd, cfg),
        Commands::Student { .. } => commands::student::handle(cmd, cfg),
        Commands::Teacher { .. } => commands::teacher::handle(cmd, cfg),
        Commands::Class { .. } => commands::class::handle(cmd, cfg),
        Commands::Subject { .. } => commands::subject::handle(cmd, cfg),
        Commands::Grade { .. } => commands::grade::handle(cmd, cfg),
        Commands::Attendance { .. } => commands::attendance::handle(cmd, cfg),
        Commands::Announce { .. } => commands::announce::handle(cmd, cfg),
        Commands::Export { .. } => commands::export::handle(cmd, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // config is loaded once and handed to every handler
    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
