pub mod cli;
pub mod core;
pub mod store;

use crate::core::config::AppConfig;
use anyhow::Result;
use tracing::{debug, info};

/// Commands that operate on a loaded configuration.
#[derive(Debug, Clone)]
pub enum AppCommand {
    Budget(cli::BudgetArgs),
    Invest(cli::InvestArgs),
    Expenses(cli::ExpenseAction),
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("finsim starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Budget(args) => cli::budget::run(&config, &args),
        AppCommand::Invest(args) => cli::invest::run(&config, &args),
        AppCommand::Expenses(action) => cli::expenses::run(&config, &action),
    }
}
