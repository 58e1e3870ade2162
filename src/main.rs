use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use finsim::cli::{BudgetArgs, ExpenseAction, InvestArgs};
use finsim::core::TimeScale;
use finsim::core::log::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show budget totals, category breakdown and savings progress
    Budget {
        /// Time scale: weekly, monthly or annual
        #[arg(short, long)]
        scale: Option<TimeScale>,
        /// What-if: monthly income increase
        #[arg(long)]
        income_increase: Option<f64>,
        /// What-if: monthly expense reduction
        #[arg(long)]
        expense_reduction: Option<f64>,
    },
    /// Project investment growth and time to reach the goal
    Invest {
        /// Investment horizon in years
        #[arg(short, long)]
        years: Option<u32>,
        /// Target balance
        #[arg(short, long)]
        goal: Option<f64>,
        /// Strategy ids to compare (repeatable)
        #[arg(short, long = "strategy")]
        strategies: Vec<String>,
    },
    /// Manage the expense log
    #[command(subcommand)]
    Expenses(ExpenseCommands),
}

#[derive(Subcommand)]
enum ExpenseCommands {
    /// List logged expenses
    List,
    /// Log a new expense
    Add {
        #[arg(short, long)]
        amount: String,
        #[arg(short = 't', long)]
        category: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Date as YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Remove an expense by id
    Remove { id: i64 },
    /// Export the log as CSV
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl From<ExpenseCommands> for ExpenseAction {
    fn from(cmd: ExpenseCommands) -> ExpenseAction {
        match cmd {
            ExpenseCommands::List => ExpenseAction::List,
            ExpenseCommands::Add {
                amount,
                category,
                description,
                date,
            } => ExpenseAction::Add {
                amount,
                category,
                description,
                date,
            },
            ExpenseCommands::Remove { id } => ExpenseAction::Remove { id },
            ExpenseCommands::Export { output } => ExpenseAction::Export { output },
        }
    }
}

impl From<Commands> for finsim::AppCommand {
    fn from(cmd: Commands) -> finsim::AppCommand {
        match cmd {
            Commands::Budget {
                scale,
                income_increase,
                expense_reduction,
            } => finsim::AppCommand::Budget(BudgetArgs {
                scale,
                income_increase,
                expense_reduction,
            }),
            Commands::Invest {
                years,
                goal,
                strategies,
            } => finsim::AppCommand::Invest(InvestArgs {
                years,
                goal,
                strategies,
            }),
            Commands::Expenses(cmd) => finsim::AppCommand::Expenses(cmd.into()),
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => finsim::cli::setup::setup(),
        Some(cmd) => finsim::run_command(cmd.into(), cli.config_path.as_deref()),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
