use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use budget_xp::cli::{
    handle_achievements_command, handle_analytics_command, handle_badge_command,
    handle_budget_command, handle_category_command, handle_transaction_command,
};
use budget_xp::config::{paths::BudgetXpPaths, settings::Settings};
use budget_xp::logging::init_tracing;
use budget_xp::storage::{open_store, OpenOutcome};

#[derive(Parser)]
#[command(
    name = "budgetxp",
    version,
    about = "Gamified personal budgeting",
    long_about = "BudgetXP tracks budgets, category allocations and spending, \
                  and turns that activity into XP, levels, badges and an \
                  emergency-fund goal."
)]
struct Cli {
    /// Data directory (overrides the default location)
    #[arg(long, global = true, env = "BUDGET_XP_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and settings file
    Init,

    /// Show current configuration and paths
    Config,

    /// Budget management commands
    #[command(subcommand)]
    Budget(budget_xp::cli::BudgetCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(budget_xp::cli::CategoryCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(budget_xp::cli::TransactionCommands),

    /// Spending analysis for a budget
    Analytics {
        /// Budget name or ID
        budget: String,
    },

    /// Global XP, emergency fund and badges
    #[command(subcommand)]
    Achievements(budget_xp::cli::AchievementsCommands),

    /// Badge progress hooks
    #[command(subcommand)]
    Badge(budget_xp::cli::BadgeCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => BudgetXpPaths::with_base_dir(dir),
        None => BudgetXpPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings.log_filter);

    let (storage, outcome) = open_store(&paths)?;
    if let OpenOutcome::Recovered { reason } = &outcome {
        eprintln!("Warning: the data store could not be opened and was reset.");
        eprintln!("  Reason: {}", reason);
        eprintln!("  Previous budgets, transactions and achievements were discarded.");
    }
    let achievements = storage.ensure_achievements()?;

    match cli.command {
        Some(Commands::Init) => {
            settings.save(&paths)?;
            println!("Initialized BudgetXP at: {}", paths.base_dir().display());
            println!();
            println!("Run 'budgetxp budget create' to start your first budget.");
        }
        Some(Commands::Config) => {
            println!("BudgetXP Configuration");
            println!("======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Store:          {}", storage.describe());
            println!();
            println!("Settings:");
            println!("  Currency symbol:      {}", settings.currency_symbol);
            println!("  Date format:          {}", settings.date_format);
            println!(
                "  New budget defaults:  {} / {} / {} month(s)",
                settings.default_budget_name,
                settings.format_money(settings.default_budget_limit),
                settings.default_budget_months
            );
            println!("  Recent transactions:  {}", settings.recent_transaction_count);
            println!("  Log filter:           {}", settings.log_filter);
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Analytics { budget }) => {
            handle_analytics_command(&storage, &settings, &budget)?;
        }
        Some(Commands::Achievements(cmd)) => {
            handle_achievements_command(&storage, &settings, achievements, cmd)?;
        }
        Some(Commands::Badge(cmd)) => {
            handle_badge_command(&storage, achievements, cmd)?;
        }
        None => {
            println!("BudgetXP - gamified personal budgeting");
            println!();
            println!("Run 'budgetxp --help' for usage information.");
        }
    }

    Ok(())
}
