//! Transaction CLI commands

use clap::Subcommand;

use super::{parse_optional_date, today};
use crate::config::settings::Settings;
use crate::display::format_transaction_list;
use crate::error::{BudgetXpError, BudgetXpResult};
use crate::services::{BudgetService, InputService, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Log a transaction
    Add {
        /// Budget name or ID
        budget: String,
        /// Amount (e.g., "12.50"; positive is spending)
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category name
        category: String,
        /// Transaction date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
        /// Description
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// List a budget's transactions, newest first
    List {
        /// Budget name or ID
        budget: String,
        /// Number of transactions to show (default from settings)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Show every transaction
        #[arg(long, conflicts_with = "limit")]
        all: bool,
    },

    /// Delete a transaction
    Delete {
        /// Budget name or ID
        budget: String,
        /// Transaction ID
        transaction: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> BudgetXpResult<()> {
    let budgets = BudgetService::new(storage);
    let service = TransactionService::new(storage);

    match cmd {
        TransactionCommands::Add {
            budget,
            amount,
            category,
            date,
            description,
        } => {
            let budget = budgets.resolve(&budget)?;
            let date = parse_optional_date(date)?.unwrap_or_else(today);

            match InputService::new(storage).log_transaction(
                budget.id,
                &amount,
                date,
                &description,
                &category,
            )? {
                Some(txn) => {
                    println!(
                        "Logged {} to {} on {}",
                        settings.format_money(txn.amount),
                        txn.category,
                        txn.date.format(&settings.date_format)
                    );
                    println!("  ID: {}", txn.id);
                }
                None => {
                    println!("Nothing logged. A transaction needs a numeric amount and an existing category.");
                }
            }
        }

        TransactionCommands::List { budget, limit, all } => {
            let budget = budgets.resolve(&budget)?;
            let limit = if all {
                usize::MAX
            } else {
                limit.unwrap_or(settings.recent_transaction_count)
            };
            let transactions = service.recent(budget.id, limit)?;
            print!("{}", format_transaction_list(&transactions, settings));
        }

        TransactionCommands::Delete {
            budget,
            transaction,
        } => {
            let budget = budgets.resolve(&budget)?;
            let txn = service
                .find(budget.id, &transaction)?
                .ok_or_else(|| BudgetXpError::transaction_not_found(&transaction))?;
            service.delete(txn.id)?;
            println!("Deleted transaction {}", txn.id);
        }
    }

    Ok(())
}
