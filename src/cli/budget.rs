//! Budget CLI commands
//!
//! Creating, inspecting and editing budgets, plus the analytics view.

use clap::Subcommand;

use super::{parse_optional_date, parse_optional_money, today};
use crate::config::settings::Settings;
use crate::display::{format_budget_details, format_budget_list};
use crate::error::BudgetXpResult;
use crate::models::Budget;
use crate::reports::{AchievementsReport, SpendingReport};
use crate::services::{BudgetService, BudgetUpdate, TransactionService};
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create a budget (defaults come from settings)
    Create {
        /// Budget name
        name: Option<String>,
        /// Spending limit (e.g., "500" or "500.00")
        #[arg(short, long)]
        limit: Option<String>,
        /// Start date (YYYY-MM-DD, default today)
        #[arg(long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD, default one period after start)
        #[arg(long)]
        end: Option<String>,
    },

    /// List all budgets
    List,

    /// Show a budget with recent transactions and badges
    Show {
        /// Budget name or ID
        budget: String,
    },

    /// Edit a budget
    Edit {
        /// Budget name or ID
        budget: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New limit
        #[arg(short, long)]
        limit: Option<String>,
        /// New start date
        #[arg(long)]
        start: Option<String>,
        /// New end date
        #[arg(long)]
        end: Option<String>,
    },

    /// Delete a budget and everything it owns
    Delete {
        /// Budget name or ID
        budget: String,
    },

    /// Set the budget's emergency-fund goal or progress
    Fund {
        /// Budget name or ID
        budget: String,
        #[arg(short, long)]
        goal: Option<String>,
        #[arg(short, long)]
        progress: Option<String>,
    },

    /// Set the budget's XP
    Xp {
        /// Budget name or ID
        budget: String,
        xp: u32,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> BudgetXpResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        BudgetCommands::Create {
            name,
            limit,
            start,
            end,
        } => {
            let start = parse_optional_date(start)?.unwrap_or_else(today);
            let end = parse_optional_date(end)?
                .unwrap_or_else(|| Budget::end_after_months(start, settings.default_budget_months));
            let limit = parse_optional_money(limit)?.unwrap_or(settings.default_budget_limit);
            let name = name.unwrap_or_else(|| settings.default_budget_name.clone());

            let budget = service.create(&name, limit, start, end)?;

            println!("Created budget: {}", budget.name);
            println!("  Limit:  {}", settings.format_money(budget.limit));
            println!("  Period: {} to {}", budget.start_date, budget.end_date);
            println!("  ID:     {}", budget.id);
        }

        BudgetCommands::List => {
            let budgets = service.list()?;
            print!("{}", format_budget_list(&budgets, settings));
        }

        BudgetCommands::Show { budget } => {
            let budget = service.resolve(&budget)?;
            let recent = TransactionService::new(storage)
                .recent(budget.id, settings.recent_transaction_count)?;

            print!("{}", format_budget_details(&budget, &recent, settings));
            println!();
            print!(
                "{}",
                AchievementsReport::for_budget(storage, &budget)?
                    .format_terminal(&settings.currency_symbol)
            );
        }

        BudgetCommands::Edit {
            budget,
            name,
            limit,
            start,
            end,
        } => {
            let budget = service.resolve(&budget)?;
            let update = BudgetUpdate {
                name,
                limit: parse_optional_money(limit)?,
                start_date: parse_optional_date(start)?,
                end_date: parse_optional_date(end)?,
            };

            let updated = service.update(budget.id, update)?;
            println!("Updated budget: {}", updated.name);
        }

        BudgetCommands::Delete { budget } => {
            let budget = service.resolve(&budget)?;
            let report = service.delete(budget.id)?;

            println!("Deleted budget: {}", budget.name);
            println!(
                "  Removed {} transactions, {} categories, {} badges",
                report.transactions, report.categories, report.badges
            );
        }

        BudgetCommands::Fund {
            budget,
            goal,
            progress,
        } => {
            let budget = service.resolve(&budget)?;
            let updated = service.set_emergency_fund(
                budget.id,
                parse_optional_money(goal)?,
                parse_optional_money(progress)?,
            )?;

            let fund = updated.emergency_fund;
            println!(
                "Emergency fund for {}: {} of {} ({:.0}%)",
                updated.name,
                settings.format_money(fund.progress),
                settings.format_money(fund.goal),
                fund.ratio() * 100.0
            );
        }

        BudgetCommands::Xp { budget, xp } => {
            let budget = service.resolve(&budget)?;
            let updated = service.set_xp(budget.id, xp)?;
            println!("{}: {} XP, level {}", updated.name, updated.xp, updated.level());
        }
    }

    Ok(())
}

/// Print the spending analysis for a budget
pub fn handle_analytics_command(
    storage: &Storage,
    settings: &Settings,
    budget: &str,
) -> BudgetXpResult<()> {
    let budget = BudgetService::new(storage).resolve(budget)?;
    let report = SpendingReport::for_budget(storage, &budget)?;
    print!("{}", report.format_terminal(&settings.currency_symbol));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::parse_money;

    #[test]
    fn test_create_with_defaults_then_edit() {
        let storage = Storage::in_memory().unwrap();
        let settings = Settings::default();

        handle_budget_command(
            &storage,
            &settings,
            BudgetCommands::Create {
                name: None,
                limit: None,
                start: Some("2025-01-15".into()),
                end: None,
            },
        )
        .unwrap();

        let budget = BudgetService::new(&storage).resolve("New Budget").unwrap();
        assert_eq!(budget.limit, settings.default_budget_limit);
        assert_eq!(budget.end_date.to_string(), "2025-02-15");

        handle_budget_command(
            &storage,
            &settings,
            BudgetCommands::Edit {
                budget: "new budget".into(),
                name: Some("January".into()),
                limit: Some("650".into()),
                start: None,
                end: None,
            },
        )
        .unwrap();

        let budget = BudgetService::new(&storage).resolve("January").unwrap();
        assert_eq!(budget.limit, parse_money("650").unwrap());
    }

    #[test]
    fn test_unknown_budget_is_not_found() {
        let storage = Storage::in_memory().unwrap();
        let err = handle_analytics_command(&storage, &Settings::default(), "Nope").unwrap_err();
        assert!(err.is_not_found());
    }
}
