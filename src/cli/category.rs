//! Category CLI commands

use clap::Subcommand;

use super::parse_money;
use crate::config::settings::Settings;
use crate::display::format_category_list;
use crate::error::BudgetXpResult;
use crate::services::{BudgetService, CategoryService, InputService};
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Add a category allocation to a budget
    Add {
        /// Budget name or ID
        budget: String,
        /// Category name
        name: String,
        /// Allocated amount (e.g., "200" or "200.00")
        amount: String,
    },

    /// List a budget's categories
    List {
        /// Budget name or ID
        budget: String,
    },

    /// Rename a category (logged transactions keep the old name)
    Rename {
        /// Budget name or ID
        budget: String,
        /// Category name or ID
        category: String,
        /// New name
        new_name: String,
    },

    /// Change a category's allocated amount
    Amount {
        /// Budget name or ID
        budget: String,
        /// Category name or ID
        category: String,
        amount: String,
    },

    /// Delete a category
    Delete {
        /// Budget name or ID
        budget: String,
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CategoryCommands,
) -> BudgetXpResult<()> {
    let budgets = BudgetService::new(storage);
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::Add {
            budget,
            name,
            amount,
        } => {
            let budget = budgets.resolve(&budget)?;
            match InputService::new(storage).add_category(budget.id, &name, &amount)? {
                Some(category) => {
                    println!(
                        "Added category: {} ({})",
                        category.name,
                        settings.format_money(category.amount)
                    );
                }
                None => {
                    println!("Nothing added. A category needs a name and a non-negative amount.");
                }
            }
        }

        CategoryCommands::List { budget } => {
            let budget = budgets.resolve(&budget)?;
            let categories = service.list(budget.id)?;
            print!("{}", format_category_list(&categories, budget.limit, settings));
        }

        CategoryCommands::Rename {
            budget,
            category,
            new_name,
        } => {
            let budget = budgets.resolve(&budget)?;
            let category = service.resolve(budget.id, &category)?;
            let renamed = service.rename(category.id, &new_name)?;
            println!("Renamed category: {} -> {}", category.name, renamed.name);
        }

        CategoryCommands::Amount {
            budget,
            category,
            amount,
        } => {
            let budget = budgets.resolve(&budget)?;
            let category = service.resolve(budget.id, &category)?;
            let updated = service.set_amount(category.id, parse_money(&amount)?)?;
            println!(
                "{} now allocated {}",
                updated.name,
                settings.format_money(updated.amount)
            );
        }

        CategoryCommands::Delete { budget, category } => {
            let budget = budgets.resolve(&budget)?;
            let category = service.resolve(budget.id, &category)?;
            service.delete(category.id)?;
            println!("Deleted category: {}", category.name);
        }
    }

    Ok(())
}
