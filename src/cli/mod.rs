//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod achievements;
pub mod badge;
pub mod budget;
pub mod category;
pub mod transaction;

pub use achievements::{handle_achievements_command, AchievementsCommands};
pub use badge::{handle_badge_command, BadgeCommands};
pub use budget::{handle_analytics_command, handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;

use crate::error::{BudgetXpError, BudgetXpResult};
use crate::models::Money;

/// Parse a YYYY-MM-DD argument
pub(crate) fn parse_date(value: &str) -> BudgetXpResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        BudgetXpError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD format", value))
    })
}

pub(crate) fn parse_optional_date(value: Option<String>) -> BudgetXpResult<Option<NaiveDate>> {
    value.as_deref().map(parse_date).transpose()
}

/// Parse an amount argument, rejecting anything that is not a number
pub(crate) fn parse_money(value: &str) -> BudgetXpResult<Money> {
    Money::parse(value).map_err(|e| BudgetXpError::Validation(format!("Invalid amount: {}", e)))
}

pub(crate) fn parse_optional_money(value: Option<String>) -> BudgetXpResult<Option<Money>> {
    value.as_deref().map(parse_money).transpose()
}

pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
