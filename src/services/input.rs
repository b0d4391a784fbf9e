//! Raw form input
//!
//! Entry points for text typed into a form. Unparsable numbers, empty
//! required fields, unknown category names and values the model rejects
//! are silent no-ops: the result is `Ok(None)` and nothing is stored, so
//! the caller can simply prompt again. Missing parents and storage failures
//! are still errors.

use chrono::NaiveDate;
use tracing::debug;

use super::{CategoryService, TransactionService};
use crate::error::BudgetXpResult;
use crate::models::{BudgetCategory, BudgetId, Money, Transaction};
use crate::storage::Storage;

pub struct InputService<'a> {
    storage: &'a Storage,
}

impl<'a> InputService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a category from a name field and an amount field
    pub fn add_category(
        &self,
        budget_id: BudgetId,
        name: &str,
        amount: &str,
    ) -> BudgetXpResult<Option<BudgetCategory>> {
        if name.trim().is_empty() {
            debug!("ignored category input: empty name");
            return Ok(None);
        }
        let Some(amount) = parse_amount(amount) else {
            return Ok(None);
        };

        ignore_invalid(CategoryService::new(self.storage).add(budget_id, name, amount))
    }

    /// Log a transaction from an amount field and a category picked by name
    ///
    /// The category must be one of the budget's current categories (first
    /// match wins); its name is copied onto the transaction.
    pub fn log_transaction(
        &self,
        budget_id: BudgetId,
        amount: &str,
        date: NaiveDate,
        description: &str,
        category: &str,
    ) -> BudgetXpResult<Option<Transaction>> {
        if category.trim().is_empty() {
            debug!("ignored transaction input: empty category");
            return Ok(None);
        }
        let Some(amount) = parse_amount(amount) else {
            return Ok(None);
        };
        let categories = CategoryService::new(self.storage);
        let Some(picked) = categories.find_by_name(budget_id, category.trim())? else {
            debug!(category, "ignored transaction input: unknown category");
            return Ok(None);
        };

        ignore_invalid(TransactionService::new(self.storage).log(
            budget_id,
            amount,
            date,
            description,
            &picked.name,
        ))
    }
}

/// Parse an amount field, `None` for anything that is not a number
pub fn parse_amount(raw: &str) -> Option<Money> {
    match Money::parse(raw) {
        Ok(amount) => Some(amount),
        Err(e) => {
            debug!(input = raw, error = %e, "ignored amount input");
            None
        }
    }
}

fn ignore_invalid<T>(result: BudgetXpResult<T>) -> BudgetXpResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_validation() => {
            debug!(error = %e, "ignored invalid input");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
