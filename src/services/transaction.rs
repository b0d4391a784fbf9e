//! Transaction service
//!
//! Logging and removing transactions. Transactions are never edited in
//! place.

use chrono::NaiveDate;
use tracing::info;

use crate::error::{BudgetXpError, BudgetXpResult};
use crate::models::{BudgetId, Money, Transaction, TransactionId};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Log a transaction against a budget
    ///
    /// `category` is copied onto the transaction as-is; it does not have to
    /// name an existing category.
    pub fn log(
        &self,
        budget_id: BudgetId,
        amount: Money,
        date: NaiveDate,
        description: &str,
        category: &str,
    ) -> BudgetXpResult<Transaction> {
        let txn = Transaction::new(budget_id, amount, date, description.trim(), category.trim());
        txn.validate()
            .map_err(|e| BudgetXpError::Validation(e.to_string()))?;

        self.storage.attach_transaction(txn.clone())?;
        self.storage.commit()?;

        info!(budget = %budget_id, txn = %txn.id, amount = %txn.amount, "logged transaction");
        Ok(txn)
    }

    pub fn get(&self, id: TransactionId) -> BudgetXpResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// A budget's transactions in the order they were logged
    pub fn list(&self, budget_id: BudgetId) -> BudgetXpResult<Vec<Transaction>> {
        let budget = self.storage.require_budget(budget_id)?;
        self.storage.transactions_for(&budget)
    }

    /// Newest first by date, then by logging time
    pub fn recent(&self, budget_id: BudgetId, limit: usize) -> BudgetXpResult<Vec<Transaction>> {
        let mut transactions = self.list(budget_id)?;
        transactions.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then(b.created_at.cmp(&a.created_at))
        });
        transactions.truncate(limit);
        Ok(transactions)
    }

    /// Find one of a budget's transactions by full or short ID
    pub fn find(&self, budget_id: BudgetId, identifier: &str) -> BudgetXpResult<Option<Transaction>> {
        let by_id = identifier.trim().parse::<TransactionId>().ok();
        Ok(self
            .list(budget_id)?
            .into_iter()
            .find(|t| Some(t.id) == by_id || t.id.to_string() == identifier.trim()))
    }

    pub fn delete(&self, id: TransactionId) -> BudgetXpResult<Transaction> {
        let txn = self.storage.detach_transaction(id)?;
        self.storage.commit()?;

        info!(txn = %id, "deleted transaction");
        Ok(txn)
    }
}
