//! Transaction model
//!
//! A transaction belongs to exactly one budget. Its `category` is a copy of
//! the category name taken when the transaction was logged, not a reference:
//! renaming or deleting the category later leaves this label untouched.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, TransactionId};
use super::money::Money;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    /// Owning budget
    pub budget_id: BudgetId,

    /// Positive amounts are spending; the sign is not validated
    pub amount: Money,

    pub date: NaiveDate,

    #[serde(default)]
    pub description: String,

    /// Category name snapshot
    pub category: String,

    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        budget_id: BudgetId,
        amount: Money,
        date: NaiveDate,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            budget_id,
            amount,
            date,
            description: description.into(),
            category: category.into(),
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.category.trim().is_empty() {
            return Err(TransactionValidationError::EmptyCategory);
        }
        if self.amount.is_out_of_range() {
            return Err(TransactionValidationError::AmountTooLarge);
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} · {}", self.date, self.amount, self.category)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyCategory,
    AmountTooLarge,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCategory => write!(f, "Transaction category cannot be empty"),
            Self::AmountTooLarge => write!(f, "Transaction amount cannot exceed {}", Money::MAX),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
