//! Budget category model
//!
//! A category is a named allocation of part of a budget's limit. Names are
//! not required to be unique; lookups by name take the first match in the
//! budget's insertion order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId};
use super::money::Money;

/// Name of the synthetic category covering an unallocated limit
pub const MISCELLANEOUS_CATEGORY: &str = "Miscellaneous";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub id: CategoryId,

    /// Owning budget
    pub budget_id: BudgetId,

    pub name: String,

    /// Amount of the budget limit allocated to this category
    pub amount: Money,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl BudgetCategory {
    pub fn new(budget_id: BudgetId, name: impl Into<String>, amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            budget_id,
            name: name.into(),
            amount,
            created_at: now,
            updated_at: now,
        }
    }

    /// The computed remainder category; never stored
    pub fn miscellaneous(budget_id: BudgetId, amount: Money) -> Self {
        Self::new(budget_id, MISCELLANEOUS_CATEGORY, amount)
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    pub fn set_amount(&mut self, amount: Money) {
        self.amount = amount;
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        if self.amount.is_negative() {
            return Err(CategoryValidationError::NegativeAmount);
        }

        if self.amount.is_out_of_range() {
            return Err(CategoryValidationError::AmountTooLarge);
        }

        Ok(())
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    NegativeAmount,
    AmountTooLarge,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::NegativeAmount => write!(f, "Category amount cannot be negative"),
            Self::AmountTooLarge => write!(f, "Category amount cannot exceed {}", Money::MAX),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let budget_id = BudgetId::new();
        let category = BudgetCategory::new(budget_id, "Rent", Money::from_units(400));

        assert_eq!(category.name, "Rent");
        assert_eq!(category.budget_id, budget_id);
        assert!(category.validate().is_ok());
    }

    #[test]
    fn test_miscellaneous_gets_fresh_id() {
        let budget_id = BudgetId::new();
        let a = BudgetCategory::miscellaneous(budget_id, Money::from_units(1));
        let b = BudgetCategory::miscellaneous(budget_id, Money::from_units(1));
        assert_eq!(a.name, MISCELLANEOUS_CATEGORY);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_rename_keeps_id() {
        let mut category = BudgetCategory::new(BudgetId::new(), "Food", Money::zero());
        let id = category.id;
        category.rename("Groceries");
        assert_eq!(category.id, id);
        assert_eq!(category.name, "Groceries");
    }

    #[test]
    fn test_validation() {
        let mut category = BudgetCategory::new(BudgetId::new(), "Valid", Money::zero());
        assert!(category.validate().is_ok());

        category.name = String::new();
        assert_eq!(category.validate(), Err(CategoryValidationError::EmptyName));

        category.name = "a".repeat(51);
        assert!(matches!(
            category.validate(),
            Err(CategoryValidationError::NameTooLong(51))
        ));

        category.name = "Valid".into();
        category.amount = Money::from_cents(-100);
        assert_eq!(
            category.validate(),
            Err(CategoryValidationError::NegativeAmount)
        );

        category.amount = Money::MAX + Money::from_cents(1);
        assert_eq!(
            category.validate(),
            Err(CategoryValidationError::AmountTooLarge)
        );
    }
}
