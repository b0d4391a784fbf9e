//! Budget model
//!
//! A budget is the owning parent of its transactions, categories and
//! badges. Children live in flat storage tables; the budget keeps their IDs
//! in insertion order so cascade deletion is an explicit walk over these
//! lists.

use chrono::{DateTime, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::emergency_fund::EmergencyFund;
use super::ids::{BadgeId, BudgetId, CategoryId, TransactionId};
use super::money::Money;
use crate::gamification;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,

    pub name: String,

    /// Spending limit for the whole period
    pub limit: Money,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    #[serde(default)]
    pub xp: u32,

    #[serde(default)]
    pub emergency_fund: EmergencyFund,

    #[serde(default)]
    pub transaction_ids: Vec<TransactionId>,

    #[serde(default)]
    pub category_ids: Vec<CategoryId>,

    #[serde(default)]
    pub badge_ids: Vec<BadgeId>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Budget {
    pub fn new(
        name: impl Into<String>,
        limit: Money,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            name: name.into(),
            limit,
            start_date,
            end_date,
            xp: 0,
            emergency_fund: EmergencyFund::default(),
            transaction_ids: Vec::new(),
            category_ids: Vec::new(),
            badge_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Period running `months` calendar months from `start_date`
    pub fn end_after_months(start_date: NaiveDate, months: u32) -> NaiveDate {
        start_date
            .checked_add_months(Months::new(months))
            .unwrap_or(start_date)
    }

    /// Derived from XP on every call, never stored
    pub fn level(&self) -> u32 {
        gamification::level(self.xp)
    }

    /// Whether `date` falls inside the budget period (inclusive)
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.name.trim().is_empty() {
            return Err(BudgetValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(BudgetValidationError::NameTooLong(self.name.len()));
        }

        if self.limit.is_negative() {
            return Err(BudgetValidationError::NegativeLimit);
        }

        if self.limit.is_out_of_range() {
            return Err(BudgetValidationError::LimitTooLarge);
        }

        if self.end_date < self.start_date {
            return Err(BudgetValidationError::EndBeforeStart {
                start: self.start_date,
                end: self.end_date,
            });
        }

        self.emergency_fund
            .validate()
            .map_err(|e| BudgetValidationError::EmergencyFund(e.to_string()))
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    EmptyName,
    NameTooLong(usize),
    NegativeLimit,
    LimitTooLarge,
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    EmergencyFund(String),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Budget name cannot be empty"),
            Self::NameTooLong(len) => write!(f, "Budget name too long ({} chars, max 100)", len),
            Self::NegativeLimit => write!(f, "Budget limit cannot be negative"),
            Self::LimitTooLarge => write!(f, "Budget limit cannot exceed {}", Money::MAX),
            Self::EndBeforeStart { start, end } => {
                write!(f, "Budget end date {} is before start date {}", end, start)
            }
            Self::EmergencyFund(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
