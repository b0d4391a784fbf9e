//! Core data models for BudgetXP
//!
//! The persisted entities (budgets, transactions, categories, badges and the
//! global achievements record) plus the value types they share.

pub mod achievements;
pub mod badge;
pub mod budget;
pub mod category;
pub mod emergency_fund;
pub mod ids;
pub mod money;
pub mod transaction;

pub use achievements::{AchievementsHandle, AchievementsStore};
pub use badge::{Badge, BadgeOwner, StarterBadge};
pub use budget::Budget;
pub use category::{BudgetCategory, MISCELLANEOUS_CATEGORY};
pub use emergency_fund::EmergencyFund;
pub use ids::{AchievementsId, BadgeId, BudgetId, CategoryId, TransactionId};
pub use money::Money;
pub use transaction::Transaction;
