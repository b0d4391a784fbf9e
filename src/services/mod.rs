//! Service layer for BudgetXP
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation and committing once per user action.

pub mod achievements;
pub mod badge;
pub mod budget;
pub mod category;
pub mod input;
pub mod transaction;

pub use achievements::AchievementsService;
pub use badge::BadgeService;
pub use budget::{BudgetService, BudgetUpdate};
pub use category::CategoryService;
pub use input::InputService;
pub use transaction::TransactionService;
