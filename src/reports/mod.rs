//! Reports module for BudgetXP
//!
//! Spending analytics per budget and the achievements read model.

pub mod achievements;
pub mod spending;

pub use achievements::{AchievementsReport, BadgeProgress};
pub use spending::{
    adjusted_categories, allocated_total, category_breakdown, SpendingReport, SpendingRow,
};
