//! Configuration module for BudgetXP
//!
//! - Data directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::BudgetXpPaths;
pub use settings::Settings;
