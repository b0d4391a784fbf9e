//! BudgetXP - gamified personal budgeting
//!
//! Budgets with category allocations, transactions logged against them, and
//! XP, levels, badges and an emergency-fund tracker derived from that
//! activity.
//!
//! # Architecture
//!
//! - `models`: Entities and value types
//! - `storage`: Entity tables, the persisted store and its open/reset lifecycle
//! - `services`: Create, update and delete operations, one commit per action
//! - `reports`: Spending analytics and the achievements read model
//! - `gamification`: XP to level and badge progress
//! - `config`: Paths and settings
//! - `cli` / `display`: Command-line presentation
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_xp::config::{paths::BudgetXpPaths, settings::Settings};
//! use budget_xp::storage::open_store;
//!
//! let paths = BudgetXpPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let (storage, outcome) = open_store(&paths)?;
//! let achievements = storage.ensure_achievements()?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod gamification;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{BudgetXpError, BudgetXpResult};
