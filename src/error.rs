//! Custom error types for BudgetXP
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for BudgetXP operations
#[derive(Error, Debug)]
pub enum BudgetXpError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors that do not concern opening the store
    #[error("Storage error: {0}")]
    Storage(String),

    /// The persisted store was written with a different schema
    #[error("Store schema mismatch: found version {found}, expected {expected}")]
    SchemaMismatch { found: u32, expected: u32 },

    /// The persisted store could not be parsed or violates its ownership graph
    #[error("Store is corrupt: {0}")]
    Corrupt(String),

    /// The store could not be opened even after a destructive reset
    #[error("Store could not be opened after reset: {0}")]
    StoreUnrecoverable(String),
}

impl BudgetXpError {
    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for badges
    pub fn badge_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Badge",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// The process cannot continue without a working store
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::StoreUnrecoverable(_))
    }
}

impl From<std::io::Error> for BudgetXpError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetXpError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for BudgetXP operations
pub type BudgetXpResult<T> = Result<T, BudgetXpError>;
