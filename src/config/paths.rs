//! Path management for BudgetXP
//!
//! ## Path Resolution Order
//!
//! 1. `BUDGET_XP_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/budget-xp` or `~/.config/budget-xp`
//! 3. Windows: `%APPDATA%\budget-xp`

use std::path::PathBuf;

use crate::error::BudgetXpError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "BUDGET_XP_DATA_DIR";

#[derive(Debug, Clone)]
pub struct BudgetXpPaths {
    base_dir: PathBuf,
}

impl BudgetXpPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home or application-data directory can be found.
    pub fn new() -> Result<Self, BudgetXpError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Use an explicit base directory (tests, `--data-dir`)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// The entity store document
    pub fn store_file(&self) -> PathBuf {
        self.data_dir().join("store.json")
    }

    pub fn ensure_directories(&self) -> Result<(), BudgetXpError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BudgetXpError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| BudgetXpError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, BudgetXpError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                BudgetXpError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("budget-xp"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, BudgetXpError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| BudgetXpError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("budget-xp"))
}
