//! User settings for BudgetXP
//!
//! Display preferences and the defaults used when a budget is created
//! without explicit values.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::paths::BudgetXpPaths;
use crate::error::BudgetXpError;
use crate::models::Money;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// strftime format for dates in output
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default = "default_budget_name")]
    pub default_budget_name: String,

    #[serde(default = "default_budget_limit")]
    pub default_budget_limit: Money,

    /// Length of a new budget's period
    #[serde(default = "default_budget_months")]
    pub default_budget_months: u32,

    /// How many transactions "recent" lists show
    #[serde(default = "default_recent_transaction_count")]
    pub recent_transaction_count: usize,

    /// Default tracing directive; `RUST_LOG` takes precedence
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_budget_name() -> String {
    "New Budget".to_string()
}

fn default_budget_limit() -> Money {
    Money::from_units(500)
}

fn default_budget_months() -> u32 {
    1
}

fn default_recent_transaction_count() -> usize {
    5
}

fn default_log_filter() -> String {
    "budget_xp=info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_budget_name: default_budget_name(),
            default_budget_limit: default_budget_limit(),
            default_budget_months: default_budget_months(),
            recent_transaction_count: default_recent_transaction_count(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &BudgetXpPaths) -> Result<Self, BudgetXpError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not persisted until the caller saves
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| BudgetXpError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| BudgetXpError::Config(format!("Failed to parse settings file: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would fail later at display or creation time
    pub fn validate(&self) -> Result<(), BudgetXpError> {
        let items = StrftimeItems::new(&self.date_format);
        let parses = !items.clone().any(|item| matches!(item, Item::Error));
        // Time-of-day specifiers parse but cannot be rendered from a date
        let mut rendered = String::new();
        if !parses || write!(rendered, "{}", NaiveDate::MIN.format_with_items(items)).is_err() {
            return Err(BudgetXpError::Config(format!(
                "Invalid date format in settings: {:?}",
                self.date_format
            )));
        }

        if self.default_budget_limit.is_negative() || self.default_budget_limit.is_out_of_range() {
            return Err(BudgetXpError::Config(format!(
                "Default budget limit must be between 0 and {}",
                Money::MAX
            )));
        }

        Ok(())
    }

    pub fn save(&self, paths: &BudgetXpPaths) -> Result<(), BudgetXpError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BudgetXpError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BudgetXpError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.default_budget_name, "New Budget");
        assert_eq!(settings.default_budget_limit, Money::from_units(500));
        assert_eq!(settings.default_budget_months, 1);
        assert_eq!(settings.recent_transaction_count, 5);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetXpPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings.currency_symbol, "$");
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetXpPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "€".into();
        settings.default_budget_limit = Money::from_units(750);
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.default_budget_limit, Money::from_units(750));
        assert_eq!(loaded.format_money(Money::from_cents(1234)), "€12.34");
    }

    #[test]
    fn test_partial_file_uses_field_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetXpPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"currency_symbol": "£"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "£");
        assert_eq!(loaded.recent_transaction_count, 5);
    }

    #[test]
    fn test_invalid_date_format_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetXpPaths::with_base_dir(temp_dir.path().to_path_buf());

        for format in ["%Q", "%Y-%", "%H:%M"] {
            std::fs::write(
                paths.settings_file(),
                format!(r#"{{"date_format": "{}"}}"#, format),
            )
            .unwrap();
            assert!(
                matches!(Settings::load_or_create(&paths), Err(BudgetXpError::Config(_))),
                "format {} should be rejected",
                format
            );
        }

        std::fs::write(paths.settings_file(), r#"{"date_format": "%d/%m/%Y"}"#).unwrap();
        assert_eq!(Settings::load_or_create(&paths).unwrap().date_format, "%d/%m/%Y");
    }

    #[test]
    fn test_oversized_default_limit_is_config_error() {
        let mut settings = Settings::default();
        assert!(settings.validate().is_ok());
        settings.default_budget_limit = Money::from_cents(i64::MAX);
        assert!(matches!(settings.validate(), Err(BudgetXpError::Config(_))));
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetXpPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "nope").unwrap();

        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(BudgetXpError::Config(_))
        ));
    }
}
