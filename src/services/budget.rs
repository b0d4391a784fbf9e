//! Budget service
//!
//! Creating, editing and deleting budgets. Every new budget is seeded with
//! the six starter badges; deleting one cascades to everything it owns.

use chrono::NaiveDate;
use tracing::info;

use crate::config::settings::Settings;
use crate::error::{BudgetXpError, BudgetXpResult};
use crate::models::{Badge, BadgeOwner, Budget, BudgetId, EmergencyFund, Money, StarterBadge};
use crate::storage::{CascadeReport, Storage};

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

/// Fields to change on an existing budget; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct BudgetUpdate {
    pub name: Option<String>,
    pub limit: Option<Money>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a budget and seed its starter badges
    pub fn create(
        &self,
        name: &str,
        limit: Money,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> BudgetXpResult<Budget> {
        let budget = Budget::new(name.trim(), limit, start_date, end_date);
        budget
            .validate()
            .map_err(|e| BudgetXpError::Validation(e.to_string()))?;

        let badges = StarterBadge::seed(BadgeOwner::Budget(budget.id));
        self.storage.insert_budget(budget.clone(), badges)?;
        self.storage.commit()?;

        info!(budget = %budget.id, name = %budget.name, "created budget");
        self.storage.require_budget(budget.id)
    }

    /// Create a budget from the settings defaults, starting `today`
    pub fn create_default(&self, today: NaiveDate, settings: &Settings) -> BudgetXpResult<Budget> {
        let end = Budget::end_after_months(today, settings.default_budget_months);
        self.create(
            &settings.default_budget_name,
            settings.default_budget_limit,
            today,
            end,
        )
    }

    pub fn get(&self, id: BudgetId) -> BudgetXpResult<Option<Budget>> {
        self.storage.budgets.get(id)
    }

    /// Find a budget by name (case-insensitive, oldest first) or by ID
    ///
    /// IDs are accepted in full or in the short form shown in listings.
    pub fn find(&self, identifier: &str) -> BudgetXpResult<Option<Budget>> {
        let identifier = identifier.trim();
        let budgets = self.storage.list_budgets()?;

        if let Some(budget) = budgets
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case(identifier))
        {
            return Ok(Some(budget.clone()));
        }

        if let Ok(id) = identifier.parse::<BudgetId>() {
            return self.storage.budgets.get(id);
        }

        Ok(budgets.into_iter().find(|b| b.id.to_string() == identifier))
    }

    /// Like [`find`](Self::find), but a miss is an error
    pub fn resolve(&self, identifier: &str) -> BudgetXpResult<Budget> {
        self.find(identifier)?
            .ok_or_else(|| BudgetXpError::budget_not_found(identifier))
    }

    /// All budgets, oldest first
    pub fn list(&self) -> BudgetXpResult<Vec<Budget>> {
        self.storage.list_budgets()
    }

    pub fn update(&self, id: BudgetId, update: BudgetUpdate) -> BudgetXpResult<Budget> {
        let mut budget = self.storage.require_budget(id)?;

        if let Some(name) = update.name {
            budget.name = name.trim().to_string();
        }
        if let Some(limit) = update.limit {
            budget.limit = limit;
        }
        if let Some(start) = update.start_date {
            budget.start_date = start;
        }
        if let Some(end) = update.end_date {
            budget.end_date = end;
        }

        budget
            .validate()
            .map_err(|e| BudgetXpError::Validation(e.to_string()))?;

        budget.touch();
        let updated = budget.clone();
        self.storage.update_budget(id, move |b| {
            b.name = budget.name;
            b.limit = budget.limit;
            b.start_date = budget.start_date;
            b.end_date = budget.end_date;
            b.updated_at = budget.updated_at;
        })?;
        self.storage.commit()?;

        info!(budget = %id, "updated budget");
        Ok(updated)
    }

    /// Delete a budget with its transactions, categories and badges
    pub fn delete(&self, id: BudgetId) -> BudgetXpResult<CascadeReport> {
        let report = self.storage.delete_budget_cascade(id)?;
        self.storage.commit()?;

        info!(
            budget = %id,
            transactions = report.transactions,
            categories = report.categories,
            badges = report.badges,
            "deleted budget"
        );
        Ok(report)
    }

    /// Overwrite the budget's XP
    pub fn set_xp(&self, id: BudgetId, xp: u32) -> BudgetXpResult<Budget> {
        let budget = self.storage.update_budget(id, |b| {
            b.xp = xp;
            b.touch();
            b.clone()
        })?;
        self.storage.commit()?;
        Ok(budget)
    }

    /// Change the budget's emergency-fund goal and/or progress
    pub fn set_emergency_fund(
        &self,
        id: BudgetId,
        goal: Option<Money>,
        progress: Option<Money>,
    ) -> BudgetXpResult<Budget> {
        let current = self.storage.require_budget(id)?.emergency_fund;
        let fund = EmergencyFund::new(
            goal.unwrap_or(current.goal),
            progress.unwrap_or(current.progress),
        );
        fund.validate()
            .map_err(|e| BudgetXpError::Validation(e.to_string()))?;

        let budget = self.storage.update_budget(id, |b| {
            b.emergency_fund = fund;
            b.touch();
            b.clone()
        })?;
        self.storage.commit()?;
        Ok(budget)
    }

    /// The budget's own badges in seeding order
    pub fn badges(&self, id: BudgetId) -> BudgetXpResult<Vec<Badge>> {
        let budget = self.storage.require_budget(id)?;
        self.storage.badges_for(&budget)
    }
}
