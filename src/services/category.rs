//! Category service
//!
//! Category allocations within a budget. Renaming or deleting a category
//! never touches the labels on transactions already logged against it.

use tracing::{debug, info};

use crate::error::{BudgetXpError, BudgetXpResult};
use crate::models::{BudgetCategory, BudgetId, CategoryId, Money};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a category allocation to a budget
    pub fn add(&self, budget_id: BudgetId, name: &str, amount: Money) -> BudgetXpResult<BudgetCategory> {
        let category = BudgetCategory::new(budget_id, name.trim(), amount);
        category
            .validate()
            .map_err(|e| BudgetXpError::Validation(e.to_string()))?;

        self.storage.attach_category(category.clone())?;
        self.storage.commit()?;

        info!(budget = %budget_id, category = %category.name, "added category");
        Ok(category)
    }

    pub fn get(&self, id: CategoryId) -> BudgetXpResult<Option<BudgetCategory>> {
        self.storage.categories.get(id)
    }

    /// A budget's categories in the order they were added
    pub fn list(&self, budget_id: BudgetId) -> BudgetXpResult<Vec<BudgetCategory>> {
        let budget = self.storage.require_budget(budget_id)?;
        self.storage.categories_for(&budget)
    }

    /// First category with exactly this name; duplicates are not an error
    pub fn find_by_name(&self, budget_id: BudgetId, name: &str) -> BudgetXpResult<Option<BudgetCategory>> {
        Ok(self
            .list(budget_id)?
            .into_iter()
            .find(|c| c.name == name))
    }

    /// Find by exact name, then by full or short ID
    pub fn find(&self, budget_id: BudgetId, identifier: &str) -> BudgetXpResult<Option<BudgetCategory>> {
        let categories = self.list(budget_id)?;

        if let Some(category) = categories.iter().find(|c| c.name == identifier) {
            return Ok(Some(category.clone()));
        }

        let by_id = identifier.parse::<CategoryId>().ok();
        Ok(categories
            .into_iter()
            .find(|c| Some(c.id) == by_id || c.id.to_string() == identifier))
    }

    pub fn resolve(&self, budget_id: BudgetId, identifier: &str) -> BudgetXpResult<BudgetCategory> {
        self.find(budget_id, identifier)?
            .ok_or_else(|| BudgetXpError::category_not_found(identifier))
    }

    /// Rename a category; existing transactions keep the old label
    pub fn rename(&self, id: CategoryId, name: &str) -> BudgetXpResult<BudgetCategory> {
        self.modify(id, |c| c.rename(name.trim()))
    }

    pub fn set_amount(&self, id: CategoryId, amount: Money) -> BudgetXpResult<BudgetCategory> {
        self.modify(id, |c| c.set_amount(amount))
    }

    fn modify(
        &self,
        id: CategoryId,
        f: impl FnOnce(&mut BudgetCategory),
    ) -> BudgetXpResult<BudgetCategory> {
        let mut category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| BudgetXpError::category_not_found(id.to_string()))?;

        f(&mut category);
        category
            .validate()
            .map_err(|e| BudgetXpError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.commit()?;

        debug!(category = %id, name = %category.name, amount = %category.amount, "updated category");
        Ok(category)
    }

    pub fn delete(&self, id: CategoryId) -> BudgetXpResult<BudgetCategory> {
        let category = self.storage.detach_category(id)?;
        self.storage.commit()?;

        info!(category = %id, name = %category.name, "deleted category");
        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Budget;
    use crate::reports::category_breakdown;
    use crate::services::TransactionService;
    use chrono::NaiveDate;

    fn setup() -> (Storage, Budget) {
        let storage = Storage::in_memory().unwrap();
        let budget = Budget::new(
            "Test",
            Money::from_units(800),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        );
        storage.insert_budget(budget.clone(), Vec::new()).unwrap();
        (storage, budget)
    }

    #[test]
    fn test_add_and_list_in_order() {
        let (storage, budget) = setup();
        let service = CategoryService::new(&storage);

        service.add(budget.id, "Rent", Money::from_units(400)).unwrap();
        service.add(budget.id, " Food ", Money::from_units(200)).unwrap();

        let names: Vec<String> = service
            .list(budget.id)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Rent", "Food"]);
    }

    #[test]
    fn test_add_rejects_invalid() {
        let (storage, budget) = setup();
        let service = CategoryService::new(&storage);

        assert!(service.add(budget.id, "  ", Money::zero()).unwrap_err().is_validation());
        assert!(service
            .add(budget.id, "Food", Money::from_units(-5))
            .unwrap_err()
            .is_validation());
        assert!(service
            .add(BudgetId::new(), "Food", Money::zero())
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_duplicate_names_first_match_wins() {
        let (storage, budget) = setup();
        let service = CategoryService::new(&storage);

        let first = service.add(budget.id, "Food", Money::from_units(10)).unwrap();
        service.add(budget.id, "Food", Money::from_units(20)).unwrap();

        let found = service.find_by_name(budget.id, "Food").unwrap().unwrap();
        assert_eq!(found.id, first.id);
    }

    #[test]
    fn test_find_by_short_id() {
        let (storage, budget) = setup();
        let service = CategoryService::new(&storage);
        let rent = service.add(budget.id, "Rent", Money::zero()).unwrap();

        let found = service.find(budget.id, &rent.id.to_string()).unwrap().unwrap();
        assert_eq!(found.id, rent.id);
        assert!(service.resolve(budget.id, "Nope").unwrap_err().is_not_found());
    }

    #[test]
    fn test_rename_keeps_old_transaction_labels() {
        let (storage, budget) = setup();
        let categories = CategoryService::new(&storage);
        let transactions = TransactionService::new(&storage);
        let day = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();

        let food = categories.add(budget.id, "Food", Money::from_units(200)).unwrap();
        transactions
            .log(budget.id, Money::from_units(50), day, "", "Food")
            .unwrap();

        categories.rename(food.id, "Groceries").unwrap();
        transactions
            .log(budget.id, Money::from_units(30), day, "", "Groceries")
            .unwrap();

        let logged = transactions.list(budget.id).unwrap();
        assert_eq!(logged[0].category, "Food");

        let breakdown = category_breakdown(&logged);
        assert_eq!(breakdown["Food"], Money::from_units(50));
        assert_eq!(breakdown["Groceries"], Money::from_units(30));
    }

    #[test]
    fn test_set_amount_and_delete() {
        let (storage, budget) = setup();
        let service = CategoryService::new(&storage);
        let food = service.add(budget.id, "Food", Money::from_units(200)).unwrap();

        let updated = service.set_amount(food.id, Money::from_units(250)).unwrap();
        assert_eq!(updated.amount, Money::from_units(250));
        assert!(service
            .set_amount(food.id, Money::from_units(-1))
            .unwrap_err()
            .is_validation());

        service.delete(food.id).unwrap();
        assert!(service.list(budget.id).unwrap().is_empty());
        assert!(storage.require_budget(budget.id).unwrap().category_ids.is_empty());
        assert!(service.delete(food.id).unwrap_err().is_not_found());
    }
}
