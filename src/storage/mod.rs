//! Storage layer for BudgetXP
//!
//! Entities live in flat in-memory tables while the process runs and are
//! written back as one JSON document on every commit. Cascade deletion walks
//! the child ID lists held by the parent.
//!
//! Services mutate the tables first and commit afterwards. When a commit
//! fails the tables are reloaded from the backend, so memory never stays
//! ahead of what was last persisted.

pub mod backend;
pub mod file_io;
pub mod init;
pub mod snapshot;
pub mod table;

pub use backend::{JsonFileBackend, MemoryBackend, StoreBackend};
pub use init::{open_store, open_with_recovery, OpenOutcome};
pub use snapshot::{StoreSnapshot, STORE_SCHEMA_VERSION};
pub use table::{Keyed, Table};

use std::sync::RwLock;

use tracing::{debug, info, warn};

use crate::error::{BudgetXpError, BudgetXpResult};
use crate::models::{
    AchievementsHandle, AchievementsStore, Badge, BadgeId, BadgeOwner, Budget, BudgetCategory,
    BudgetId, CategoryId, StarterBadge, Transaction, TransactionId,
};

/// What a cascading budget delete removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeReport {
    pub transactions: usize,
    pub categories: usize,
    pub badges: usize,
}

/// Main storage coordinator that owns every entity table
pub struct Storage {
    backend: Box<dyn StoreBackend>,
    pub budgets: Table<Budget>,
    pub transactions: Table<Transaction>,
    pub categories: Table<BudgetCategory>,
    pub badges: Table<Badge>,
    achievements: RwLock<Option<AchievementsStore>>,
}

impl Storage {
    pub(crate) fn from_snapshot(
        backend: Box<dyn StoreBackend>,
        snapshot: StoreSnapshot,
    ) -> BudgetXpResult<Self> {
        let storage = Self {
            backend,
            budgets: Table::new(),
            transactions: Table::new(),
            categories: Table::new(),
            badges: Table::new(),
            achievements: RwLock::new(None),
        };
        storage.restore(snapshot)?;
        Ok(storage)
    }

    fn restore(&self, snapshot: StoreSnapshot) -> BudgetXpResult<()> {
        self.budgets.replace_all(snapshot.budgets)?;
        self.transactions.replace_all(snapshot.transactions)?;
        self.categories.replace_all(snapshot.categories)?;
        self.badges.replace_all(snapshot.badges)?;

        let mut slot = self
            .achievements
            .write()
            .map_err(|e| BudgetXpError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *slot = snapshot.achievements;
        Ok(())
    }

    /// A fresh, empty store that is never written to disk
    pub fn in_memory() -> BudgetXpResult<Self> {
        let (storage, _) = open_with_recovery(Box::new(MemoryBackend::new()))?;
        Ok(storage)
    }

    pub fn describe(&self) -> String {
        self.backend.describe()
    }

    /// Current state as a persistable document
    pub fn snapshot(&self) -> BudgetXpResult<StoreSnapshot> {
        let mut budgets = self.budgets.all()?;
        budgets.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let mut transactions = self.transactions.all()?;
        transactions.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });

        let mut categories = self.categories.all()?;
        categories.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let mut badges = self.badges.all()?;
        badges.sort_by_key(|b| b.id);

        Ok(StoreSnapshot {
            schema_version: STORE_SCHEMA_VERSION,
            budgets,
            transactions,
            categories,
            badges,
            achievements: self.read_achievements()?.clone(),
        })
    }

    /// Persist everything; one call per user action
    ///
    /// On failure the uncommitted changes are discarded by reloading the
    /// last persisted snapshot, and the save error is returned.
    pub fn commit(&self) -> BudgetXpResult<()> {
        let snapshot = self.snapshot()?;
        if let Err(e) = self.backend.save(&snapshot) {
            match self.backend.load().and_then(|persisted| self.restore(persisted)) {
                Ok(()) => warn!(error = %e, "commit failed; reverted to the last saved state"),
                Err(reload) => warn!(
                    error = %e,
                    reload_error = %reload,
                    "commit failed and the saved state could not be reloaded"
                ),
            }
            return Err(e);
        }
        debug!(
            budgets = snapshot.budgets.len(),
            transactions = snapshot.transactions.len(),
            "committed store"
        );
        Ok(())
    }

    /// Re-run the load-time ownership checks against the live tables
    pub fn verify_integrity(&self) -> BudgetXpResult<()> {
        self.snapshot()?.verify()
    }

    // Budgets

    pub fn require_budget(&self, id: BudgetId) -> BudgetXpResult<Budget> {
        self.budgets
            .get(id)?
            .ok_or_else(|| BudgetXpError::budget_not_found(id.to_string()))
    }

    /// All budgets, oldest first
    pub fn list_budgets(&self) -> BudgetXpResult<Vec<Budget>> {
        let mut budgets = self.budgets.all()?;
        budgets.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(budgets)
    }

    /// Insert a new budget together with its seeded badges
    pub fn insert_budget(&self, mut budget: Budget, badges: Vec<Badge>) -> BudgetXpResult<()> {
        let owner = BadgeOwner::Budget(budget.id);
        if let Some(stray) = badges.iter().find(|b| b.owner != owner) {
            return Err(BudgetXpError::Storage(format!(
                "badge '{}' is owned by {}, not budget {}",
                stray.name, stray.owner, budget.id
            )));
        }

        budget.badge_ids.extend(badges.iter().map(|b| b.id));
        for badge in badges {
            self.badges.upsert(badge)?;
        }
        self.budgets.upsert(budget)
    }

    pub fn update_budget<R>(
        &self,
        id: BudgetId,
        f: impl FnOnce(&mut Budget) -> R,
    ) -> BudgetXpResult<R> {
        self.budgets
            .update(id, f)?
            .ok_or_else(|| BudgetXpError::budget_not_found(id.to_string()))
    }

    /// Delete a budget and every transaction, category and badge it owns
    pub fn delete_budget_cascade(&self, id: BudgetId) -> BudgetXpResult<CascadeReport> {
        let budget = self
            .budgets
            .remove(id)?
            .ok_or_else(|| BudgetXpError::budget_not_found(id.to_string()))?;

        let report = CascadeReport {
            transactions: self.transactions.remove_many(&budget.transaction_ids)?,
            categories: self.categories.remove_many(&budget.category_ids)?,
            badges: self.badges.remove_many(&budget.badge_ids)?,
        };

        debug!(budget = %budget.id, ?report, "cascade delete");
        Ok(report)
    }

    // Children

    pub fn attach_transaction(&self, txn: Transaction) -> BudgetXpResult<()> {
        let id = txn.id;
        self.update_budget(txn.budget_id, |b| {
            b.transaction_ids.push(id);
            b.touch();
        })?;
        self.transactions.upsert(txn)
    }

    pub fn detach_transaction(&self, id: TransactionId) -> BudgetXpResult<Transaction> {
        let txn = self
            .transactions
            .remove(id)?
            .ok_or_else(|| BudgetXpError::transaction_not_found(id.to_string()))?;
        self.update_budget(txn.budget_id, |b| b.transaction_ids.retain(|t| *t != id))?;
        Ok(txn)
    }

    pub fn attach_category(&self, category: BudgetCategory) -> BudgetXpResult<()> {
        let id = category.id;
        self.update_budget(category.budget_id, |b| {
            b.category_ids.push(id);
            b.touch();
        })?;
        self.categories.upsert(category)
    }

    pub fn detach_category(&self, id: CategoryId) -> BudgetXpResult<BudgetCategory> {
        let category = self
            .categories
            .remove(id)?
            .ok_or_else(|| BudgetXpError::category_not_found(id.to_string()))?;
        self.update_budget(category.budget_id, |b| b.category_ids.retain(|c| *c != id))?;
        Ok(category)
    }

    pub fn require_badge(&self, id: BadgeId) -> BudgetXpResult<Badge> {
        self.badges
            .get(id)?
            .ok_or_else(|| BudgetXpError::badge_not_found(id.to_string()))
    }

    /// A budget's transactions in the order they were logged
    pub fn transactions_for(&self, budget: &Budget) -> BudgetXpResult<Vec<Transaction>> {
        self.transactions.get_many(&budget.transaction_ids)
    }

    /// A budget's categories in the order they were added
    pub fn categories_for(&self, budget: &Budget) -> BudgetXpResult<Vec<BudgetCategory>> {
        self.categories.get_many(&budget.category_ids)
    }

    pub fn badges_for(&self, budget: &Budget) -> BudgetXpResult<Vec<Badge>> {
        self.badges.get_many(&budget.badge_ids)
    }

    // Achievements

    fn read_achievements(
        &self,
    ) -> BudgetXpResult<std::sync::RwLockReadGuard<'_, Option<AchievementsStore>>> {
        self.achievements
            .read()
            .map_err(|e| BudgetXpError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    /// Get or create the single achievements record
    ///
    /// Creation happens at most once per store: the record lives in one
    /// slot, and a store that already has it only hands out its handle.
    pub fn ensure_achievements(&self) -> BudgetXpResult<AchievementsHandle> {
        {
            let mut slot = self.achievements.write().map_err(|e| {
                BudgetXpError::Storage(format!("Failed to acquire write lock: {}", e))
            })?;

            if let Some(existing) = slot.as_ref() {
                return Ok(AchievementsHandle::new(existing.id));
            }

            let mut store = AchievementsStore::new();
            let badges = StarterBadge::seed(BadgeOwner::Global(store.id));
            store.badge_ids = badges.iter().map(|b| b.id).collect();
            for badge in badges {
                self.badges.upsert(badge)?;
            }

            info!(achievements = %store.id, "created achievements record");
            *slot = Some(store);
        }

        self.commit()?;
        self.ensure_achievements()
    }

    pub fn achievements(&self, handle: AchievementsHandle) -> BudgetXpResult<AchievementsStore> {
        self.read_achievements()?
            .as_ref()
            .filter(|store| store.id == handle.id())
            .cloned()
            .ok_or_else(|| BudgetXpError::NotFound {
                entity_type: "Achievements",
                identifier: handle.id().to_string(),
            })
    }

    pub fn update_achievements<R>(
        &self,
        handle: AchievementsHandle,
        f: impl FnOnce(&mut AchievementsStore) -> R,
    ) -> BudgetXpResult<R> {
        let mut slot = self
            .achievements
            .write()
            .map_err(|e| BudgetXpError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match slot.as_mut() {
            Some(store) if store.id == handle.id() => Ok(f(store)),
            _ => Err(BudgetXpError::NotFound {
                entity_type: "Achievements",
                identifier: handle.id().to_string(),
            }),
        }
    }

    pub fn global_badges(&self, handle: AchievementsHandle) -> BudgetXpResult<Vec<Badge>> {
        let store = self.achievements(handle)?;
        self.badges.get_many(&store.badge_ids)
    }
}
