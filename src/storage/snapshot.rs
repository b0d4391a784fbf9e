//! Persisted store layout
//!
//! The whole store is one document: flat tables keyed by ID plus the single
//! achievements slot. Parents list their children; children name their
//! parent. A snapshot is only accepted when both sides agree.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::{BudgetXpError, BudgetXpResult};
use crate::models::{
    AchievementsStore, Badge, BadgeId, BadgeOwner, Budget, BudgetCategory, CategoryId,
    Transaction, TransactionId,
};

/// Bump when the persisted layout changes; older stores are discarded
pub const STORE_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub schema_version: u32,

    #[serde(default)]
    pub budgets: Vec<Budget>,

    #[serde(default)]
    pub transactions: Vec<Transaction>,

    #[serde(default)]
    pub categories: Vec<BudgetCategory>,

    #[serde(default)]
    pub badges: Vec<Badge>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievements: Option<AchievementsStore>,
}

impl StoreSnapshot {
    pub fn empty() -> Self {
        Self {
            schema_version: STORE_SCHEMA_VERSION,
            budgets: Vec::new(),
            transactions: Vec::new(),
            categories: Vec::new(),
            badges: Vec::new(),
            achievements: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
            && self.transactions.is_empty()
            && self.categories.is_empty()
            && self.badges.is_empty()
            && self.achievements.is_none()
    }

    pub fn check_schema(&self) -> BudgetXpResult<()> {
        if self.schema_version != STORE_SCHEMA_VERSION {
            return Err(BudgetXpError::SchemaMismatch {
                found: self.schema_version,
                expected: STORE_SCHEMA_VERSION,
            });
        }
        Ok(())
    }

    /// Check the ownership graph
    ///
    /// Every ID is unique within its table, every child a parent lists exists
    /// and names that parent as owner, and no child is left unclaimed.
    pub fn verify(&self) -> BudgetXpResult<()> {
        index("budget", &self.budgets, |b| b.id)?;
        let transactions = index("transaction", &self.transactions, |t| t.id)?;
        let categories = index("category", &self.categories, |c| c.id)?;
        let badges = index("badge", &self.badges, |b| b.id)?;

        let mut claimed_transactions: HashSet<TransactionId> = HashSet::new();
        let mut claimed_categories: HashSet<CategoryId> = HashSet::new();
        let mut claimed_badges: HashSet<BadgeId> = HashSet::new();

        for budget in &self.budgets {
            for id in &budget.transaction_ids {
                let txn = transactions
                    .get(id)
                    .ok_or_else(|| missing_child("transaction", id, &budget.name))?;
                if txn.budget_id != budget.id || !claimed_transactions.insert(*id) {
                    return Err(wrong_owner("transaction", id));
                }
            }

            for id in &budget.category_ids {
                let category = categories
                    .get(id)
                    .ok_or_else(|| missing_child("category", id, &budget.name))?;
                if category.budget_id != budget.id || !claimed_categories.insert(*id) {
                    return Err(wrong_owner("category", id));
                }
            }

            for id in &budget.badge_ids {
                claim_badge(&badges, id, BadgeOwner::Budget(budget.id), &budget.name, &mut claimed_badges)?;
            }
        }

        if let Some(store) = &self.achievements {
            for id in &store.badge_ids {
                claim_badge(&badges, id, BadgeOwner::Global(store.id), "achievements", &mut claimed_badges)?;
            }
        }

        orphans("transaction", transactions.len(), claimed_transactions.len())?;
        orphans("category", categories.len(), claimed_categories.len())?;
        orphans("badge", badges.len(), claimed_badges.len())?;

        Ok(())
    }
}

impl Default for StoreSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// Map each record by ID, rejecting duplicates
fn index<'a, K, T>(
    kind: &str,
    records: &'a [T],
    key: impl Fn(&T) -> K,
) -> BudgetXpResult<HashMap<K, &'a T>>
where
    K: Eq + Hash + std::fmt::Display,
{
    let mut map = HashMap::with_capacity(records.len());
    for record in records {
        let id = key(record);
        let label = id.to_string();
        if map.insert(id, record).is_some() {
            return Err(BudgetXpError::Corrupt(format!("duplicate {} id {}", kind, label)));
        }
    }
    Ok(map)
}

fn claim_badge(
    badges: &HashMap<BadgeId, &Badge>,
    id: &BadgeId,
    owner: BadgeOwner,
    parent_name: &str,
    claimed: &mut HashSet<BadgeId>,
) -> BudgetXpResult<()> {
    let badge = badges
        .get(id)
        .ok_or_else(|| missing_child("badge", id, parent_name))?;
    if badge.owner != owner || !claimed.insert(*id) {
        return Err(wrong_owner("badge", id));
    }
    Ok(())
}

/// Claimed IDs are always a subset of the table, so a shortfall is unowned records
fn orphans(kind: &str, total: usize, claimed: usize) -> BudgetXpResult<()> {
    let count = total - claimed;
    if count > 0 {
        return Err(BudgetXpError::Corrupt(format!(
            "{} {} record(s) have no owning parent",
            count, kind
        )));
    }
    Ok(())
}

fn missing_child(kind: &str, id: &impl std::fmt::Display, parent: &str) -> BudgetXpError {
    BudgetXpError::Corrupt(format!("{} {} listed by '{}' does not exist", kind, id, parent))
}

fn wrong_owner(kind: &str, id: &impl std::fmt::Display) -> BudgetXpError {
    BudgetXpError::Corrupt(format!("{} {} is claimed by the wrong parent", kind, id))
}
