//! In-memory entity table
//!
//! One `Table` per entity type, keyed by the entity's ID. Parents keep
//! ordered ID lists, so lookups by a parent's list go through
//! [`Table::get_many`], which preserves that order.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{BudgetXpError, BudgetXpResult};
use crate::models::{Badge, BadgeId, Budget, BudgetCategory, BudgetId, CategoryId, Transaction, TransactionId};

/// An entity that can be stored in a [`Table`]
pub trait Keyed: Clone {
    type Key: Copy + Eq + Hash + Display;

    fn key(&self) -> Self::Key;
}

impl Keyed for Budget {
    type Key = BudgetId;

    fn key(&self) -> BudgetId {
        self.id
    }
}

impl Keyed for Transaction {
    type Key = TransactionId;

    fn key(&self) -> TransactionId {
        self.id
    }
}

impl Keyed for BudgetCategory {
    type Key = CategoryId;

    fn key(&self) -> CategoryId {
        self.id
    }
}

impl Keyed for Badge {
    type Key = BadgeId;

    fn key(&self) -> BadgeId {
        self.id
    }
}

pub struct Table<T: Keyed> {
    rows: RwLock<HashMap<T::Key, T>>,
}

impl<T: Keyed> Table<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> BudgetXpResult<RwLockReadGuard<'_, HashMap<T::Key, T>>> {
        self.rows
            .read()
            .map_err(|e| BudgetXpError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> BudgetXpResult<RwLockWriteGuard<'_, HashMap<T::Key, T>>> {
        self.rows
            .write()
            .map_err(|e| BudgetXpError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Replace every row, as when a snapshot is loaded
    pub fn replace_all(&self, rows: Vec<T>) -> BudgetXpResult<()> {
        let mut table = self.write()?;
        table.clear();
        table.extend(rows.into_iter().map(|row| (row.key(), row)));
        Ok(())
    }

    pub fn get(&self, key: T::Key) -> BudgetXpResult<Option<T>> {
        Ok(self.read()?.get(&key).cloned())
    }

    /// Rows for `keys` in the given order; unknown keys are skipped
    pub fn get_many(&self, keys: &[T::Key]) -> BudgetXpResult<Vec<T>> {
        let table = self.read()?;
        Ok(keys.iter().filter_map(|k| table.get(k).cloned()).collect())
    }

    /// All rows, unordered
    pub fn all(&self) -> BudgetXpResult<Vec<T>> {
        Ok(self.read()?.values().cloned().collect())
    }

    pub fn contains(&self, key: T::Key) -> BudgetXpResult<bool> {
        Ok(self.read()?.contains_key(&key))
    }

    /// Insert or fully replace a row
    pub fn upsert(&self, row: T) -> BudgetXpResult<()> {
        self.write()?.insert(row.key(), row);
        Ok(())
    }

    /// Apply `f` to an existing row; `None` if the key is unknown
    pub fn update<R>(&self, key: T::Key, f: impl FnOnce(&mut T) -> R) -> BudgetXpResult<Option<R>> {
        Ok(self.write()?.get_mut(&key).map(f))
    }

    pub fn remove(&self, key: T::Key) -> BudgetXpResult<Option<T>> {
        Ok(self.write()?.remove(&key))
    }

    /// Remove every listed row, returning how many existed
    pub fn remove_many(&self, keys: &[T::Key]) -> BudgetXpResult<usize> {
        let mut table = self.write()?;
        Ok(keys.iter().filter(|k| table.remove(*k).is_some()).count())
    }

    pub fn len(&self) -> BudgetXpResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> BudgetXpResult<bool> {
        Ok(self.read()?.is_empty())
    }
}

impl<T: Keyed> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}
