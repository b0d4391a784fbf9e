//! Store lifecycle
//!
//! Opening the store is all-or-nothing. If the persisted store cannot be
//! loaded for any reason (unparsable, written by another schema version,
//! broken ownership graph) it is deleted and an empty store is created in
//! its place. There is no migration and no backup: the old data is lost.
//! If the fresh store cannot be opened either, the error is fatal.

use tracing::{error, info, warn};

use crate::config::paths::BudgetXpPaths;
use crate::error::{BudgetXpError, BudgetXpResult};

use super::backend::{JsonFileBackend, StoreBackend};
use super::snapshot::StoreSnapshot;
use super::Storage;

/// How the store came to be open
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// The existing store (or a brand new one) loaded cleanly
    Opened,
    /// The existing store was discarded; `reason` is why it failed to open
    Recovered { reason: String },
}

impl OpenOutcome {
    pub fn was_reset(&self) -> bool {
        matches!(self, Self::Recovered { .. })
    }
}

/// Load and check a snapshot from `backend`
fn load_checked(backend: &dyn StoreBackend) -> BudgetXpResult<StoreSnapshot> {
    let snapshot = backend.load()?;
    snapshot.check_schema()?;
    snapshot.verify()?;
    Ok(snapshot)
}

/// Open the store behind `backend`, resetting it once if it fails to open
pub fn open_with_recovery(
    backend: Box<dyn StoreBackend>,
) -> BudgetXpResult<(Storage, OpenOutcome)> {
    match load_checked(backend.as_ref()) {
        Ok(snapshot) => {
            info!(store = %backend.describe(), budgets = snapshot.budgets.len(), "opened store");
            let storage = Storage::from_snapshot(backend, snapshot)?;
            Ok((storage, OpenOutcome::Opened))
        }
        Err(err) => {
            warn!(
                store = %backend.describe(),
                error = %err,
                "store failed to open; deleting it and starting empty"
            );
            let reason = err.to_string();

            let snapshot = reset(backend.as_ref()).map_err(|e| {
                error!(store = %backend.describe(), error = %e, "store unusable after reset");
                BudgetXpError::StoreUnrecoverable(e.to_string())
            })?;

            let storage = Storage::from_snapshot(backend, snapshot)?;
            Ok((storage, OpenOutcome::Recovered { reason }))
        }
    }
}

/// Destroy the store, write an empty one, and open that
fn reset(backend: &dyn StoreBackend) -> BudgetXpResult<StoreSnapshot> {
    backend.destroy()?;
    backend.save(&StoreSnapshot::empty())?;
    load_checked(backend)
}

/// Open the on-disk store under `paths`
pub fn open_store(paths: &BudgetXpPaths) -> BudgetXpResult<(Storage, OpenOutcome)> {
    paths.ensure_directories()?;
    open_with_recovery(Box::new(JsonFileBackend::new(paths.store_file())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, Money};
    use crate::storage::backend::MemoryBackend;
    use crate::storage::snapshot::STORE_SCHEMA_VERSION;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Fails the first `failures` loads, counting loads and destroys
    struct FlakyBackend {
        inner: MemoryBackend,
        failures: usize,
        loads: Arc<AtomicUsize>,
        destroys: Arc<AtomicUsize>,
    }

    impl FlakyBackend {
        fn new(failures: usize) -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let loads = Arc::new(AtomicUsize::new(0));
            let destroys = Arc::new(AtomicUsize::new(0));
            let backend = Self {
                inner: MemoryBackend::new(),
                failures,
                loads: Arc::clone(&loads),
                destroys: Arc::clone(&destroys),
            };
            (backend, loads, destroys)
        }
    }

    impl StoreBackend for FlakyBackend {
        fn load(&self) -> BudgetXpResult<StoreSnapshot> {
            let attempt = self.loads.fetch_add(1, Ordering::SeqCst);
            if attempt < self.failures {
                return Err(BudgetXpError::Corrupt(format!("simulated failure {}", attempt + 1)));
            }
            self.inner.load()
        }

        fn save(&self, snapshot: &StoreSnapshot) -> BudgetXpResult<()> {
            self.inner.save(snapshot)
        }

        fn destroy(&self) -> BudgetXpResult<()> {
            self.destroys.fetch_add(1, Ordering::SeqCst);
            self.inner.destroy()
        }

        fn describe(&self) -> String {
            "flaky".to_string()
        }
    }

    #[test]
    fn test_clean_open() {
        let (backend, loads, destroys) = FlakyBackend::new(0);
        let (storage, outcome) = open_with_recovery(Box::new(backend)).unwrap();

        assert_eq!(outcome, OpenOutcome::Opened);
        assert!(storage.budgets.is_empty().unwrap());
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert_eq!(destroys.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_single_failure_resets_once() {
        let (backend, loads, destroys) = FlakyBackend::new(1);
        let (storage, outcome) = open_with_recovery(Box::new(backend)).unwrap();

        assert!(outcome.was_reset());
        assert_eq!(
            outcome,
            OpenOutcome::Recovered {
                reason: "Store is corrupt: simulated failure 1".into()
            }
        );
        assert_eq!(destroys.load(Ordering::SeqCst), 1);
        assert_eq!(loads.load(Ordering::SeqCst), 2);
        assert!(storage.snapshot().unwrap().is_empty());
    }

    #[test]
    fn test_failure_after_reset_is_fatal() {
        let (backend, _, destroys) = FlakyBackend::new(2);
        let err = match open_with_recovery(Box::new(backend)) {
            Ok(_) => panic!("second failure must be fatal"),
            Err(err) => err,
        };

        assert!(err.is_fatal());
        assert_eq!(destroys.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_corrupt_file_is_replaced_with_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        std::fs::write(&path, "this is not a store").unwrap();

        let (storage, outcome) = open_with_recovery(Box::new(JsonFileBackend::new(path.clone()))).unwrap();

        assert!(outcome.was_reset());
        assert!(storage.budgets.is_empty().unwrap());
        let on_disk: StoreSnapshot =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(on_disk.is_empty());
        assert_eq!(on_disk.schema_version, STORE_SCHEMA_VERSION);
    }

    #[test]
    fn test_schema_mismatch_discards_data() {
        let start = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let mut old = StoreSnapshot::empty();
        old.schema_version = STORE_SCHEMA_VERSION + 1;
        old.budgets.push(Budget::new("Old", Money::from_units(10), start, start));
        let document = serde_json::to_string(&old).unwrap();

        let (storage, outcome) =
            open_with_recovery(Box::new(MemoryBackend::with_document(document))).unwrap();

        match outcome {
            OpenOutcome::Recovered { reason } => assert!(reason.contains("schema mismatch")),
            OpenOutcome::Opened => panic!("expected a reset"),
        }
        assert!(storage.list_budgets().unwrap().is_empty());
    }

    #[test]
    fn test_open_store_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetXpPaths::with_base_dir(temp_dir.path().to_path_buf());

        let (_storage, outcome) = open_store(&paths).unwrap();
        assert_eq!(outcome, OpenOutcome::Opened);
        assert!(paths.data_dir().exists());
    }
}
