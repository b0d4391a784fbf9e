//! Store backends
//!
//! The persistence boundary. A backend only moves whole snapshots in and
//! out; schema and integrity checks happen in the lifecycle manager so every
//! backend is held to the same rules.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{BudgetXpError, BudgetXpResult};

use super::file_io::{read_json, remove_if_exists, write_json_atomic};
use super::snapshot::StoreSnapshot;

pub trait StoreBackend: Send + Sync {
    /// Load the persisted snapshot; a store that does not exist yet is empty
    fn load(&self) -> BudgetXpResult<StoreSnapshot>;

    /// Replace the persisted snapshot in one step
    fn save(&self, snapshot: &StoreSnapshot) -> BudgetXpResult<()>;

    /// Delete the persisted store entirely
    fn destroy(&self) -> BudgetXpResult<()>;

    /// Human-readable location, for logs
    fn describe(&self) -> String;
}

/// A single JSON document on disk
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl StoreBackend for JsonFileBackend {
    fn load(&self) -> BudgetXpResult<StoreSnapshot> {
        read_json(&self.path)
    }

    fn save(&self, snapshot: &StoreSnapshot) -> BudgetXpResult<()> {
        write_json_atomic(&self.path, snapshot)
    }

    fn destroy(&self) -> BudgetXpResult<()> {
        remove_if_exists(&self.path)?;
        remove_if_exists(self.path.with_extension("json.tmp"))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Keeps the serialized document in memory; nothing survives the process
#[derive(Default)]
pub struct MemoryBackend {
    document: RwLock<Option<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from raw document text, which need not be valid
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: RwLock::new(Some(document.into())),
        }
    }
}

impl StoreBackend for MemoryBackend {
    fn load(&self) -> BudgetXpResult<StoreSnapshot> {
        let document = self
            .document
            .read()
            .map_err(|e| BudgetXpError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        match document.as_deref() {
            None => Ok(StoreSnapshot::empty()),
            Some(text) => serde_json::from_str(text)
                .map_err(|e| BudgetXpError::Corrupt(format!("Failed to parse in-memory store: {}", e))),
        }
    }

    fn save(&self, snapshot: &StoreSnapshot) -> BudgetXpResult<()> {
        let text = serde_json::to_string(snapshot)?;
        let mut document = self
            .document
            .write()
            .map_err(|e| BudgetXpError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *document = Some(text);
        Ok(())
    }

    fn destroy(&self) -> BudgetXpResult<()> {
        let mut document = self
            .document
            .write()
            .map_err(|e| BudgetXpError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *document = None;
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory store".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_backend_missing_store_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(temp_dir.path().join("store.json"));
        assert!(backend.load().unwrap().is_empty());
    }

    #[test]
    fn test_file_backend_save_load_destroy() {
        let temp_dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(temp_dir.path().join("store.json"));

        backend.save(&StoreSnapshot::empty()).unwrap();
        assert!(backend.path().exists());
        backend.load().unwrap().check_schema().unwrap();

        backend.destroy().unwrap();
        assert!(!backend.path().exists());
    }

    #[test]
    fn test_memory_backend_garbage_is_corrupt() {
        let backend = MemoryBackend::with_document("{{{");
        assert!(matches!(backend.load(), Err(BudgetXpError::Corrupt(_))));

        backend.destroy().unwrap();
        assert!(backend.load().unwrap().is_empty());
    }
}
