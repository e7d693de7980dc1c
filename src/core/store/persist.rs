//! Snapshot persistence: key -> JSON-array mapping, one key per list kind
//!
//! Written after every successful mutation, read once at startup.
//! Best-effort: callers log write failures and carry on.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use directories::ProjectDirs;
use redb::{Database, ReadableTable, TableDefinition};

use crate::shared::errors::{CommandError, CommandResult};

/// Key: list kind, Value: serialized JSON array of items
const SNAPSHOT_TABLE: TableDefinition<&str, &str> = TableDefinition::new("list_snapshots");

/// Key-value store for persisted list snapshots
pub trait SnapshotStore: Send + Sync {
    fn read(&self, kind: &str) -> CommandResult<Option<String>>;
    fn write(&self, kind: &str, json: &str) -> CommandResult<()>;
}

/// Redb-backed snapshot store under the platform data directory
pub struct RedbSnapshotStore {
    db: Mutex<Database>,
}

impl RedbSnapshotStore {
    pub fn new() -> CommandResult<Self> {
        let proj_dirs = ProjectDirs::from("com", "clipdock", "clipdock")
            .ok_or_else(|| CommandError::StorageError("Failed to get project directories".to_string()))?;

        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir)
            .map_err(|e| CommandError::StorageError(format!("Failed to create data directory: {}", e)))?;

        let db_path = data_dir.join("lists.redb");
        let db = Database::create(db_path)
            .map_err(|e| CommandError::StorageError(format!("Failed to open database: {}", e)))?;

        // Initialize table
        {
            let write_txn = db
                .begin_write()
                .map_err(|e| CommandError::StorageError(format!("Failed to begin write: {}", e)))?;
            {
                let _table = write_txn
                    .open_table(SNAPSHOT_TABLE)
                    .map_err(|e| CommandError::StorageError(format!("Failed to open table: {}", e)))?;
            }
            write_txn
                .commit()
                .map_err(|e| CommandError::StorageError(format!("Failed to commit: {}", e)))?;
        }

        Ok(Self { db: Mutex::new(db) })
    }
}

impl SnapshotStore for RedbSnapshotStore {
    fn read(&self, kind: &str) -> CommandResult<Option<String>> {
        let db = self
            .db
            .lock()
            .map_err(|e| CommandError::StorageError(format!("Mutex poisoned: {}", e)))?;

        let read_txn = db
            .begin_read()
            .map_err(|e| CommandError::StorageError(format!("Failed to begin read: {}", e)))?;

        let table = read_txn
            .open_table(SNAPSHOT_TABLE)
            .map_err(|e| CommandError::StorageError(format!("Failed to open table: {}", e)))?;

        let value = table
            .get(kind)
            .map_err(|e| CommandError::StorageError(format!("Failed to read key '{}': {}", kind, e)))?;

        Ok(value.map(|v| v.value().to_string()))
    }

    fn write(&self, kind: &str, json: &str) -> CommandResult<()> {
        let db = self
            .db
            .lock()
            .map_err(|e| CommandError::StorageError(format!("Mutex poisoned: {}", e)))?;

        let write_txn = db
            .begin_write()
            .map_err(|e| CommandError::StorageError(format!("Failed to begin write: {}", e)))?;

        {
            let mut table = write_txn
                .open_table(SNAPSHOT_TABLE)
                .map_err(|e| CommandError::StorageError(format!("Failed to open table: {}", e)))?;

            table
                .insert(kind, json)
                .map_err(|e| CommandError::StorageError(format!("Failed to write key '{}': {}", kind, e)))?;
        }

        write_txn
            .commit()
            .map_err(|e| CommandError::StorageError(format!("Failed to commit: {}", e)))?;

        Ok(())
    }
}

/// In-memory fallback store (used if the database cannot be opened)
pub struct InMemorySnapshotStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn read(&self, kind: &str) -> CommandResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| CommandError::StorageError(format!("Mutex poisoned: {}", e)))?;
        Ok(entries.get(kind).cloned())
    }

    fn write(&self, kind: &str, json: &str) -> CommandResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| CommandError::StorageError(format!("Mutex poisoned: {}", e)))?;
        entries.insert(kind.to_string(), json.to_string());
        Ok(())
    }
}

/// Open the default snapshot store, falling back to memory if the
/// database is unavailable.
pub fn open_default() -> Arc<dyn SnapshotStore> {
    match RedbSnapshotStore::new() {
        Ok(store) => Arc::new(store),
        Err(e) => {
            eprintln!("[SnapshotStore] Failed to open database: {}, using in-memory fallback", e);
            Arc::new(InMemorySnapshotStore::new())
        }
    }
}
