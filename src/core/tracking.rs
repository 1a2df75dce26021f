//! Change tracking for entities loaded in tracked mode

use anyhow::{Result, anyhow};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use uuid::Uuid;

/// Snapshots of entities materialized by tracked queries
///
/// Keyed by table and identity. The snapshot is the row exactly as the
/// store returned it, so an update can tell whether anything changed.
#[derive(Clone, Default)]
pub struct ChangeTracker {
    snapshots: Arc<Mutex<HashMap<(&'static str, Uuid), Value>>>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the row an entity was loaded from
    pub fn record(&self, table: &'static str, id: Uuid, row: Value) -> Result<()> {
        let mut snapshots = self
            .snapshots
            .lock()
            .map_err(|e| anyhow!("Failed to acquire tracker lock: {}", e))?;

        snapshots.insert((table, id), row);

        Ok(())
    }

    /// Get the snapshot of a tracked entity
    pub fn snapshot(&self, table: &'static str, id: Uuid) -> Result<Option<Value>> {
        let snapshots = self
            .snapshots
            .lock()
            .map_err(|e| anyhow!("Failed to acquire tracker lock: {}", e))?;

        Ok(snapshots.get(&(table, id)).cloned())
    }

    /// Drop the snapshot of an entity
    pub fn forget(&self, table: &'static str, id: Uuid) -> Result<()> {
        let mut snapshots = self
            .snapshots
            .lock()
            .map_err(|e| anyhow!("Failed to acquire tracker lock: {}", e))?;

        snapshots.remove(&(table, id));

        Ok(())
    }

    /// Number of tracked entities
    pub fn len(&self) -> usize {
        self.snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Poison the snapshot lock, as a panic while holding it would
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        let snapshots = self.snapshots.clone();
        let _ = std::thread::spawn(move || {
            let _guard = snapshots.lock();
            panic!("tracker poisoned");
        })
        .join();
    }
}
