//! In-memory implementation of EntityStore for testing and development

use crate::core::{Change, Entity, EntityStore, StorageError};
use crate::entities::seed;
use anyhow::Result;
use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

const BACKEND: &str = "in-memory";

type Table = IndexMap<Uuid, Value>;

/// In-memory entity store
///
/// Useful for testing and development. Rows are kept as JSON in insertion
/// order, one table per entity type, behind a single `RwLock` so a commit
/// is visible all at once or not at all.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<HashMap<String, Table>>>,
}

impl InMemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store loaded with the sample companies and employees
    pub fn seeded() -> Result<Self> {
        let store = Self::new();
        store.seed(seed::companies())?;
        store.seed(seed::employees())?;
        Ok(store)
    }

    /// Insert initial rows outside of any unit of work
    pub fn seed<T: Entity>(&self, entities: impl IntoIterator<Item = T>) -> Result<()> {
        let mut tables = self.tables.write().map_err(|e| unavailable(&e))?;
        let table = tables.entry(T::table_name().to_string()).or_default();

        for entity in entities {
            let id = entity.id();
            if table.contains_key(&id) {
                return Err(StorageError::Conflict {
                    table: T::table_name().to_string(),
                    id,
                }
                .into());
            }
            let row = serde_json::to_value(&entity)
                .map_err(|e| StorageError::serialization(T::entity_name(), e))?;
            table.insert(id, row);
        }

        Ok(())
    }

    /// Number of rows in a table
    pub fn row_count(&self, table: &str) -> Result<usize> {
        let tables = self.tables.read().map_err(|e| unavailable(&e))?;
        Ok(tables.get(table).map_or(0, IndexMap::len))
    }
}

fn unavailable(err: &dyn std::fmt::Display) -> StorageError {
    StorageError::Unavailable {
        backend: BACKEND.to_string(),
        message: format!("Failed to acquire lock: {}", err),
    }
}

fn apply(tables: &mut HashMap<String, Table>, change: Change) -> Result<(), StorageError> {
    let table_name = change.table();
    let table = tables.entry(table_name.to_string()).or_default();

    match change {
        Change::Insert { id, row, .. } => {
            if table.contains_key(&id) {
                return Err(StorageError::Conflict {
                    table: table_name.to_string(),
                    id,
                });
            }
            table.insert(id, row);
        }
        Change::Update { id, row, .. } => {
            let Some(existing) = table.get_mut(&id) else {
                return Err(StorageError::MissingRow {
                    table: table_name.to_string(),
                    id,
                });
            };
            *existing = row;
        }
        Change::Delete { id, .. } => {
            if table.shift_remove(&id).is_none() {
                return Err(StorageError::MissingRow {
                    table: table_name.to_string(),
                    id,
                });
            }
        }
    }

    Ok(())
}

#[async_trait]
impl EntityStore for InMemoryStore {
    async fn scan(&self, table: &str) -> Result<Vec<Value>> {
        let tables = self.tables.read().map_err(|e| unavailable(&e))?;

        let rows: Vec<Value> = tables
            .get(table)
            .map(|t| t.values().cloned().collect())
            .unwrap_or_default();

        tracing::debug!(table, rows = rows.len(), "Scanned table");

        Ok(rows)
    }

    async fn commit(&self, changes: Vec<Change>) -> Result<usize> {
        let mut tables = self.tables.write().map_err(|e| unavailable(&e))?;

        // Apply to a copy so a failing change leaves the store untouched
        let mut next = tables.clone();
        let count = changes.len();
        for change in changes {
            apply(&mut next, change)?;
        }
        *tables = next;

        tracing::debug!(changes = count, "Committed change set");

        Ok(count)
    }
}
