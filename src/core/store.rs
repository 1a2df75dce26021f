//! Store trait for the external entity store

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

/// A single staged mutation against one table
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// Add a new row
    Insert {
        table: &'static str,
        id: Uuid,
        row: Value,
    },

    /// Replace an existing row
    Update {
        table: &'static str,
        id: Uuid,
        row: Value,
    },

    /// Remove an existing row
    Delete { table: &'static str, id: Uuid },
}

impl Change {
    /// Table this change applies to
    pub fn table(&self) -> &'static str {
        match self {
            Change::Insert { table, .. }
            | Change::Update { table, .. }
            | Change::Delete { table, .. } => table,
        }
    }

    /// Identity of the row this change applies to
    pub fn id(&self) -> Uuid {
        match self {
            Change::Insert { id, .. } | Change::Update { id, .. } | Change::Delete { id, .. } => *id,
        }
    }

    /// Whether this change applies to the given row
    pub fn targets(&self, table: &str, id: Uuid) -> bool {
        self.table() == table && self.id() == id
    }
}

/// Handle to the relational store that owns the entities
///
/// The store is an external collaborator: connection management, schema and
/// retries all live behind this trait. Implementations surface their
/// failures as [`StorageError`](crate::core::error::StorageError) wrapped in
/// `anyhow::Error`; callers propagate them unmodified.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Read every row of a table
    ///
    /// An unknown table is an empty table, not an error.
    async fn scan(&self, table: &str) -> Result<Vec<Value>>;

    /// Apply a batch of changes as one atomic unit
    ///
    /// Either every change becomes visible or none does. Returns the number
    /// of changes applied.
    async fn commit(&self, changes: Vec<Change>) -> Result<usize>;
}
