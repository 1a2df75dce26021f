//! Store adapter and unit of work

use crate::core::{
    Change, ChangeTracker, Entity, EntityStore, Queryable, StorageError, UnitOfWorkError,
};
use anyhow::{Result, anyhow};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// One unit of work against an entity store
///
/// Queries built from the context read the store lazily. Mutations are only
/// staged; nothing reaches the store until [`save`](Self::save) commits the
/// whole batch at once. A context is meant to live for one request and is
/// cheap to clone (clones share the same unit of work).
#[derive(Clone)]
pub struct RepositoryContext {
    store: Arc<dyn EntityStore>,
    tracker: ChangeTracker,
    staged: Arc<Mutex<Vec<Change>>>,
    committed: Arc<AtomicBool>,
}

impl RepositoryContext {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self {
            store,
            tracker: ChangeTracker::new(),
            staged: Arc::new(Mutex::new(Vec::new())),
            committed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Access the entities of type `T`
    pub fn set<T: Entity>(&self) -> EntitySet<T> {
        EntitySet {
            context: self.clone(),
            _marker: PhantomData,
        }
    }

    pub fn tracker(&self) -> &ChangeTracker {
        &self.tracker
    }

    /// Number of staged, uncommitted changes
    pub fn pending_changes(&self) -> usize {
        self.staged
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_committed(&self) -> bool {
        self.committed.load(Ordering::SeqCst)
    }

    fn open_staging(&self) -> Result<MutexGuard<'_, Vec<Change>>> {
        if self.is_committed() {
            return Err(UnitOfWorkError::AlreadyCommitted.into());
        }

        self.staged
            .lock()
            .map_err(|e| anyhow!("Failed to acquire staging lock: {}", e))
    }

    /// Stage a change for the next commit
    pub fn stage(&self, change: Change) -> Result<()> {
        self.open_staging()?.push(change);
        Ok(())
    }

    /// Stage an update, superseding an update already pending for the row
    ///
    /// Only the latest change of the row is replaced, and only when it is
    /// an update, so the relative order of inserts and deletes is kept.
    pub fn stage_update(&self, table: &'static str, id: Uuid, row: Value) -> Result<()> {
        let mut staged = self.open_staging()?;

        if let Some(Change::Update { row: pending, .. }) =
            staged.iter_mut().rev().find(|c| c.targets(table, id))
        {
            *pending = row;
            return Ok(());
        }

        staged.push(Change::Update { table, id, row });
        Ok(())
    }

    /// Withdraw every pending update of a row, returning how many were dropped
    pub fn unstage_updates(&self, table: &'static str, id: Uuid) -> Result<usize> {
        let mut staged = self
            .staged
            .lock()
            .map_err(|e| anyhow!("Failed to acquire staging lock: {}", e))?;

        let before = staged.len();
        staged.retain(|c| !(matches!(c, Change::Update { .. }) && c.targets(table, id)));

        Ok(before - staged.len())
    }

    /// Commit every staged change in one store transaction
    ///
    /// May succeed at most once per unit of work. If the store rejects the
    /// batch its error is returned unchanged and the changes stay staged.
    /// Once the store has accepted the batch the save succeeds, even if the
    /// change tracker can no longer be updated.
    pub async fn save(&self) -> Result<usize> {
        if self.committed.swap(true, Ordering::SeqCst) {
            return Err(UnitOfWorkError::AlreadyCommitted.into());
        }

        let changes = match self.staged.lock() {
            Ok(mut staged) => std::mem::take(&mut *staged),
            Err(e) => {
                self.committed.store(false, Ordering::SeqCst);
                return Err(anyhow!("Failed to acquire staging lock: {}", e));
            }
        };

        match self.store.commit(changes.clone()).await {
            Ok(count) => {
                for change in changes {
                    let tracked = match change {
                        Change::Insert { table, id, row } | Change::Update { table, id, row } => {
                            self.tracker.record(table, id, row)
                        }
                        Change::Delete { table, id } => self.tracker.forget(table, id),
                    };

                    if let Err(err) = tracked {
                        tracing::warn!(
                            error = %err,
                            "Committed change not reflected in change tracker"
                        );
                    }
                }

                tracing::info!(changes = count, "Unit of work committed");
                Ok(count)
            }
            Err(err) => {
                let mut staged = self.staged.lock().unwrap_or_else(PoisonError::into_inner);
                let added_meanwhile = std::mem::take(&mut *staged);
                *staged = changes;
                staged.extend(added_meanwhile);
                drop(staged);

                self.committed.store(false, Ordering::SeqCst);
                Err(err)
            }
        }
    }
}

/// The entities of one type within a unit of work
///
/// Offers the two query construction modes and stages mutations.
pub struct EntitySet<T> {
    context: RepositoryContext,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Entity> EntitySet<T> {
    /// Query whose results are not tracked
    pub fn read_only(&self) -> Queryable<T> {
        Queryable::from_store(self.context.store.clone(), None)
    }

    /// Query whose results are tracked for later updates
    pub fn tracked(&self) -> Queryable<T> {
        Queryable::from_store(
            self.context.store.clone(),
            Some(self.context.tracker.clone()),
        )
    }

    /// Stage an insert
    pub fn add(&self, entity: &T) -> Result<()> {
        self.context.stage(Change::Insert {
            table: T::table_name(),
            id: entity.id(),
            row: to_row(entity)?,
        })
    }

    /// Stage an update
    ///
    /// A tracked entity identical to its snapshot is not staged, and any
    /// update still pending for it is withdrawn. Untracked entities are
    /// always staged. Repeated updates of one entity collapse into the last.
    pub fn update(&self, entity: &T) -> Result<()> {
        let table = T::table_name();
        let id = entity.id();
        let row = to_row(entity)?;

        if let Some(snapshot) = self.context.tracker.snapshot(table, id)? {
            if snapshot == row {
                let withdrawn = self.context.unstage_updates(table, id)?;
                tracing::debug!(
                    entity = T::entity_name(),
                    id = %id,
                    withdrawn,
                    "Skipping update of unchanged entity"
                );
                return Ok(());
            }
        }

        self.context.stage_update(table, id, row)
    }

    /// Stage a delete
    pub fn remove(&self, entity: &T) -> Result<()> {
        self.context.stage(Change::Delete {
            table: T::table_name(),
            id: entity.id(),
        })
    }
}

fn to_row<T: Entity>(entity: &T) -> Result<Value> {
    let row = serde_json::to_value(entity)
        .map_err(|e| StorageError::serialization(T::entity_name(), e))?;
    Ok(row)
}
