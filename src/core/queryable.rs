//! Lazily evaluated, composable entity sequences

use crate::core::entity::Entity;
use crate::core::error::StorageError;
use crate::core::query::PagedResult;
use crate::core::store::EntityStore;
use crate::core::tracking::ChangeTracker;
use anyhow::Result;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// A composable predicate over an entity
pub type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// A composable comparison between two entities
pub type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

#[derive(Clone)]
enum Source<T> {
    /// Entities already in memory
    Items(Vec<T>),

    /// Rows of `T::table_name()` in a store, read at materialization time
    Store {
        store: Arc<dyn EntityStore>,
        tracker: Option<ChangeTracker>,
    },
}

/// A lazily evaluated sequence of entities
///
/// Predicates and orderings are only recorded when composed. Nothing is read
/// from the store until one of the terminal operations (`to_vec`, `first`,
/// `count`, `paginate`) runs, and each terminal operation reads the source
/// exactly once.
///
/// # Example
/// ```rust,ignore
/// let page = context
///     .set::<Employee>()
///     .read_only()
///     .filter(|e| e.age >= 30)
///     .order_by(Arc::new(|a, b| a.name.cmp(&b.name)))
///     .paginate(1, 10)
///     .await?;
/// ```
#[derive(Clone)]
pub struct Queryable<T> {
    source: Source<T>,
    predicates: Vec<Predicate<T>>,
    ordering: Option<Comparator<T>>,
}

impl<T: Entity> Queryable<T> {
    /// Query over entities that are already in memory
    pub fn from_items(items: Vec<T>) -> Self {
        Self {
            source: Source::Items(items),
            predicates: Vec::new(),
            ordering: None,
        }
    }

    /// Query over the rows of `T` in a store
    ///
    /// With a tracker, every materialized entity is recorded as tracked.
    pub fn from_store(store: Arc<dyn EntityStore>, tracker: Option<ChangeTracker>) -> Self {
        Self {
            source: Source::Store { store, tracker },
            predicates: Vec::new(),
            ordering: None,
        }
    }

    /// Retain only entities matching the predicate
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.predicates.push(Arc::new(predicate));
        self
    }

    /// Order the sequence, replacing any previous ordering
    pub fn order_by(mut self, comparator: Comparator<T>) -> Self {
        self.ordering = Some(comparator);
        self
    }

    /// Whether an ordering has been applied
    pub fn is_ordered(&self) -> bool {
        self.ordering.is_some()
    }

    /// Whether materialization records tracked snapshots
    pub fn is_tracked(&self) -> bool {
        matches!(
            self.source,
            Source::Store {
                tracker: Some(_),
                ..
            }
        )
    }

    /// Materialize the sequence
    pub async fn to_vec(self) -> Result<Vec<T>> {
        self.materialize().await
    }

    /// Materialize and return the first entity, if any
    pub async fn first(self) -> Result<Option<T>> {
        Ok(self.materialize().await?.into_iter().next())
    }

    /// Number of entities in the sequence
    pub async fn count(self) -> Result<usize> {
        Ok(self.materialize().await?.len())
    }

    /// Materialize one page of the sequence
    ///
    /// The total is counted after all predicates and before slicing.
    /// `page_number` below 1 is treated as 1 and `page_size` below 1 as 1.
    pub async fn paginate(self, page_number: usize, page_size: usize) -> Result<PagedResult<T>> {
        let page_number = page_number.max(1);
        let page_size = page_size.max(1);

        let all = self.materialize().await?;
        let total_count = all.len();
        let skip = (page_number - 1).saturating_mul(page_size);

        let items: Vec<T> = all.into_iter().skip(skip).take(page_size).collect();

        Ok(PagedResult::new(items, page_number, page_size, total_count))
    }

    async fn materialize(self) -> Result<Vec<T>> {
        let Self {
            source,
            predicates,
            ordering,
        } = self;

        let keep = |entity: &T| predicates.iter().all(|p| p(entity));

        let mut entities: Vec<T> = match source {
            Source::Items(items) => items.into_iter().filter(|e| keep(e)).collect(),
            Source::Store { store, tracker } => {
                let rows = store.scan(T::table_name()).await?;
                let mut entities = Vec::with_capacity(rows.len());

                for row in rows {
                    let entity: T = serde_json::from_value(row.clone())
                        .map_err(|e| StorageError::serialization(T::entity_name(), e))?;

                    if !keep(&entity) {
                        continue;
                    }
                    if let Some(tracker) = &tracker {
                        tracker.record(T::table_name(), entity.id(), row)?;
                    }
                    entities.push(entity);
                }

                entities
            }
        };

        // Stable sort so equal keys keep store order
        if let Some(comparator) = ordering {
            entities.sort_by(|a, b| comparator(a, b));
        }

        Ok(entities)
    }
}

impl<T> fmt::Debug for Queryable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.source {
            Source::Items(items) => format!("Items({})", items.len()),
            Source::Store { tracker, .. } => format!("Store(tracked: {})", tracker.is_some()),
        };

        f.debug_struct("Queryable")
            .field("source", &source)
            .field("predicates", &self.predicates.len())
            .field("ordered", &self.ordering.is_some())
            .finish()
    }
}
