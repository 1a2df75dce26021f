//! Generic repository over one entity type

use crate::core::{Entity, Queryable};
use crate::repository::context::RepositoryContext;
use anyhow::Result;

/// CRUD and query composition for entity type `T`
///
/// Implementors only provide [`context`](Self::context); every operation has
/// a default implementation. Reads return lazy [`Queryable`]s, read-only
/// unless the `_tracked` variant is used to load entities for an update.
/// Mutations are staged on the unit of work and become visible after the
/// context is saved.
///
/// # Example
/// ```rust,ignore
/// struct CarRepository {
///     context: RepositoryContext,
/// }
///
/// impl RepositoryBase<Car> for CarRepository {
///     fn context(&self) -> &RepositoryContext {
///         &self.context
///     }
/// }
///
/// let red = repo
///     .find_by_condition(|car| car.color == "red")
///     .to_vec()
///     .await?;
/// ```
pub trait RepositoryBase<T: Entity> {
    fn context(&self) -> &RepositoryContext;

    /// Every entity of type `T`
    fn find_all(&self) -> Queryable<T> {
        self.context().set::<T>().read_only()
    }

    /// Every entity of type `T`, tracked for later updates
    fn find_all_tracked(&self) -> Queryable<T> {
        self.context().set::<T>().tracked()
    }

    /// Entities matching a predicate
    fn find_by_condition<F>(&self, condition: F) -> Queryable<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.find_all().filter(condition)
    }

    /// Entities matching a predicate, tracked for later updates
    fn find_by_condition_tracked<F>(&self, condition: F) -> Queryable<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.find_all_tracked().filter(condition)
    }

    /// Stage an insert
    fn create(&self, entity: &T) -> Result<()> {
        self.context().set::<T>().add(entity)
    }

    /// Stage an update
    fn update(&self, entity: &T) -> Result<()> {
        self.context().set::<T>().update(entity)
    }

    /// Stage a delete
    fn delete(&self, entity: &T) -> Result<()> {
        self.context().set::<T>().remove(entity)
    }
}
