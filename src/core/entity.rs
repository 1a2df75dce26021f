//! Entity trait defining the core abstraction for all stored record types

use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

/// Base trait for all entities held by an [`EntityStore`](crate::core::store::EntityStore).
///
/// An entity is a typed record with a stable identity. Entities travel to
/// and from the store as JSON rows, so every entity must be serializable.
///
/// Note: relations between entities (e.g. an employee's company) are plain
/// identifier fields. Referential integrity is the store's responsibility.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The table (collection) name used by the store (e.g., "companies")
    fn table_name() -> &'static str;

    /// The singular entity name used in messages (e.g., "company")
    fn entity_name() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;
}
