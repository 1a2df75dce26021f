//! Core module containing the fundamental traits and types of the query layer

pub mod entity;
pub mod error;
pub mod order;
pub mod pipeline;
pub mod query;
pub mod queryable;
pub mod store;
pub mod tracking;

pub use entity::Entity;
pub use error::{DataError, StorageError, UnitOfWorkError, ValidationError};
pub use order::{OrderExpression, SortDescriptor, SortDirection, SortFieldRegistry, Sortable};
pub use pipeline::{RangeFiltered, Searchable};
pub use query::{PagedResult, PaginationMeta, QueryParams, QuerySpec, QuerySpecBuilder};
pub use queryable::{Comparator, Predicate, Queryable};
pub use store::{Change, EntityStore};
pub use tracking::ChangeTracker;
