//! # entity-query
//!
//! A data-access layer exposing stored entities through a generic,
//! composable query pipeline.
//!
//! ## Features
//!
//! - **Generic Repository**: CRUD and query composition per entity type
//! - **Lazy Queries**: predicates and orderings compose without touching the store
//! - **Client-Driven Sorting**: `"position, age desc"` resolved against a closed field registry
//! - **Search and Range Filters**: case-insensitive name search, inclusive age ranges
//! - **Pagination**: pages with total counts taken before slicing
//! - **Unit of Work**: staged mutations committed atomically by a single save
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use entity_query::prelude::*;
//!
//! let store: Arc<dyn EntityStore> = Arc::new(InMemoryStore::seeded()?);
//! let manager = RepositoryManager::new(store);
//!
//! let params = QueryParams {
//!     min_age: 26,
//!     max_age: 40,
//!     order_by: Some("age desc".to_string()),
//!     ..Default::default()
//! };
//! let spec = params.into_spec(&QueryConfig::default())?;
//!
//! let page = manager
//!     .employee()
//!     .get_employees(company_id, &spec)
//!     .await?;
//!
//! println!("{} of {} employees", page.len(), page.total_count());
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod repository;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        entity::Entity,
        order::{OrderExpression, SortDescriptor, SortDirection, SortFieldRegistry, Sortable},
        pipeline::{RangeFiltered, Searchable},
        store::{Change, EntityStore},
    };

    // === Queries ===
    pub use crate::core::{
        pipeline,
        query::{PagedResult, PaginationMeta, QueryParams, QuerySpec},
        queryable::Queryable,
    };

    // === Errors ===
    pub use crate::core::error::{DataError, StorageError, UnitOfWorkError, ValidationError};

    // === Macros ===
    pub use crate::impl_entity;

    // === Entities ===
    pub use crate::entities::{Company, Employee};

    // === Repositories ===
    pub use crate::repository::{
        CompanyRepository, EmployeeRepository, RepositoryBase, RepositoryContext, RepositoryManager,
    };

    // === Storage ===
    pub use crate::storage::InMemoryStore;

    // === Config ===
    pub use crate::config::QueryConfig;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
