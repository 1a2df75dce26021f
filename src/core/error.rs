//! Typed error handling for entity-query
//!
//! Store and service traits return `anyhow::Result` so that store failures
//! can be propagated unmodified with `?`. The types in this module are the
//! concrete errors carried inside those results, so callers can match them
//! with `downcast_ref` instead of parsing messages.
//!
//! # Error Categories
//!
//! - [`StorageError`]: failures raised by an entity store
//! - [`ValidationError`]: rejected client input (before a `QuerySpec` exists)
//! - [`UnitOfWorkError`]: misuse of a unit of work
//! - [`DataError`]: umbrella type with codes for the HTTP collaborator
//!
//! # Example
//!
//! ```rust,ignore
//! match manager.save().await {
//!     Ok(count) => println!("{} changes committed", count),
//!     Err(e) => match DataError::classify(&e) {
//!         Some(err) if err.is_client_error() => respond(400, err.error_code()),
//!         _ => respond(500, "INTERNAL_ERROR"),
//!     },
//! }
//! ```

use thiserror::Error;
use uuid::Uuid;

/// The umbrella error type for entity-query
///
/// Each variant wraps the more specific error for its category.
#[derive(Debug, Error)]
pub enum DataError {
    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Unit of work errors
    #[error(transparent)]
    UnitOfWork(#[from] UnitOfWorkError),
}

impl DataError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DataError::Storage(e) => e.error_code(),
            DataError::Validation(_) => "VALIDATION_ERROR",
            DataError::UnitOfWork(_) => "UNIT_OF_WORK_ERROR",
        }
    }

    /// Whether the failure was caused by the client's input
    pub fn is_client_error(&self) -> bool {
        matches!(self, DataError::Validation(_))
    }

    /// Recover a typed error from an `anyhow::Error` chain
    ///
    /// Returns `None` for errors that did not originate in this crate.
    pub fn classify(err: &anyhow::Error) -> Option<DataError> {
        if let Some(e) = err.downcast_ref::<StorageError>() {
            return Some(DataError::Storage(e.clone()));
        }
        if let Some(e) = err.downcast_ref::<ValidationError>() {
            return Some(DataError::Validation(e.clone()));
        }
        if let Some(e) = err.downcast_ref::<UnitOfWorkError>() {
            return Some(DataError::UnitOfWork(e.clone()));
        }
        None
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by entity stores
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The store could not be reached
    #[error("Storage backend '{backend}' unavailable: {message}")]
    Unavailable { backend: String, message: String },

    /// The store failed while executing a query or commit
    #[error("Query failed on '{backend}': {message}")]
    QueryFailed { backend: String, message: String },

    /// A row could not be converted to or from its entity type
    #[error("Failed to serialize/deserialize {entity_type}: {message}")]
    Serialization {
        entity_type: String,
        message: String,
    },

    /// An insert targeted an identity that already exists
    #[error("Row '{id}' already exists in '{table}'")]
    Conflict { table: String, id: Uuid },

    /// An update or delete targeted an identity that does not exist
    #[error("Row '{id}' not found in '{table}'")]
    MissingRow { table: String, id: Uuid },
}

impl StorageError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::Unavailable { .. } => "STORAGE_UNAVAILABLE",
            StorageError::QueryFailed { .. } => "STORAGE_QUERY_FAILED",
            StorageError::Serialization { .. } => "STORAGE_SERIALIZATION_ERROR",
            StorageError::Conflict { .. } => "STORAGE_CONFLICT",
            StorageError::MissingRow { .. } => "STORAGE_MISSING_ROW",
        }
    }

    pub(crate) fn serialization(entity_type: &str, err: serde_json::Error) -> Self {
        StorageError::Serialization {
            entity_type: entity_type.to_string(),
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors for client input rejected before it reaches the query pipeline
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// The age range is inverted
    #[error("Max age can't be less than min age (min: {min}, max: {max})")]
    InvalidAgeRange { min: u32, max: u32 },

    /// Field-level validation failed
    #[error("Invalid query parameters: {0}")]
    InvalidParameters(#[from] validator::ValidationErrors),
}

// =============================================================================
// Unit of Work Errors
// =============================================================================

/// Errors for misuse of a unit of work
#[derive(Debug, Clone, Error)]
pub enum UnitOfWorkError {
    /// `save` was called on a unit of work that was already committed
    #[error("Unit of work has already been committed")]
    AlreadyCommitted,
}
