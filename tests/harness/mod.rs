//! Shared test harness for the query pipeline and repositories
//!
//! Provides employee fixtures, a store that always fails, and tracing setup.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! mod harness;
//! use harness::*;
//! ```

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

use entity_query::core::{Change, EntityStore, StorageError};
use entity_query::entities::{Company, Employee};
use entity_query::storage::InMemoryStore;

/// Install a test-writer subscriber honoring `RUST_LOG`; safe to call repeatedly
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn company(name: &str) -> Company {
    Company::new(
        name.to_string(),
        "Papakura, Auckland, NZ".to_string(),
        "New Zealand".to_string(),
    )
}

pub fn employee(company_id: Uuid, name: &str, age: u32, position: &str) -> Employee {
    Employee::new(name.to_string(), age, position.to_string(), company_id)
}

/// A company with a mixed staff:
///
/// | name    | age | position  |
/// |---------|-----|-----------|
/// | John    | 35  | Developer |
/// | Jane    | 29  | Developer |
/// | Aroha   | 41  | Manager   |
/// | Johnny  | 52  | Developer |
/// | Mere    | 41  | Tester    |
/// | bob     | 23  | Tester    |
pub fn staff(company_id: Uuid) -> Vec<Employee> {
    vec![
        employee(company_id, "John", 35, "Developer"),
        employee(company_id, "Jane", 29, "Developer"),
        employee(company_id, "Aroha", 41, "Manager"),
        employee(company_id, "Johnny", 52, "Developer"),
        employee(company_id, "Mere", 41, "Tester"),
        employee(company_id, "bob", 23, "Tester"),
    ]
}

/// A store holding one company and its staff
pub fn staffed_store() -> (InMemoryStore, Company) {
    let acme = company("Acme");
    let store = InMemoryStore::new();
    store.seed(vec![acme.clone()]).expect("seed companies");
    store.seed(staff(acme.id)).expect("seed employees");
    (store, acme)
}

pub fn names(employees: &[Employee]) -> Vec<&str> {
    employees.iter().map(|e| e.name.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Failing store
// ---------------------------------------------------------------------------

/// A store whose every call fails as if the backend were unreachable
#[derive(Default)]
pub struct UnreachableStore {
    pub calls: AtomicUsize,
}

impl UnreachableStore {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail(&self) -> anyhow::Error {
        self.calls.fetch_add(1, Ordering::SeqCst);
        StorageError::Unavailable {
            backend: "unreachable".to_string(),
            message: "connection refused".to_string(),
        }
        .into()
    }
}

#[async_trait]
impl EntityStore for UnreachableStore {
    async fn scan(&self, _table: &str) -> Result<Vec<Value>> {
        Err(self.fail())
    }

    async fn commit(&self, _changes: Vec<Change>) -> Result<usize> {
        Err(self.fail())
    }
}
