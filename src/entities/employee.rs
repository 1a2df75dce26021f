//! Employee entity

use crate::core::order::{SortFieldRegistry, Sortable};
use crate::core::pipeline::{RangeFiltered, Searchable};
use crate::impl_entity;
use std::sync::OnceLock;

impl_entity!(
    Employee,
    "employee",
    "employees",
    {
        name: String,
        age: u32,
        position: String,
        /// Owning company (back-reference, not enforced here)
        company_id: ::uuid::Uuid,
    }
);

impl RangeFiltered for Employee {
    fn range_value(&self) -> u32 {
        self.age
    }
}

impl Searchable for Employee {
    fn search_text(&self) -> &str {
        &self.name
    }
}

impl Sortable for Employee {
    fn sort_fields() -> &'static SortFieldRegistry<Self> {
        static REGISTRY: OnceLock<SortFieldRegistry<Employee>> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            SortFieldRegistry::new("name")
                .text_field("name", |e: &Employee| &e.name)
                .field("age", |e: &Employee| e.age)
                .text_field("position", |e: &Employee| &e.position)
        })
    }
}
