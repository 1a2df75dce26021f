//! Company entity

use crate::core::order::{SortFieldRegistry, Sortable};
use crate::core::pipeline::Searchable;
use crate::impl_entity;
use std::sync::OnceLock;

impl_entity!(
    Company,
    "company",
    "companies",
    {
        /// Registered company name
        name: String,
        address: String,
        country: String,
    }
);

impl Company {
    /// Address and country on one line
    pub fn full_address(&self) -> String {
        format!("{} {}", self.address, self.country)
    }
}

impl Searchable for Company {
    fn search_text(&self) -> &str {
        &self.name
    }
}

impl Sortable for Company {
    fn sort_fields() -> &'static SortFieldRegistry<Self> {
        static REGISTRY: OnceLock<SortFieldRegistry<Company>> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            SortFieldRegistry::new("name")
                .text_field("name", |c: &Company| &c.name)
                .text_field("address", |c: &Company| &c.address)
                .text_field("country", |c: &Company| &c.country)
        })
    }
}
