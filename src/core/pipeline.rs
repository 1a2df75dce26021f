//! Listing pipeline: filter, search, sort, paginate
//!
//! The stages always run in that order. Filter and search narrow the
//! candidate set before sorting, and the total is counted after search but
//! before the page is sliced, so the pagination metadata describes the whole
//! matching set.

use crate::core::entity::Entity;
use crate::core::order::{OrderExpression, Sortable};
use crate::core::query::{PagedResult, QuerySpec};
use crate::core::queryable::Queryable;
use anyhow::Result;

/// Entities filterable by an inclusive numeric range (e.g. an age)
pub trait RangeFiltered: Entity {
    fn range_value(&self) -> u32;
}

/// Entities searchable by free text (e.g. a name)
pub trait Searchable: Entity {
    fn search_text(&self) -> &str;
}

/// Retain entities with `min <= value <= max`
pub fn filter_range<T: RangeFiltered>(query: Queryable<T>, min: u32, max: u32) -> Queryable<T> {
    query.filter(move |entity| (min..=max).contains(&entity.range_value()))
}

/// Retain entities whose search text contains the term, ignoring case
///
/// The term is trimmed first. A missing, empty or blank term leaves the
/// query unchanged.
pub fn search<T: Searchable>(query: Queryable<T>, term: Option<&str>) -> Queryable<T> {
    let term = match term.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_lowercase(),
        _ => return query,
    };

    query.filter(move |entity| entity.search_text().to_lowercase().contains(&term))
}

/// Order the query by a client sort expression
///
/// Unknown fields are dropped; with nothing left the entity's default
/// ordering applies.
pub fn sort<T: Sortable>(query: Queryable<T>, sort_spec: Option<&str>) -> Queryable<T> {
    let expression = match sort_spec {
        Some(raw) => OrderExpression::parse(raw, T::sort_fields()),
        None => OrderExpression::fallback(T::sort_fields()),
    };

    tracing::trace!(entity = T::entity_name(), order = %expression, "Applying sort");

    expression.apply(query)
}

/// Run the whole pipeline for one listing request
pub async fn execute<T>(base: Queryable<T>, spec: &QuerySpec) -> Result<PagedResult<T>>
where
    T: RangeFiltered + Searchable + Sortable,
{
    let query = filter_range(base, spec.min_age(), spec.max_age());
    let query = search(query, spec.search_term());
    let query = sort(query, spec.sort_spec());

    let page = query.paginate(spec.page_number(), spec.page_size()).await?;

    tracing::debug!(
        entity = T::entity_name(),
        min_age = spec.min_age(),
        max_age = spec.max_age(),
        search = ?spec.search_term(),
        page_number = page.page_number(),
        page_size = page.page_size(),
        returned = page.len(),
        total = page.total_count(),
        "Listing query executed"
    );

    Ok(page)
}
