//! Query parameters, query specifications and pagination utilities

use crate::config::QueryConfig;
use crate::core::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::Validate;

/// Raw listing parameters as decoded from a client request
///
/// All parameters have defaults, so an empty query string is valid.
/// Call [`QueryParams::into_spec`] to validate and normalize them.
///
/// # Example
/// ```rust,ignore
/// // GET /companies/{id}/employees?minAge=26&maxAge=40&searchTerm=jo&orderBy=name desc,age&pageNumber=2&pageSize=10
/// let params: QueryParams = serde_urlencoded::from_str(query)?;
/// let spec = params.into_spec(&config)?;
/// ```
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
#[validate(schema(function = "validate_age_range"))]
pub struct QueryParams {
    /// Lower age bound (inclusive)
    pub min_age: u32,

    /// Upper age bound (inclusive)
    pub max_age: u32,

    /// Free-text search on the entity name
    #[validate(length(max = 100))]
    pub search_term: Option<String>,

    /// Sort expression
    ///
    /// # Format
    /// - `field` or `field asc` (ascending)
    /// - `field desc` (descending)
    /// - comma-separated for tie-breaks: `position, age desc`
    pub order_by: Option<String>,

    /// Page number (starts at 1)
    pub page_number: usize,

    /// Number of items per page (defaults to the configured page size)
    pub page_size: Option<usize>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            min_age: 0,
            max_age: u32::MAX,
            search_term: None,
            order_by: None,
            page_number: 1,
            page_size: None,
        }
    }
}

fn validate_age_range(params: &QueryParams) -> Result<(), validator::ValidationError> {
    if params.min_age > params.max_age {
        return Err(validator::ValidationError::new("age_range")
            .with_message(Cow::Borrowed("Max age can't be less than min age")));
    }
    Ok(())
}

impl QueryParams {
    /// Validate the parameters and build an immutable [`QuerySpec`]
    pub fn into_spec(self, config: &QueryConfig) -> Result<QuerySpec, ValidationError> {
        self.validate()?;

        let mut builder = QuerySpec::builder()
            .max_page_size(config.max_page_size)
            .age_range(self.min_age, self.max_age)
            .page_number(self.page_number)
            .page_size(self.page_size.unwrap_or_else(|| config.default_page_size()));

        if let Some(term) = self.search_term {
            builder = builder.search(term);
        }
        if let Some(order_by) = self.order_by {
            builder = builder.sort(order_by);
        }

        builder.build()
    }
}

/// Immutable, normalized listing request consumed by the query pipeline
///
/// Invariants: `min_age <= max_age`, `page_number >= 1`,
/// `1 <= page_size <= max_page_size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    min_age: u32,
    max_age: u32,
    search_term: Option<String>,
    sort_spec: Option<String>,
    page_number: usize,
    page_size: usize,
}

impl QuerySpec {
    pub fn builder() -> QuerySpecBuilder {
        QuerySpecBuilder::default()
    }

    pub fn min_age(&self) -> u32 {
        self.min_age
    }

    pub fn max_age(&self) -> u32 {
        self.max_age
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref()
    }

    pub fn sort_spec(&self) -> Option<&str> {
        self.sort_spec.as_deref()
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            min_age: 0,
            max_age: u32::MAX,
            search_term: None,
            sort_spec: None,
            page_number: 1,
            page_size: QueryConfig::DEFAULT_PAGE_SIZE,
        }
    }
}

/// Builder for [`QuerySpec`]
///
/// Page inputs are normalized rather than rejected; only an inverted age
/// range fails [`build`](QuerySpecBuilder::build).
#[derive(Debug, Clone)]
pub struct QuerySpecBuilder {
    min_age: u32,
    max_age: u32,
    search_term: Option<String>,
    sort_spec: Option<String>,
    page_number: usize,
    page_size: usize,
    max_page_size: usize,
}

impl Default for QuerySpecBuilder {
    fn default() -> Self {
        Self {
            min_age: 0,
            max_age: u32::MAX,
            search_term: None,
            sort_spec: None,
            page_number: 1,
            page_size: QueryConfig::DEFAULT_PAGE_SIZE,
            max_page_size: QueryConfig::DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

impl QuerySpecBuilder {
    pub fn age_range(mut self, min_age: u32, max_age: u32) -> Self {
        self.min_age = min_age;
        self.max_age = max_age;
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn sort(mut self, sort_spec: impl Into<String>) -> Self {
        self.sort_spec = Some(sort_spec.into());
        self
    }

    pub fn page_number(mut self, page_number: usize) -> Self {
        self.page_number = page_number;
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Upper bound applied to the page size
    pub fn max_page_size(mut self, max_page_size: usize) -> Self {
        self.max_page_size = max_page_size.max(1);
        self
    }

    pub fn build(self) -> Result<QuerySpec, ValidationError> {
        if self.min_age > self.max_age {
            return Err(ValidationError::InvalidAgeRange {
                min: self.min_age,
                max: self.max_age,
            });
        }

        Ok(QuerySpec {
            min_age: self.min_age,
            max_age: self.max_age,
            search_term: self.search_term,
            sort_spec: self.sort_spec,
            page_number: self.page_number.max(1),
            page_size: self.page_size.clamp(1, self.max_page_size),
        })
    }
}

/// A page of entities plus pagination metadata
///
/// Produced once per pipeline run and owned by the caller; it holds no
/// reference back to the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagedResult<T> {
    /// The entities of this page, in sort order
    pub items: Vec<T>,

    /// Pagination metadata
    pub meta: PaginationMeta,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, page_number: usize, page_size: usize, total_count: usize) -> Self {
        Self {
            items,
            meta: PaginationMeta::new(page_number, page_size, total_count),
        }
    }

    /// Number of matching entities across all pages
    pub fn total_count(&self) -> usize {
        self.meta.total_count
    }

    pub fn page_number(&self) -> usize {
        self.meta.page_number
    }

    pub fn page_size(&self) -> usize {
        self.meta.page_size
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Convert the items (e.g. into response DTOs) keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page_number: usize,

    /// Number of items per page
    pub page_size: usize,

    /// Total number of items (after filter and search)
    pub total_count: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a previous page
    pub has_previous: bool,

    /// Whether there is a next page
    pub has_next: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page_number: usize, page_size: usize, total_count: usize) -> Self {
        // Ensure page size is at least 1 to avoid division by zero
        let page_size = page_size.max(1);
        let page_number = page_number.max(1);
        let total_pages = total_count.div_ceil(page_size);

        Self {
            page_number,
            page_size,
            total_count,
            total_pages,
            has_previous: page_number > 1,
            has_next: page_number < total_pages,
        }
    }
}
