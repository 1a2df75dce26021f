//! Client-driven multi-field sorting
//!
//! A client sends a sort expression such as `"name desc, age"`. The
//! expression is resolved against a closed, per-entity
//! [`SortFieldRegistry`]: only registered fields can ever reach the store,
//! and anything else in the expression is dropped.

use crate::core::entity::Entity;
use crate::core::queryable::{Comparator, Queryable};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Direction of a single sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Parse an optional direction segment; only `desc` means descending
    pub fn parse(segment: Option<&str>) -> Self {
        match segment {
            Some(s) if s.eq_ignore_ascii_case("desc") => SortDirection::Descending,
            _ => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// One validated sort key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDescriptor {
    /// Registered (lower-cased) field name
    pub field: String,

    pub direction: SortDirection,
}

impl fmt::Display for SortDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            SortDirection::Ascending => write!(f, "{}", self.field),
            SortDirection::Descending => write!(f, "{} desc", self.field),
        }
    }
}

/// The closed set of fields an entity type can be sorted on
///
/// Built once per entity type. Field names are stored lower-cased and
/// looked up case-insensitively.
///
/// # Example
/// ```rust,ignore
/// let registry = SortFieldRegistry::new("name")
///     .text_field("name", |e: &Employee| &e.name)
///     .field("age", |e: &Employee| e.age);
/// ```
pub struct SortFieldRegistry<T> {
    fields: HashMap<String, Comparator<T>>,
    default_field: String,
}

impl<T: 'static> SortFieldRegistry<T> {
    /// Create a registry whose fallback ordering is `default_field` ascending
    ///
    /// The default field must also be registered.
    pub fn new(default_field: &str) -> Self {
        Self {
            fields: HashMap::new(),
            default_field: default_field.to_lowercase(),
        }
    }

    /// Register a field ordered by its natural `Ord`
    pub fn field<K, F>(mut self, name: &str, accessor: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        let comparator: Comparator<T> =
            Arc::new(move |a: &T, b: &T| accessor(a).cmp(&accessor(b)));
        self.fields.insert(name.to_lowercase(), comparator);
        self
    }

    /// Register a text field ordered case-insensitively
    pub fn text_field<F>(mut self, name: &str, accessor: F) -> Self
    where
        F: Fn(&T) -> &str + Send + Sync + 'static,
    {
        let comparator: Comparator<T> = Arc::new(move |a: &T, b: &T| {
            let left = accessor(a).chars().flat_map(char::to_lowercase);
            let right = accessor(b).chars().flat_map(char::to_lowercase);
            left.cmp(right)
        });
        self.fields.insert(name.to_lowercase(), comparator);
        self
    }

    /// Look up a field, ignoring case
    pub fn get(&self, name: &str) -> Option<&Comparator<T>> {
        self.fields.get(&name.to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn default_field(&self) -> &str {
        &self.default_field
    }

    /// Registered field names, sorted
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Entities that expose a sortable-field registry
pub trait Sortable: Entity {
    /// The registry for this entity type, built once at first use
    fn sort_fields() -> &'static SortFieldRegistry<Self>;
}

/// A parsed, validated sort expression for entity type `T`
///
/// Parsing never fails: unknown fields are dropped, and an expression with
/// no surviving keys falls back to the registry's default field ascending.
pub struct OrderExpression<T> {
    descriptors: Vec<SortDescriptor>,
    comparators: Vec<(Comparator<T>, SortDirection)>,
    fallback: bool,
}

impl<T: Entity> OrderExpression<T> {
    /// Parse a raw sort string against a registry
    pub fn parse(raw: &str, registry: &SortFieldRegistry<T>) -> Self {
        let mut descriptors = Vec::new();
        let mut comparators = Vec::new();

        for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let mut segments = token.split_whitespace();
            let Some(name) = segments.next() else {
                continue;
            };
            let direction = SortDirection::parse(segments.next());

            let Some(comparator) = registry.get(name) else {
                tracing::debug!(
                    entity = T::entity_name(),
                    field = %name,
                    "Dropping unknown sort field"
                );
                continue;
            };

            descriptors.push(SortDescriptor {
                field: name.to_lowercase(),
                direction,
            });
            comparators.push((comparator.clone(), direction));
        }

        if descriptors.is_empty() {
            return Self::fallback(registry);
        }

        Self {
            descriptors,
            comparators,
            fallback: false,
        }
    }

    /// The default ordering of a registry (default field ascending)
    pub fn fallback(registry: &SortFieldRegistry<T>) -> Self {
        let field = registry.default_field().to_string();
        let comparators = registry
            .get(&field)
            .map(|c| vec![(c.clone(), SortDirection::Ascending)])
            .unwrap_or_default();

        Self {
            descriptors: vec![SortDescriptor {
                field,
                direction: SortDirection::Ascending,
            }],
            comparators,
            fallback: true,
        }
    }

    /// Surviving sort keys, primary key first
    pub fn descriptors(&self) -> &[SortDescriptor] {
        &self.descriptors
    }

    /// Whether this is the fallback ordering
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// A single comparator applying every key in priority order
    pub fn comparator(&self) -> Comparator<T> {
        let keys = self.comparators.clone();
        Arc::new(move |a: &T, b: &T| {
            keys.iter()
                .map(|(compare, direction)| direction.apply(compare(a, b)))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        })
    }

    /// Order a queryable by this expression
    pub fn apply(&self, query: Queryable<T>) -> Queryable<T> {
        query.order_by(self.comparator())
    }
}

impl<T> fmt::Display for OrderExpression<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.descriptors.iter().map(|d| d.to_string()).collect();
        write!(f, "{}", keys.join(", "))
    }
}

impl<T> fmt::Debug for OrderExpression<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderExpression")
            .field("descriptors", &self.descriptors)
            .field("fallback", &self.fallback)
            .finish()
    }
}
