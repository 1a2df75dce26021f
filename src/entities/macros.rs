//! Macros for reducing boilerplate when defining entities
//!
//! These macros generate the struct and the repetitive trait
//! implementations needed for each stored entity type.

/// Complete macro to create an entity with automatic trait implementations
///
/// Generates the struct (with an `id: Uuid` identity field followed by the
/// given fields), its [`Entity`](crate::core::entity::Entity) implementation
/// and two constructors: `new` (fresh identity) and `with_id`.
/// Fields are serialized in camelCase.
///
/// # Example
///
/// ```rust,ignore
/// use entity_query::prelude::*;
///
/// impl_entity!(
///     Company,
///     "company",
///     "companies",
///     {
///         name: String,
///         country: String,
///     }
/// );
///
/// let company = Company::new("Acme".to_string(), "New Zealand".to_string());
/// ```
#[macro_export]
macro_rules! impl_entity {
    (
        $type:ident,
        $entity_name:expr,
        $table_name:expr,
        {
            $( $(#[$field_meta:meta])* $field:ident : $field_type:ty ),* $(,)?
        }
    ) => {
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $type {
            /// Unique identifier for this entity
            pub id: ::uuid::Uuid,
            $( $(#[$field_meta])* pub $field : $field_type ),*
        }

        impl $crate::core::entity::Entity for $type {
            fn table_name() -> &'static str {
                $table_name
            }

            fn entity_name() -> &'static str {
                $entity_name
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }
        }

        impl $type {
            /// Create a new instance of this entity with a fresh identifier
            #[allow(clippy::too_many_arguments)]
            pub fn new($( $field: $field_type ),*) -> Self {
                Self::with_id(::uuid::Uuid::new_v4(), $( $field ),*)
            }

            /// Create an instance with a known identifier
            #[allow(clippy::too_many_arguments)]
            pub fn with_id(id: ::uuid::Uuid, $( $field: $field_type ),*) -> Self {
                Self {
                    id,
                    $( $field ),*
                }
            }
        }
    };
}
