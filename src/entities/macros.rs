//! Macros for reducing boilerplate when defining entities

/// Implement [`Entity`](crate::core::entity::Entity) for a struct
///
/// The schema expression is evaluated once and kept in a `OnceLock`. `key`
/// names the identifier field (any type implementing
/// [`EntityKey`](crate::core::entity::EntityKey)); `audit` optionally names
/// a flattened [`AuditFields`](crate::core::entity::AuditFields) field.
///
/// # Example
/// ```rust,ignore
/// impl_entity!(Pallet, key = id, audit = audit, schema = {
///     EntitySchema::builder("pallet")
///         .field(FieldDescriptor::new("label", FieldKind::Text).required())
///         .build()
/// });
/// ```
#[macro_export]
macro_rules! impl_entity {
    ($type:ty, key = $key:ident, audit = $audit:ident, schema = $schema:expr $(,)?) => {
        impl $crate::core::entity::Entity for $type {
            fn schema() -> &'static $crate::core::schema::EntitySchema {
                static SCHEMA: ::std::sync::OnceLock<$crate::core::schema::EntitySchema> =
                    ::std::sync::OnceLock::new();
                SCHEMA.get_or_init(|| $schema)
            }

            fn id(&self) -> Option<String> {
                $crate::core::entity::EntityKey::to_key(&self.$key)
            }

            fn audit(&self) -> Option<&$crate::core::entity::AuditFields> {
                Some(&self.$audit)
            }
        }
    };

    ($type:ty, key = $key:ident, schema = $schema:expr $(,)?) => {
        impl $crate::core::entity::Entity for $type {
            fn schema() -> &'static $crate::core::schema::EntitySchema {
                static SCHEMA: ::std::sync::OnceLock<$crate::core::schema::EntitySchema> =
                    ::std::sync::OnceLock::new();
                SCHEMA.get_or_init(|| $schema)
            }

            fn id(&self) -> Option<String> {
                $crate::core::entity::EntityKey::to_key(&self.$key)
            }
        }
    };
}
