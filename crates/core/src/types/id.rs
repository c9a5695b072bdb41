//! Newtype ids for type-safe document references.
//!
//! Use the `define_id!` macro to create type-safe id wrappers that prevent
//! accidentally mixing ids from different collections. Firestore assigns
//! opaque string ids, so the wrappers hold a `String` rather than an integer.

/// Macro to define a type-safe document id wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>` and `From<&str>` implementations
///
/// # Example
///
/// ```rust
/// # use samsa_market_core::define_id;
/// define_id!(RecipeId);
/// define_id!(UserId);
///
/// let recipe_id = RecipeId::new("a8F2kX");
/// let user_id = UserId::new("a8F2kX");
///
/// // These are different types, so this won't compile:
/// // let _: RecipeId = user_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new id from a string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying id as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the id and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard document ids
define_id!(RecipeId);
define_id!(UserId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_distinct_types() {
        let recipe = RecipeId::new("abc123");
        assert_eq!(recipe.as_str(), "abc123");
        assert_eq!(recipe.to_string(), "abc123");
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = UserId::new("u-42");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"u-42\"");

        let back: UserId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }

    #[test]
    fn test_id_ordering_is_lexicographic() {
        let a = RecipeId::new("a");
        let b = RecipeId::new("b");
        assert!(a < b);
    }
}
