//! Cache types for Firestore recipe reads.

use samsa_market_core::Recipe;

/// Cached value types.
///
/// Only catalog reads are cached; cart and user documents are mutable state
/// and always fetched fresh.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Recipe(Box<Recipe>),
    Recipes(Vec<Recipe>),
}
