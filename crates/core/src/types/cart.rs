//! Per-user cart quantity mapping.
//!
//! [`Cart`] is the pure, in-memory half of the cart subsystem: an ordered
//! mapping of recipe id to a positive count. The storefront keeps one per
//! session and mirrors every mutation to the user's remote cart document;
//! this type knows nothing about that.
//!
//! Invariant: an entry exists iff its count is at least 1. Zero-quantity
//! entries do not exist - a decrement that would reach zero removes the
//! entry instead.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::RecipeId;

/// Outcome of [`Cart::decrement`], so callers can mirror the same change
/// to the remote document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decremented {
    /// The count dropped by one; the new count is given.
    To(u32),
    /// The count was 1, so the entry was removed.
    Removed,
    /// The id was not in the cart; nothing changed.
    Absent,
}

/// An ordered mapping of recipe id to quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: BTreeMap<RecipeId, u32>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one of `id` to the cart.
    ///
    /// Inserts with count 1 when absent; increments when present (every
    /// successful add is reflected in the count). Returns the new count.
    pub fn add(&mut self, id: RecipeId) -> u32 {
        let count = self.items.entry(id).or_insert(0);
        *count += 1;
        *count
    }

    /// Increment an existing entry by one.
    ///
    /// Returns the new count, or `None` if the id is not in the cart
    /// (incrementing an absent entry is a no-op, matching remove racing
    /// against a stale page).
    pub fn increment(&mut self, id: &RecipeId) -> Option<u32> {
        self.items.get_mut(id).map(|count| {
            *count += 1;
            *count
        })
    }

    /// Decrement an entry by one, removing it when the count would reach 0.
    pub fn decrement(&mut self, id: &RecipeId) -> Decremented {
        match self.items.get_mut(id) {
            Some(count) if *count > 1 => {
                *count -= 1;
                Decremented::To(*count)
            }
            Some(_) => {
                self.items.remove(id);
                Decremented::Removed
            }
            None => Decremented::Absent,
        }
    }

    /// Remove an entry entirely. Returns whether it was present.
    pub fn remove(&mut self, id: &RecipeId) -> bool {
        self.items.remove(id).is_some()
    }

    /// Replace the entire mapping from a loaded remote document.
    ///
    /// Counts of zero are dropped rather than stored, preserving the
    /// no-zero-entries invariant even against a corrupt document.
    pub fn replace(&mut self, entries: impl IntoIterator<Item = (RecipeId, u32)>) {
        self.items = entries
            .into_iter()
            .filter(|&(_, count)| count > 0)
            .collect();
    }

    /// The count for an id, if present.
    #[must_use]
    pub fn count(&self, id: &RecipeId) -> Option<u32> {
        self.items.get(id).copied()
    }

    /// Whether the id is in the cart.
    #[must_use]
    pub fn contains(&self, id: &RecipeId) -> bool {
        self.items.contains_key(id)
    }

    /// Number of distinct entries (the header badge count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&RecipeId, u32)> {
        self.items.iter().map(|(id, &count)| (id, count))
    }
}

impl FromIterator<(RecipeId, u32)> for Cart {
    fn from_iter<T: IntoIterator<Item = (RecipeId, u32)>>(iter: T) -> Self {
        let mut cart = Self::new();
        cart.replace(iter);
        cart
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> RecipeId {
        RecipeId::new(s)
    }

    #[test]
    fn test_add_absent_inserts_count_one() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(id("r1")), 1);
        assert_eq!(cart.count(&id("r1")), Some(1));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_add_present_increments_without_duplicate() {
        let mut cart = Cart::new();
        cart.add(id("r1"));
        assert_eq!(cart.add(id("r1")), 2);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.count(&id("r1")), Some(2));
    }

    #[test]
    fn test_increment_absent_is_noop() {
        let mut cart = Cart::new();
        assert_eq!(cart.increment(&id("ghost")), None);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_decrement_above_one() {
        let mut cart = Cart::new();
        cart.add(id("r1"));
        cart.add(id("r1"));
        assert_eq!(cart.decrement(&id("r1")), Decremented::To(1));
        assert_eq!(cart.count(&id("r1")), Some(1));
    }

    #[test]
    fn test_decrement_at_one_removes_entry() {
        let mut cart = Cart::new();
        cart.add(id("r1"));
        assert_eq!(cart.decrement(&id("r1")), Decremented::Removed);
        assert!(!cart.contains(&id("r1")));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_decrement_absent() {
        let mut cart = Cart::new();
        assert_eq!(cart.decrement(&id("r1")), Decremented::Absent);
    }

    #[test]
    fn test_count_never_zero_while_present() {
        // Drive a fresh entry through every sequence of inc/dec up to depth 6
        // and check the invariant after each step.
        fn walk(cart: &Cart, depth: u32) {
            if depth == 0 {
                return;
            }
            for op in 0..2 {
                let mut c = cart.clone();
                if op == 0 {
                    c.increment(&id("r1"));
                } else {
                    c.decrement(&id("r1"));
                }
                if let Some(count) = c.count(&id("r1")) {
                    assert!(count >= 1, "entry exists with count 0");
                }
                walk(&c, depth - 1);
            }
        }

        let mut cart = Cart::new();
        cart.add(id("r1"));
        walk(&cart, 6);
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        cart.add(id("r1"));
        assert!(cart.remove(&id("r1")));
        assert!(!cart.remove(&id("r1")));
    }

    #[test]
    fn test_replace_drops_zero_counts() {
        let mut cart = Cart::new();
        cart.add(id("stale"));
        cart.replace([(id("r1"), 2), (id("r2"), 0), (id("r3"), 1)]);
        assert_eq!(cart.len(), 2);
        assert!(!cart.contains(&id("stale")));
        assert!(!cart.contains(&id("r2")));
        assert_eq!(cart.count(&id("r1")), Some(2));
    }

    #[test]
    fn test_full_example_sequence() {
        // add(r1) -> {r1:1}; add(r1) -> {r1:2}; dec -> {r1:1}; dec -> {}
        let mut cart = Cart::new();
        assert_eq!(cart.add(id("r1")), 1);
        assert_eq!(cart.add(id("r1")), 2);
        assert_eq!(cart.decrement(&id("r1")), Decremented::To(1));
        assert_eq!(cart.decrement(&id("r1")), Decremented::Removed);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_serde_round_trip() {
        let mut cart = Cart::new();
        cart.add(id("r1"));
        cart.add(id("r1"));
        cart.add(id("r2"));

        let json = serde_json::to_string(&cart).expect("serialize");
        assert_eq!(json, r#"{"r1":2,"r2":1}"#);

        let back: Cart = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, cart);
    }
}
