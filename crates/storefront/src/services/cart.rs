//! Cart reconciliation between the session mapping and the remote document.
//!
//! The session holds the authoritative cart between loads; every mutation
//! is mirrored to the user's `cart/{uid}` document as a single
//! read-modify-write of the affected entry. The remote document becomes
//! authoritative exactly once per session, when [`CartService::load`]
//! rebuilds the mapping from it.
//!
//! Remote writes are optimistic: handlers apply the local change first and
//! surface a mirror failure as a warning, never a rollback.

use tracing::instrument;

use samsa_market_core::{Cart, Recipe, RecipeId, UserId};

use crate::firebase::{FirebaseError, FirestoreClient, convert};

/// A cart materialized for display: each surviving entry resolved against
/// the catalog, plus the rebuilt mapping.
#[derive(Debug, Default)]
pub struct LoadedCart {
    /// The rebuilt quantity mapping.
    pub cart: Cart,
    /// Entries resolved to their catalog recipes, in id order.
    pub items: Vec<(Recipe, u32)>,
}

/// Cart reconciliation service.
pub struct CartService<'a> {
    firestore: &'a FirestoreClient,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(firestore: &'a FirestoreClient) -> Self {
        Self { firestore }
    }

    /// Mirror an add into the remote document.
    ///
    /// If the entry already exists its count is incremented; otherwise the
    /// recipe snapshot is merged under the entry key with count 1. Other
    /// entries are never touched.
    ///
    /// # Errors
    ///
    /// Returns an error if the read or the masked write fails.
    #[instrument(skip(self, recipe), fields(user_id = %user_id, recipe_id = %recipe.id))]
    pub async fn remote_add(&self, user_id: &UserId, recipe: &Recipe) -> Result<(), FirebaseError> {
        let doc = self.firestore.get_cart_document(user_id).await?;

        let entry = match doc
            .as_ref()
            .and_then(|d| d.fields.get(recipe.id.as_str()))
        {
            Some(existing) => {
                convert::entry_with_count(existing, convert::entry_count(existing) + 1)
            }
            None => convert::cart_entry_value(recipe, 1),
        };

        self.firestore
            .set_cart_entry(user_id, &recipe.id, entry)
            .await
    }

    /// Mirror an increment into the remote document.
    ///
    /// A missing document or entry makes this a no-op, mirroring the local
    /// rule that incrementing an absent entry does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the read or write fails.
    #[instrument(skip(self), fields(user_id = %user_id, recipe_id = %recipe_id))]
    pub async fn remote_increment(
        &self,
        user_id: &UserId,
        recipe_id: &RecipeId,
    ) -> Result<(), FirebaseError> {
        let Some(doc) = self.firestore.get_cart_document(user_id).await? else {
            return Ok(());
        };
        let Some(existing) = doc.fields.get(recipe_id.as_str()) else {
            return Ok(());
        };

        let bumped = convert::entry_with_count(existing, convert::entry_count(existing) + 1);
        self.firestore
            .set_cart_entry(user_id, recipe_id, bumped)
            .await
    }

    /// Mirror a decrement into the remote document.
    ///
    /// A count above 1 is decremented in place; a count of 1 deletes the
    /// entry field entirely (zero-quantity entries do not exist).
    ///
    /// # Errors
    ///
    /// Returns an error if the read or write fails.
    #[instrument(skip(self), fields(user_id = %user_id, recipe_id = %recipe_id))]
    pub async fn remote_decrement(
        &self,
        user_id: &UserId,
        recipe_id: &RecipeId,
    ) -> Result<(), FirebaseError> {
        let Some(doc) = self.firestore.get_cart_document(user_id).await? else {
            return Ok(());
        };
        let Some(existing) = doc.fields.get(recipe_id.as_str()) else {
            return Ok(());
        };

        let count = convert::entry_count(existing);
        if count > 1 {
            let lowered = convert::entry_with_count(existing, count - 1);
            self.firestore
                .set_cart_entry(user_id, recipe_id, lowered)
                .await
        } else {
            self.firestore.delete_cart_entry(user_id, recipe_id).await
        }
    }

    /// Mirror a removal into the remote document (field delete).
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    #[instrument(skip(self), fields(user_id = %user_id, recipe_id = %recipe_id))]
    pub async fn remote_remove(
        &self,
        user_id: &UserId,
        recipe_id: &RecipeId,
    ) -> Result<(), FirebaseError> {
        self.firestore.delete_cart_entry(user_id, recipe_id).await
    }

    /// Rebuild the cart from the remote document.
    ///
    /// Translates the document's key set into entries, resolves each key
    /// against the recipe collection for display data, and silently drops
    /// entries whose recipe has been deleted from the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart document fetch or a catalog read fails
    /// with anything other than not-found.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn load(&self, user_id: &UserId) -> Result<LoadedCart, FirebaseError> {
        let Some(doc) = self.firestore.get_cart_document(user_id).await? else {
            return Ok(LoadedCart::default());
        };

        let mut items = Vec::new();
        for (recipe_id, count) in convert::cart_entries_from_document(&doc) {
            match self.firestore.try_get_recipe(&recipe_id).await? {
                Some(recipe) => items.push((recipe, count)),
                None => {
                    tracing::debug!(
                        recipe_id = %recipe_id,
                        "Dropping cart entry for deleted recipe"
                    );
                }
            }
        }

        let cart: Cart = items
            .iter()
            .map(|(recipe, count)| (recipe.id.clone(), *count))
            .collect();

        Ok(LoadedCart { cart, items })
    }
}
