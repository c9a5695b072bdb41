//! Cloud Firestore REST client.
//!
//! Speaks the Firestore v1 document surface directly with `reqwest`.
//! Recipe reads are cached using `moka` (5-minute TTL); cart and user
//! documents are mutable state and always fetched fresh.
//!
//! Merge-vs-overwrite is expressed through update masks: a PATCH with
//! `updateMask.fieldPaths` touches only the named fields, and a masked
//! field that is absent from the body is deleted - which is how cart
//! entries are removed.

mod cache;
pub mod convert;
pub mod value;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use samsa_market_core::{NewRecipe, Recipe, RecipeId, UserId};

use super::{ErrorEnvelope, FirebaseError};
use crate::config::FirebaseConfig;
use cache::CacheValue;
use value::Value;

/// Catalog collection.
pub const COLLECTION_RECIPE: &str = "recipe";
/// Per-user cart documents, keyed by user id.
pub const COLLECTION_CART: &str = "cart";
/// Per-user profile documents, keyed by user id.
pub const COLLECTION_USERS: &str = "users";

/// Page size for collection listing.
const LIST_PAGE_SIZE: u32 = 300;

/// A Firestore document as returned by the REST surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Full resource name
    /// (`projects/{p}/databases/{db}/documents/{collection}/{id}`).
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

impl Document {
    /// The document id (last segment of the resource name).
    #[must_use]
    pub fn doc_id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    documents: Vec<Document>,
    next_page_token: Option<String>,
}

#[derive(Serialize)]
struct WriteBody<'a> {
    fields: &'a BTreeMap<String, Value>,
}

// =============================================================================
// FirestoreClient
// =============================================================================

/// Client for the Firestore document surface.
///
/// Cheaply cloneable; all shared state lives behind an `Arc`.
#[derive(Clone)]
pub struct FirestoreClient {
    inner: Arc<FirestoreClientInner>,
}

struct FirestoreClientInner {
    client: reqwest::Client,
    /// `{host}/v1/projects/{p}/databases/{db}/documents`
    documents_root: String,
    api_key: String,
    cache: Cache<String, CacheValue>,
}

impl FirestoreClient {
    /// Create a new Firestore client.
    #[must_use]
    pub fn new(config: &FirebaseConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let documents_root = format!(
            "{}/v1/projects/{}/databases/{}/documents",
            config.firestore_host.trim_end_matches('/'),
            config.project_id,
            config.database,
        );

        Self {
            inner: Arc::new(FirestoreClientInner {
                client: reqwest::Client::new(),
                documents_root,
                api_key: config.api_key.expose_secret().to_string(),
                cache,
            }),
        }
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!(
            "{}/{}/{}",
            self.inner.documents_root,
            collection,
            urlencoding::encode(id)
        )
    }

    /// Decode a response, translating error payloads into [`FirebaseError`].
    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, FirebaseError> {
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(FirebaseError::RateLimited(retry_after));
        }

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&body) {
                if envelope.error.status == "NOT_FOUND" {
                    return Err(FirebaseError::NotFound(envelope.error.message));
                }
                return Err(FirebaseError::Api(envelope.error));
            }
            warn!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Firestore returned non-success status with unparseable body"
            );
            return Err(FirebaseError::Decode(format!(
                "HTTP {status}: {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse Firestore response"
            );
            FirebaseError::Parse(e)
        })
    }

    // =========================================================================
    // Raw document operations
    // =========================================================================

    /// Fetch a document by collection and id.
    ///
    /// # Errors
    ///
    /// Returns [`FirebaseError::NotFound`] when the document does not exist.
    #[instrument(skip(self), fields(collection = %collection, id = %id))]
    pub async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Document, FirebaseError> {
        let response = self
            .inner
            .client
            .get(self.document_url(collection, id))
            .query(&[("key", self.inner.api_key.as_str())])
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Fetch a document, mapping not-found to `None`.
    ///
    /// # Errors
    ///
    /// Returns any error other than not-found.
    pub async fn try_get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, FirebaseError> {
        match self.get_document(collection, id).await {
            Ok(doc) => Ok(Some(doc)),
            Err(FirebaseError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Create a document with a backend-assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    #[instrument(skip(self, fields), fields(collection = %collection))]
    pub async fn create_document(
        &self,
        collection: &str,
        fields: &BTreeMap<String, Value>,
    ) -> Result<Document, FirebaseError> {
        let url = format!("{}/{}", self.inner.documents_root, collection);
        let response = self
            .inner
            .client
            .post(url)
            .query(&[("key", self.inner.api_key.as_str())])
            .json(&WriteBody { fields })
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Patch only the masked fields of a document, creating it if absent.
    ///
    /// A field named in `mask` but absent from `fields` is deleted. Unmasked
    /// fields are left untouched, which makes this the merge primitive.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    #[instrument(skip(self, fields), fields(collection = %collection, id = %id))]
    pub async fn patch_fields(
        &self,
        collection: &str,
        id: &str,
        fields: &BTreeMap<String, Value>,
        mask: &[&str],
    ) -> Result<Document, FirebaseError> {
        let mut query: Vec<(&str, String)> = vec![("key", self.inner.api_key.clone())];
        for path in mask {
            query.push(("updateMask.fieldPaths", quote_field_path(path)));
        }

        let response = self
            .inner
            .client
            .patch(self.document_url(collection, id))
            .query(&query)
            .json(&WriteBody { fields })
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Overwrite a document wholesale (no mask).
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    #[instrument(skip(self, fields), fields(collection = %collection, id = %id))]
    pub async fn set_document(
        &self,
        collection: &str,
        id: &str,
        fields: &BTreeMap<String, Value>,
    ) -> Result<Document, FirebaseError> {
        let response = self
            .inner
            .client
            .patch(self.document_url(collection, id))
            .query(&[("key", self.inner.api_key.as_str())])
            .json(&WriteBody { fields })
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Delete a document. Deleting an absent document succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(collection = %collection, id = %id))]
    pub async fn delete_document(&self, collection: &str, id: &str) -> Result<(), FirebaseError> {
        let response = self
            .inner
            .client
            .delete(self.document_url(collection, id))
            .query(&[("key", self.inner.api_key.as_str())])
            .send()
            .await?;

        // Firestore returns an empty JSON object on delete
        let _: serde_json::Value = Self::decode(response).await?;
        Ok(())
    }

    /// List every document in a collection, following pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    #[instrument(skip(self), fields(collection = %collection))]
    pub async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, FirebaseError> {
        let url = format!("{}/{}", self.inner.documents_root, collection);
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query: Vec<(&str, String)> = vec![
                ("key", self.inner.api_key.clone()),
                ("pageSize", LIST_PAGE_SIZE.to_string()),
            ];
            if let Some(token) = &page_token {
                query.push(("pageToken", token.clone()));
            }

            let response = self.inner.client.get(&url).query(&query).send().await?;
            let page: ListResponse = Self::decode(response).await?;

            documents.extend(page.documents);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(documents)
    }

    // =========================================================================
    // Recipe catalog (cached)
    // =========================================================================

    /// Get a recipe by id.
    ///
    /// # Errors
    ///
    /// Returns [`FirebaseError::NotFound`] if the recipe does not exist.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_recipe(&self, id: &RecipeId) -> Result<Recipe, FirebaseError> {
        let cache_key = format!("recipe:{id}");

        if let Some(CacheValue::Recipe(recipe)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for recipe");
            return Ok(*recipe);
        }

        let doc = self.get_document(COLLECTION_RECIPE, id.as_str()).await?;
        let recipe = convert::recipe_from_document(&doc)?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Recipe(Box::new(recipe.clone())))
            .await;

        Ok(recipe)
    }

    /// Get a recipe, mapping not-found to `None`.
    ///
    /// # Errors
    ///
    /// Returns any error other than not-found.
    pub async fn try_get_recipe(&self, id: &RecipeId) -> Result<Option<Recipe>, FirebaseError> {
        match self.get_recipe(id).await {
            Ok(recipe) => Ok(Some(recipe)),
            Err(FirebaseError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// List the full catalog.
    ///
    /// Documents that fail to decode are skipped with a warning rather than
    /// failing the whole listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing request fails.
    #[instrument(skip(self))]
    pub async fn list_recipes(&self) -> Result<Vec<Recipe>, FirebaseError> {
        let cache_key = "recipes:all".to_string();

        if let Some(CacheValue::Recipes(recipes)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for recipe listing");
            return Ok(recipes);
        }

        let documents = self.list_documents(COLLECTION_RECIPE).await?;
        let recipes: Vec<Recipe> = documents
            .iter()
            .filter_map(|doc| match convert::recipe_from_document(doc) {
                Ok(recipe) => Some(recipe),
                Err(e) => {
                    warn!(id = %doc.doc_id(), error = %e, "Skipping malformed recipe document");
                    None
                }
            })
            .collect();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Recipes(recipes.clone()))
            .await;

        Ok(recipes)
    }

    /// Create a catalog listing, returning it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    #[instrument(skip(self, recipe))]
    pub async fn create_recipe(&self, recipe: NewRecipe) -> Result<Recipe, FirebaseError> {
        let fields = convert::new_recipe_fields(&recipe);
        let doc = self.create_document(COLLECTION_RECIPE, &fields).await?;

        self.invalidate_recipe_listing().await;

        Ok(recipe.with_id(RecipeId::new(doc.doc_id())))
    }

    /// Delete a catalog listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_recipe(&self, id: &RecipeId) -> Result<(), FirebaseError> {
        self.delete_document(COLLECTION_RECIPE, id.as_str()).await?;

        self.inner.cache.invalidate(&format!("recipe:{id}")).await;
        self.invalidate_recipe_listing().await;

        Ok(())
    }

    async fn invalidate_recipe_listing(&self) {
        self.inner.cache.invalidate(&"recipes:all".to_string()).await;
    }

    // =========================================================================
    // Cart documents (not cached - mutable state)
    // =========================================================================

    /// Fetch the user's cart document, if one exists.
    ///
    /// # Errors
    ///
    /// Returns any error other than not-found.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get_cart_document(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Document>, FirebaseError> {
        self.try_get_document(COLLECTION_CART, user_id.as_str()).await
    }

    /// Merge one cart entry under the user's cart document.
    ///
    /// Creates the document when absent; other entries are untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    #[instrument(skip(self, entry), fields(user_id = %user_id, recipe_id = %recipe_id))]
    pub async fn set_cart_entry(
        &self,
        user_id: &UserId,
        recipe_id: &RecipeId,
        entry: Value,
    ) -> Result<(), FirebaseError> {
        let mut fields = BTreeMap::new();
        fields.insert(recipe_id.as_str().to_owned(), entry);

        self.patch_fields(
            COLLECTION_CART,
            user_id.as_str(),
            &fields,
            &[recipe_id.as_str()],
        )
        .await?;
        Ok(())
    }

    /// Delete one entry from the user's cart document.
    ///
    /// Issued as a masked patch with the field absent from the body.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    #[instrument(skip(self), fields(user_id = %user_id, recipe_id = %recipe_id))]
    pub async fn delete_cart_entry(
        &self,
        user_id: &UserId,
        recipe_id: &RecipeId,
    ) -> Result<(), FirebaseError> {
        let fields = BTreeMap::new();
        self.patch_fields(
            COLLECTION_CART,
            user_id.as_str(),
            &fields,
            &[recipe_id.as_str()],
        )
        .await?;
        Ok(())
    }

    // =========================================================================
    // User profiles
    // =========================================================================

    /// Write the user's profile document (overwrite).
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    #[instrument(skip(self, fields), fields(user_id = %user_id))]
    pub async fn put_user_profile(
        &self,
        user_id: &UserId,
        fields: &BTreeMap<String, Value>,
    ) -> Result<(), FirebaseError> {
        self.set_document(COLLECTION_USERS, user_id.as_str(), fields)
            .await?;
        Ok(())
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// Probe backend reachability with a one-document listing request.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable.
    pub async fn ping(&self) -> Result<(), FirebaseError> {
        let url = format!("{}/{}", self.inner.documents_root, COLLECTION_RECIPE);
        let response = self
            .inner
            .client
            .get(url)
            .query(&[
                ("key", self.inner.api_key.as_str()),
                ("pageSize", "1"),
            ])
            .send()
            .await?;

        let _: ListResponse = Self::decode(response).await?;
        Ok(())
    }

    // =========================================================================
    // Cache management
    // =========================================================================

    /// Invalidate all cached catalog data.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

/// Quote a field path segment for `updateMask.fieldPaths`.
///
/// Simple identifiers pass through; anything else (Firestore auto-ids can
/// start with a digit or contain `-`) is wrapped in backticks with `\` and
/// `` ` `` escaped.
fn quote_field_path(name: &str) -> String {
    let simple = !name.is_empty()
        && name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

    if simple {
        name.to_owned()
    } else {
        let escaped = name.replace('\\', "\\\\").replace('`', "\\`");
        format!("`{escaped}`")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_id_from_resource_name() {
        let doc = Document {
            name: "projects/p/databases/(default)/documents/recipe/a8F2kX".to_owned(),
            fields: BTreeMap::new(),
            create_time: None,
            update_time: None,
        };
        assert_eq!(doc.doc_id(), "a8F2kX");
    }

    #[test]
    fn test_quote_field_path_simple() {
        assert_eq!(quote_field_path("count"), "count");
        assert_eq!(quote_field_path("_private"), "_private");
    }

    #[test]
    fn test_quote_field_path_leading_digit() {
        assert_eq!(quote_field_path("8f2kX"), "`8f2kX`");
    }

    #[test]
    fn test_quote_field_path_escapes_backticks() {
        assert_eq!(quote_field_path("we`ird"), "`we\\`ird`");
    }

    #[test]
    fn test_list_response_without_documents_key() {
        // An empty collection returns `{}` rather than an empty array.
        let page: ListResponse = serde_json::from_str("{}").expect("decode");
        assert!(page.documents.is_empty());
        assert!(page.next_page_token.is_none());
    }
}
