//! Firebase REST clients: Cloud Firestore and the Identity Toolkit.
//!
//! # Architecture
//!
//! - Plain REST JSON via `reqwest` - no SDK, no local sync; Firestore is the
//!   source of truth and every call is a point request
//! - In-memory caching via `moka` for recipe reads (5 minute TTL); cart and
//!   user documents are never cached
//! - The Firestore emulator is supported by overriding the host in config
//!
//! # Surfaces
//!
//! ## Firestore (documents)
//! - Collections: `recipe` (catalog), `cart` (one document per user id),
//!   `users` (one profile document per user id)
//! - Merges and field deletes are expressed as masked patches
//!
//! ## Identity Toolkit (auth)
//! - Email/password sign-up and sign-in
//! - Profile updates (display name, photo URL)
//!
//! # Example
//!
//! ```rust,ignore
//! use samsa_market_storefront::firebase::FirestoreClient;
//!
//! let firestore = FirestoreClient::new(&config.firebase);
//!
//! // Read a recipe
//! let recipe = firestore.get_recipe(&recipe_id).await?;
//!
//! // Merge a cart entry under the user's cart document
//! firestore
//!     .set_cart_entry(&user_id, &recipe_id, convert::cart_entry_value(&recipe, 1))
//!     .await?;
//! ```

pub mod auth;
mod firestore;

pub use auth::IdentityClient;
pub use firestore::{Document, FirestoreClient, convert, value};

use thiserror::Error;

/// Errors that can occur when talking to the Firebase REST surfaces.
#[derive(Debug, Error)]
pub enum FirebaseError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a structured error payload.
    #[error("API error: {0}")]
    Api(ApiError),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Document not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// A document decoded to an unexpected shape.
    #[error("Malformed document: {0}")]
    Decode(String),
}

/// A `google.rpc`-style error payload, as returned by both surfaces.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ApiError {
    /// HTTP status code echoed in the body.
    #[serde(default)]
    pub code: u16,
    /// Human-readable message. The Identity Toolkit packs its error *code*
    /// in here (e.g. `EMAIL_EXISTS`, `WEAK_PASSWORD : ...`).
    #[serde(default)]
    pub message: String,
    /// Canonical status name (e.g. `NOT_FOUND`), when present.
    #[serde(default)]
    pub status: String,
}

impl ApiError {
    /// The leading error code token of an Identity Toolkit message.
    ///
    /// Messages look like `WEAK_PASSWORD : Password should be at least 6
    /// characters`; the part before the separator is the stable code.
    #[must_use]
    pub fn identity_code(&self) -> &str {
        self.message
            .split(&[' ', ':'][..])
            .next()
            .unwrap_or_default()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.status.is_empty() {
            write!(f, "{} ({})", self.message, self.code)
        } else {
            write!(f, "{} {}: {}", self.code, self.status, self.message)
        }
    }
}

/// Wire envelope for error payloads: `{"error": {...}}`.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ApiError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_firebase_error_display() {
        let err = FirebaseError::NotFound("recipe/abc123".to_string());
        assert_eq!(err.to_string(), "Not found: recipe/abc123");
    }

    #[test]
    fn test_api_error_display_with_status() {
        let err = ApiError {
            code: 404,
            message: "Document not found.".to_string(),
            status: "NOT_FOUND".to_string(),
        };
        assert_eq!(err.to_string(), "404 NOT_FOUND: Document not found.");
    }

    #[test]
    fn test_api_error_display_without_status() {
        let err = ApiError {
            code: 400,
            message: "EMAIL_EXISTS".to_string(),
            status: String::new(),
        };
        assert_eq!(err.to_string(), "EMAIL_EXISTS (400)");
    }

    #[test]
    fn test_identity_code_plain() {
        let err = ApiError {
            code: 400,
            message: "EMAIL_EXISTS".to_string(),
            status: String::new(),
        };
        assert_eq!(err.identity_code(), "EMAIL_EXISTS");
    }

    #[test]
    fn test_identity_code_with_reason() {
        let err = ApiError {
            code: 400,
            message: "WEAK_PASSWORD : Password should be at least 6 characters".to_string(),
            status: String::new(),
        };
        assert_eq!(err.identity_code(), "WEAK_PASSWORD");
    }

    #[test]
    fn test_error_envelope_decodes() {
        let json = r#"{"error":{"code":404,"message":"missing","status":"NOT_FOUND"}}"#;
        let envelope: ErrorEnvelope = serde_json::from_str(json).expect("decode");
        assert_eq!(envelope.error.code, 404);
        assert_eq!(envelope.error.status, "NOT_FOUND");
    }

    #[test]
    fn test_rate_limited_error() {
        let err = FirebaseError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }
}
