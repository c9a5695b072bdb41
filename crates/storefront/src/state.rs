//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::firebase::{FirestoreClient, IdentityClient};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the Firebase clients and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    firestore: FirestoreClient,
    identity: IdentityClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let firestore = FirestoreClient::new(&config.firebase);
        let identity = IdentityClient::new(&config.firebase);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                firestore,
                identity,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the Firestore client.
    #[must_use]
    pub fn firestore(&self) -> &FirestoreClient {
        &self.inner.firestore
    }

    /// Get a reference to the Identity Toolkit client.
    #[must_use]
    pub fn identity(&self) -> &IdentityClient {
        &self.inner.identity
    }
}
