//! Integration tests for Samsa Market.
//!
//! # Running Tests
//!
//! The tests drive a running storefront over HTTP and are `#[ignore]`d by
//! default. Start a storefront against a Firebase project (or the
//! emulators), then:
//!
//! ```bash
//! STOREFRONT_TEST_URL=http://localhost:3000 \
//!   cargo test -p samsa-market-integration-tests -- --ignored --test-threads=1
//! ```
//!
//! Single-threaded, because all tests share one client IP and the auth
//! endpoints are rate limited.
//!
//! # Test Categories
//!
//! - `storefront_auth` - Registration/login/logout round trips
//! - `storefront_recipes` - Catalog CRUD
//! - `storefront_cart` - Cart mutation sequences and reload semantics

use reqwest::Client;
use serde_json::{Value, json};

/// Base URL for the storefront (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_TEST_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A cookie-holding client, so the session survives across requests.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn session_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Register a throwaway account and leave the session signed in.
///
/// Returns the registered email.
///
/// # Panics
///
/// Panics if the registration request fails.
pub async fn register_test_user(client: &Client) -> String {
    let base_url = storefront_base_url();
    let email = format!("it-{}@example.com", uuid::Uuid::new_v4().simple());

    let resp = client
        .post(format!("{base_url}/auth/register"))
        .json(&json!({
            "username": "Integration Test",
            "email": email,
            "password": "it-Pa55word!",
        }))
        .send()
        .await
        .expect("Failed to register test user");
    assert!(
        resp.status().is_success(),
        "registration failed: {}",
        resp.status()
    );

    email
}

/// Create a listing and return its id.
///
/// # Panics
///
/// Panics if the create request fails.
pub async fn create_test_recipe(client: &Client, title: &str) -> String {
    let base_url = storefront_base_url();

    let resp = client
        .post(format!("{base_url}/recipes"))
        .json(&json!({
            "title": title,
            "cooking_time": 45,
            "ingredients": ["noodles", "beef"],
            "image_urls": [],
            "method": "Integration test recipe.",
            "nation": "Uyghur",
            "price": 9.5,
        }))
        .send()
        .await
        .expect("Failed to create test recipe");
    assert!(
        resp.status().is_success(),
        "recipe creation failed: {}",
        resp.status()
    );

    let body: Value = resp.json().await.expect("Failed to read recipe body");
    body["id"]
        .as_str()
        .expect("recipe response has no id")
        .to_owned()
}

/// Delete a listing, ignoring failures (best-effort cleanup).
pub async fn delete_test_recipe(client: &Client, id: &str) {
    let base_url = storefront_base_url();
    let _ = client
        .delete(format!("{base_url}/recipes/{id}"))
        .send()
        .await;
}
