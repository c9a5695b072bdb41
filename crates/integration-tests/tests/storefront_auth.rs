//! Integration tests for authentication.
//!
//! These tests require:
//! - A running storefront (cargo run -p samsa-market-storefront)
//! - A reachable Firebase project or emulator pair
//!
//! Run with: cargo test -p samsa-market-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use samsa_market_integration_tests::{register_test_user, session_client, storefront_base_url};

#[tokio::test]
#[ignore = "Requires running storefront and Firebase backend"]
async fn test_health() {
    let client = session_client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("Failed to reach health endpoint");

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront and Firebase backend"]
async fn test_register_then_account() {
    let client = session_client();
    let base_url = storefront_base_url();

    let email = register_test_user(&client).await;

    let resp = client
        .get(format!("{base_url}/account"))
        .send()
        .await
        .expect("Failed to get account");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to read account body");
    assert_eq!(body["email"].as_str(), Some(email.as_str()));
    assert_eq!(body["username"].as_str(), Some("Integration Test"));
}

#[tokio::test]
#[ignore = "Requires running storefront and Firebase backend"]
async fn test_duplicate_registration_conflicts() {
    let client = session_client();
    let base_url = storefront_base_url();

    let email = register_test_user(&client).await;

    let resp = client
        .post(format!("{base_url}/auth/register"))
        .json(&json!({
            "username": "Integration Test",
            "email": email,
            "password": "it-Pa55word!",
        }))
        .send()
        .await
        .expect("Failed to send duplicate registration");

    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires running storefront and Firebase backend"]
async fn test_login_with_bad_password_rejected() {
    let client = session_client();
    let base_url = storefront_base_url();

    let email = register_test_user(&client).await;

    let fresh = session_client();
    let resp = fresh
        .post(format!("{base_url}/auth/login"))
        .json(&json!({
            "email": email,
            "password": "wrong-password",
        }))
        .send()
        .await
        .expect("Failed to send login");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running storefront and Firebase backend"]
async fn test_logout_ends_session() {
    let client = session_client();
    let base_url = storefront_base_url();

    register_test_user(&client).await;

    let resp = client
        .post(format!("{base_url}/auth/logout"))
        .send()
        .await
        .expect("Failed to logout");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .get(format!("{base_url}/account"))
        .send()
        .await
        .expect("Failed to get account");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running storefront and Firebase backend"]
async fn test_protected_routes_require_session() {
    let client = session_client();
    let base_url = storefront_base_url();

    for path in ["/recipes", "/cart", "/analytics/recipes", "/account"] {
        let resp = client
            .get(format!("{base_url}{path}"))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "path {path}");
    }
}
