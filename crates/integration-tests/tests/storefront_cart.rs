//! Integration tests for the cart subsystem.
//!
//! Exercises the sequence from the cart design: add, add again, decrement
//! twice back to empty, and removal staying removed across a reload.
//!
//! Run with: cargo test -p samsa-market-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use samsa_market_integration_tests::{
    create_test_recipe, delete_test_recipe, register_test_user, session_client,
    storefront_base_url,
};

async fn cart_post(client: &Client, action: &str, recipe_id: &str) -> Value {
    let base_url = storefront_base_url();
    let resp = client
        .post(format!("{base_url}/cart/{action}"))
        .json(&json!({ "recipe_id": recipe_id }))
        .send()
        .await
        .expect("Failed to send cart mutation");
    assert_eq!(resp.status(), StatusCode::OK, "cart {action} failed");
    resp.json().await.expect("Failed to read cart response")
}

async fn cart_show(client: &Client) -> Value {
    let base_url = storefront_base_url();
    let resp = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("Failed to get cart");
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("Failed to read cart")
}

#[tokio::test]
#[ignore = "Requires running storefront and Firebase backend"]
async fn test_add_increment_decrement_sequence() {
    let client = session_client();

    register_test_user(&client).await;
    let id = create_test_recipe(&client, "IT Cart Plov").await;

    // add -> {id: 1}
    let body = cart_post(&client, "add", &id).await;
    assert_eq!(body["quantity"].as_u64(), Some(1));
    assert_eq!(body["item_count"].as_u64(), Some(1));

    // add again -> {id: 2}, still one distinct entry
    let body = cart_post(&client, "add", &id).await;
    assert_eq!(body["quantity"].as_u64(), Some(2));
    assert_eq!(body["item_count"].as_u64(), Some(1));

    // decrement -> {id: 1}
    let body = cart_post(&client, "decrement", &id).await;
    assert_eq!(body["quantity"].as_u64(), Some(1));

    // decrement -> {} (entry removed exactly when count would reach 0)
    let body = cart_post(&client, "decrement", &id).await;
    assert!(body["quantity"].is_null());
    assert_eq!(body["item_count"].as_u64(), Some(0));

    delete_test_recipe(&client, &id).await;
}

#[tokio::test]
#[ignore = "Requires running storefront and Firebase backend"]
async fn test_cart_survives_reload() {
    let client = session_client();

    register_test_user(&client).await;
    let id = create_test_recipe(&client, "IT Cart Manti").await;

    cart_post(&client, "add", &id).await;
    cart_post(&client, "increment", &id).await;

    // Reload rebuilds from the remote document
    let cart = cart_show(&client).await;
    let items = cart["items"].as_array().expect("items array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["count"].as_u64(), Some(2));
    assert_eq!(items[0]["title"].as_str(), Some("IT Cart Manti"));

    delete_test_recipe(&client, &id).await;
}

#[tokio::test]
#[ignore = "Requires running storefront and Firebase backend"]
async fn test_removed_item_stays_removed_after_reload() {
    let client = session_client();

    register_test_user(&client).await;
    let id = create_test_recipe(&client, "IT Cart Samsa").await;

    cart_post(&client, "add", &id).await;
    let body = cart_post(&client, "remove", &id).await;
    assert_eq!(body["item_count"].as_u64(), Some(0));

    // Reload must not reintroduce the removed recipe
    let cart = cart_show(&client).await;
    assert_eq!(cart["item_count"].as_u64(), Some(0));
    assert!(cart["items"].as_array().expect("items array").is_empty());

    delete_test_recipe(&client, &id).await;
}

#[tokio::test]
#[ignore = "Requires running storefront and Firebase backend"]
async fn test_deleted_recipe_dropped_from_cart_on_reload() {
    let client = session_client();

    register_test_user(&client).await;
    let id = create_test_recipe(&client, "IT Cart Ghost").await;

    cart_post(&client, "add", &id).await;

    // Delete the catalog entry while it is in the cart
    delete_test_recipe(&client, &id).await;

    // The stale entry is silently dropped on reload
    let cart = cart_show(&client).await;
    assert!(cart["items"].as_array().expect("items array").is_empty());
}

#[tokio::test]
#[ignore = "Requires running storefront and Firebase backend"]
async fn test_count_badge_counts_distinct_entries() {
    let client = session_client();
    let base_url = storefront_base_url();

    register_test_user(&client).await;
    let first = create_test_recipe(&client, "IT Badge One").await;
    let second = create_test_recipe(&client, "IT Badge Two").await;

    cart_post(&client, "add", &first).await;
    cart_post(&client, "add", &first).await;
    cart_post(&client, "add", &second).await;

    let resp = client
        .get(format!("{base_url}/cart/count"))
        .send()
        .await
        .expect("Failed to get cart count");
    let body: Value = resp.json().await.expect("Failed to read count");

    // Two distinct entries, regardless of quantities
    assert_eq!(body["count"].as_u64(), Some(2));

    delete_test_recipe(&client, &first).await;
    delete_test_recipe(&client, &second).await;
}
