//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (pings Firestore)
//!
//! # Auth
//! POST /auth/register          - Email/password signup
//! POST /auth/login             - Email/password login
//! POST /auth/logout            - Clear the session user
//!
//! # Recipes (session required)
//! GET  /recipes                - Catalog listing
//! POST /recipes                - Create a listing
//! GET  /recipes/{id}           - Listing detail
//! DELETE /recipes/{id}         - Delete a listing
//!
//! # Cart (session required)
//! GET  /cart                   - Materialized cart (rebuilds from remote)
//! POST /cart/add               - Add an item
//! POST /cart/remove            - Remove an item
//! POST /cart/increment         - Increase an item's count by one
//! POST /cart/decrement         - Decrease by one; removes the entry at one
//! GET  /cart/count             - Distinct-entry badge count
//!
//! # Analytics (session required)
//! GET  /analytics/recipes      - Chart series (nation counts, cooking times)
//!
//! # Account (session required)
//! GET  /account                - Session user snapshot
//! GET  /account/preferences    - Theme preference
//! PUT  /account/preferences    - Update theme preference
//! ```

pub mod account;
pub mod analytics;
pub mod auth;
pub mod cart;
pub mod recipes;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        // Strict limiter on the credential endpoints only
        .layer(middleware::auth_rate_limiter())
        .route("/logout", post(auth::logout))
}

/// Create the recipe routes router.
pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(recipes::index).post(recipes::create))
        .route("/{id}", get(recipes::show).delete(recipes::delete))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/increment", post(cart::increment))
        .route("/decrement", post(cart::decrement))
        .route("/count", get(cart::count))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::index))
        .route(
            "/preferences",
            get(account::preferences).put(account::update_preferences),
        )
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Recipe routes
        .nest("/recipes", recipe_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Analytics
        .route("/analytics/recipes", get(analytics::recipes))
        // Account routes
        .nest("/account", account_routes())
        // General API limiter (auth routes carry their own stricter one)
        .layer(middleware::api_rate_limiter())
        // Auth routes
        .nest("/auth", auth_routes())
}
