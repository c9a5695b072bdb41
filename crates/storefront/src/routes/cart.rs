//! Cart route handlers.
//!
//! Every mutation applies to the session mapping first, then mirrors to the
//! user's remote cart document. A failed mirror is reported as a `warning`
//! on an otherwise-successful response; the local change stands.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use samsa_market_core::{Cart, Decremented, Recipe, RecipeId};

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::session_keys;
use crate::services::CartService;
use crate::state::AppState;

/// Cart item display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub id: String,
    pub title: String,
    pub count: u32,
    pub price: String,
    pub line_price: String,
    pub image: Option<String>,
}

impl CartItemView {
    fn new(recipe: &Recipe, count: u32) -> Self {
        Self {
            id: recipe.id.to_string(),
            title: recipe.title.clone(),
            count,
            price: recipe.price.to_string(),
            line_price: format_amount(recipe.price.times(count)),
            image: recipe.image_urls.first().cloned(),
        }
    }
}

/// Full cart display data.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    /// Distinct entries (the badge count).
    pub item_count: usize,
    pub subtotal: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl CartView {
    /// An empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            item_count: 0,
            subtotal: "$0.00".to_string(),
            warning: None,
        }
    }

    fn from_items(items: &[(Recipe, u32)]) -> Self {
        let subtotal: Decimal = items
            .iter()
            .map(|(recipe, count)| recipe.price.times(*count))
            .sum();

        Self {
            items: items
                .iter()
                .map(|(recipe, count)| CartItemView::new(recipe, *count))
                .collect(),
            item_count: items.len(),
            subtotal: format_amount(subtotal),
            warning: None,
        }
    }
}

/// Response to a cart mutation.
#[derive(Debug, Serialize)]
pub struct CartUpdateView {
    /// Distinct entries after the mutation.
    pub item_count: usize,
    /// The mutated entry's count, when it still exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Cart count badge response.
#[derive(Debug, Serialize)]
pub struct CartCountView {
    pub count: usize,
}

/// Cart mutation request body.
#[derive(Debug, Deserialize)]
pub struct CartItemRequest {
    pub recipe_id: String,
}

fn format_amount(amount: Decimal) -> String {
    format!("${amount:.2}")
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart mapping from the session.
async fn get_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(session_keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Save the cart mapping to the session.
async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session
        .insert(session_keys::CART, cart)
        .await
        .map_err(|e| AppError::Internal(format!("failed to save cart to session: {e}")))
}

/// Run a remote mirror write, converting failure into a warning.
fn mirror_warning(result: std::result::Result<(), crate::firebase::FirebaseError>) -> Option<String> {
    match result {
        Ok(()) => None,
        Err(e) => {
            tracing::warn!(error = %e, "Cart mirror write failed; keeping local state");
            Some("Cart could not be synced to your account".to_string())
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Materialize the cart: rebuild the session mapping from the remote
/// document and resolve entries against the catalog.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<Json<CartView>> {
    let service = CartService::new(state.firestore());

    match service.load(&user.uid).await {
        Ok(loaded) => {
            save_cart(&session, &loaded.cart).await?;
            Ok(Json(CartView::from_items(&loaded.items)))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load cart; serving empty");
            let mut view = CartView::empty();
            view.warning = Some("Cart could not be loaded".to_string());
            Ok(Json(view))
        }
    }
}

/// Add an item to the cart.
///
/// Absent entries are inserted with count 1; present entries are
/// incremented. The recipe must still exist in the catalog.
#[instrument(skip(state, session, body))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Json(body): Json<CartItemRequest>,
) -> Result<Json<CartUpdateView>> {
    let recipe_id = RecipeId::new(body.recipe_id);
    let recipe = state
        .firestore()
        .try_get_recipe(&recipe_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("recipe {recipe_id}")))?;

    // Optimistic local update first
    let mut cart = get_cart(&session).await;
    let quantity = cart.add(recipe_id);
    save_cart(&session, &cart).await?;

    let service = CartService::new(state.firestore());
    let warning = mirror_warning(service.remote_add(&user.uid, &recipe).await);

    Ok(Json(CartUpdateView {
        item_count: cart.len(),
        quantity: Some(quantity),
        warning,
    }))
}

/// Remove an item from the cart entirely.
#[instrument(skip(state, session, body))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Json(body): Json<CartItemRequest>,
) -> Result<Json<CartUpdateView>> {
    let recipe_id = RecipeId::new(body.recipe_id);

    let mut cart = get_cart(&session).await;
    cart.remove(&recipe_id);
    save_cart(&session, &cart).await?;

    let service = CartService::new(state.firestore());
    let warning = mirror_warning(service.remote_remove(&user.uid, &recipe_id).await);

    Ok(Json(CartUpdateView {
        item_count: cart.len(),
        quantity: None,
        warning,
    }))
}

/// Increase an item's count by one. A no-op when the item is absent.
#[instrument(skip(state, session, body))]
pub async fn increment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Json(body): Json<CartItemRequest>,
) -> Result<Json<CartUpdateView>> {
    let recipe_id = RecipeId::new(body.recipe_id);

    let mut cart = get_cart(&session).await;
    let quantity = cart.increment(&recipe_id);
    save_cart(&session, &cart).await?;

    let warning = if quantity.is_some() {
        let service = CartService::new(state.firestore());
        mirror_warning(service.remote_increment(&user.uid, &recipe_id).await)
    } else {
        None
    };

    Ok(Json(CartUpdateView {
        item_count: cart.len(),
        quantity,
        warning,
    }))
}

/// Decrease an item's count by one; a count of 1 removes the entry.
#[instrument(skip(state, session, body))]
pub async fn decrement(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Json(body): Json<CartItemRequest>,
) -> Result<Json<CartUpdateView>> {
    let recipe_id = RecipeId::new(body.recipe_id);

    let mut cart = get_cart(&session).await;
    let outcome = cart.decrement(&recipe_id);
    save_cart(&session, &cart).await?;

    let warning = match outcome {
        Decremented::Absent => None,
        Decremented::To(_) | Decremented::Removed => {
            let service = CartService::new(state.firestore());
            mirror_warning(service.remote_decrement(&user.uid, &recipe_id).await)
        }
    };

    let quantity = match outcome {
        Decremented::To(count) => Some(count),
        Decremented::Removed | Decremented::Absent => None,
    };

    Ok(Json(CartUpdateView {
        item_count: cart.len(),
        quantity,
        warning,
    }))
}

/// Distinct-entry badge count from the session mapping.
#[instrument(skip(session))]
pub async fn count(RequireAuth(_user): RequireAuth, session: Session) -> Json<CartCountView> {
    let cart = get_cart(&session).await;
    Json(CartCountView { count: cart.len() })
}
