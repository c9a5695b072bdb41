//! Recipe catalog route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use tracing::instrument;

use samsa_market_core::{Recipe, RecipeDraft, RecipeId};

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Catalog listing response.
#[derive(Debug, Serialize)]
pub struct RecipeListView {
    pub recipes: Vec<Recipe>,
}

/// List the catalog.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> Result<Json<RecipeListView>> {
    let recipes = state.firestore().list_recipes().await?;
    Ok(Json(RecipeListView { recipes }))
}

/// Show one listing.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Json<Recipe>> {
    let id = RecipeId::new(id);
    let recipe = state
        .firestore()
        .try_get_recipe(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("recipe {id}")))?;

    Ok(Json(recipe))
}

/// Create a listing from a submitted draft.
#[instrument(skip(state, draft))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(draft): Json<RecipeDraft>,
) -> Result<(StatusCode, Json<Recipe>)> {
    let new_recipe = draft
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let recipe = state.firestore().create_recipe(new_recipe).await?;

    Ok((StatusCode::CREATED, Json(recipe)))
}

/// Delete a listing.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = RecipeId::new(id);
    state.firestore().delete_recipe(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
