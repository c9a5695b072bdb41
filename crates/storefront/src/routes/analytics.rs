//! Analytics route handlers.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::services::analytics::{
    CookingTimePoint, NationCount, cooking_time_series, nation_distribution,
};
use crate::state::AppState;

/// Chart series for the analytics page.
#[derive(Debug, Serialize)]
pub struct AnalyticsView {
    /// Recipe count per nation (pie chart).
    pub nations: Vec<NationCount>,
    /// Cooking time per recipe, ascending (bar chart).
    pub cooking_times: Vec<CookingTimePoint>,
}

/// Aggregate the catalog into the two chart series.
#[instrument(skip(state))]
pub async fn recipes(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> Result<Json<AnalyticsView>> {
    let recipes = state.firestore().list_recipes().await?;

    Ok(Json(AnalyticsView {
        nations: nation_distribution(&recipes),
        cooking_times: cooking_time_series(&recipes),
    }))
}
