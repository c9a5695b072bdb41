//! Account and preference route handlers.

use axum::Json;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{Theme, session_keys};
use crate::routes::auth::UserView;

/// Theme preference payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct PreferencesView {
    pub theme: Theme,
}

/// The signed-in user's profile snapshot.
#[instrument]
pub async fn index(RequireAuth(user): RequireAuth) -> Json<UserView> {
    Json(UserView::from(&user))
}

/// Read the theme preference (defaults to light).
#[instrument(skip(session))]
pub async fn preferences(
    RequireAuth(_user): RequireAuth,
    session: Session,
) -> Json<PreferencesView> {
    let theme = session
        .get::<Theme>(session_keys::THEME)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();

    Json(PreferencesView { theme })
}

/// Update the theme preference.
#[instrument(skip(session, body))]
pub async fn update_preferences(
    RequireAuth(_user): RequireAuth,
    session: Session,
    Json(body): Json<PreferencesView>,
) -> Result<Json<PreferencesView>> {
    session
        .insert(session_keys::THEME, body.theme)
        .await
        .map_err(|e| AppError::Internal(format!("failed to save preference: {e}")))?;

    Ok(Json(PreferencesView { theme: body.theme }))
}
