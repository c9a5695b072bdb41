//! Authentication route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::auth::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::AuthService;
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    pub email: String,
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The signed-in user, as returned to the client.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub uid: String,
    pub email: String,
    pub username: String,
    pub photo_url: Option<String>,
}

impl From<&CurrentUser> for UserView {
    fn from(user: &CurrentUser) -> Self {
        Self {
            uid: user.uid.to_string(),
            email: user.email.to_string(),
            username: user.username.clone(),
            photo_url: user.photo_url.clone(),
        }
    }
}

/// Register a new account and establish a session.
#[instrument(skip(state, session, body))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserView>)> {
    let username = body.username.trim();
    if username.is_empty() {
        return Err(AppError::BadRequest("username cannot be empty".to_owned()));
    }

    let auth = AuthService::new(state.firestore(), state.identity());
    let user = auth
        .register(
            &body.email,
            &body.password,
            username,
            body.photo_url.as_deref(),
        )
        .await?;

    establish(&session, &user).await?;

    Ok((StatusCode::CREATED, Json(UserView::from(&user))))
}

/// Login and establish a session.
#[instrument(skip(state, session, body))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<Json<UserView>> {
    let auth = AuthService::new(state.firestore(), state.identity());
    let user = auth.login(&body.email, &body.password).await?;

    establish(&session, &user).await?;

    Ok(Json(UserView::from(&user)))
}

/// Clear the session user.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("failed to clear session: {e}")))?;
    clear_sentry_user();

    Ok(StatusCode::NO_CONTENT)
}

/// Store the user snapshot and rotate the session id.
async fn establish(session: &Session, user: &CurrentUser) -> Result<()> {
    set_current_user(session, user)
        .await
        .map_err(|e| AppError::Internal(format!("failed to save session: {e}")))?;

    // Fresh id on privilege change
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(format!("failed to cycle session id: {e}")))?;

    set_sentry_user(&user.uid, Some(user.email.as_str()));
    Ok(())
}
