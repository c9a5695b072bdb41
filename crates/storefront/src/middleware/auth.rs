//! Authentication middleware and extractors.
//!
//! Provides extractors for requiring an established session in route
//! handlers. This is the server-side rendition of the original client's
//! protected route subtree: no user snapshot in the session, no access.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentUser, session_keys};

/// Extractor that requires a signed-in user.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Error returned when authentication is required but no user is signed in.
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "Sign in required" })),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts.extensions.get::<Session>().ok_or(AuthRejection)?;

        // Get the current user from the session
        let user: CurrentUser = session
            .get(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten()
            .ok_or(AuthRejection)?;

        Ok(Self(user))
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike `RequireAuth`, this does not reject the request if no user is
/// signed in.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentUser>(session_keys::CURRENT_USER)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(user))
    }
}

/// Helper to set the current user in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Helper to clear the current user from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}
