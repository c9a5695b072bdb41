//! Authentication service.
//!
//! Registration and login are fully delegated to the Identity Toolkit;
//! this service relays credentials, translates the backend's error codes,
//! and maintains the `users/{uid}` profile document. Password policy is
//! the backend's to enforce - `WEAK_PASSWORD` comes back as a typed error.

mod error;

pub use error::AuthError;

use chrono::Utc;
use tracing::instrument;

use samsa_market_core::{Email, UserId};

use crate::firebase::{FirebaseError, FirestoreClient, IdentityClient};
use crate::models::{CurrentUser, UserProfile};

/// Authentication service.
pub struct AuthService<'a> {
    firestore: &'a FirestoreClient,
    identity: &'a IdentityClient,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(firestore: &'a FirestoreClient, identity: &'a IdentityClient) -> Self {
        Self {
            firestore,
            identity,
        }
    }

    /// Register a new account with email and password.
    ///
    /// On success the display name and photo URL are attached to the
    /// identity and a profile document is written.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::UserAlreadyExists` if the email is registered.
    /// Returns `AuthError::WeakPassword` if the backend rejects the password.
    #[instrument(skip(self, password, photo_url))]
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        username: &str,
        photo_url: Option<&str>,
    ) -> Result<CurrentUser, AuthError> {
        // Validate email shape before any network call
        let email = Email::parse(email)?;

        let auth_user = self
            .identity
            .sign_up(email.as_str(), password)
            .await
            .map_err(map_identity_error)?;

        // Attach display data to the fresh identity
        self.identity
            .update_profile(&auth_user.id_token, Some(username), photo_url)
            .await
            .map_err(map_identity_error)?;

        let uid = UserId::new(auth_user.local_id);

        let profile = UserProfile {
            uid: uid.clone(),
            email: email.clone(),
            username: username.to_owned(),
            photo_url: photo_url.map(str::to_owned),
            created_at: Utc::now(),
        };
        self.firestore
            .put_user_profile(&uid, &profile.to_fields())
            .await?;

        Ok(CurrentUser {
            uid,
            email,
            username: username.to_owned(),
            photo_url: photo_url.map(str::to_owned),
        })
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<CurrentUser, AuthError> {
        // Validate email format
        let email = Email::parse(email)?;

        let auth_user = self
            .identity
            .sign_in(email.as_str(), password)
            .await
            .map_err(map_identity_error)?;

        Ok(CurrentUser {
            uid: UserId::new(auth_user.local_id),
            email,
            username: auth_user.display_name,
            photo_url: auth_user.profile_picture,
        })
    }
}

/// Translate Identity Toolkit error codes into typed auth errors.
fn map_identity_error(e: FirebaseError) -> AuthError {
    let FirebaseError::Api(api) = &e else {
        return AuthError::Firebase(e);
    };

    match api.identity_code() {
        "EMAIL_EXISTS" => AuthError::UserAlreadyExists,
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" | "USER_DISABLED" => {
            AuthError::InvalidCredentials
        }
        "WEAK_PASSWORD" => {
            let reason = api
                .message
                .split_once(':')
                .map_or("Password is too weak", |(_, r)| r.trim());
            AuthError::WeakPassword(reason.to_owned())
        }
        _ => AuthError::Firebase(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::firebase::ApiError;

    fn api_error(message: &str) -> FirebaseError {
        FirebaseError::Api(ApiError {
            code: 400,
            message: message.to_owned(),
            status: String::new(),
        })
    }

    #[test]
    fn test_email_exists_maps_to_conflict() {
        assert!(matches!(
            map_identity_error(api_error("EMAIL_EXISTS")),
            AuthError::UserAlreadyExists
        ));
    }

    #[test]
    fn test_bad_credentials_variants() {
        for code in ["EMAIL_NOT_FOUND", "INVALID_PASSWORD", "INVALID_LOGIN_CREDENTIALS"] {
            assert!(matches!(
                map_identity_error(api_error(code)),
                AuthError::InvalidCredentials
            ));
        }
    }

    #[test]
    fn test_weak_password_carries_reason() {
        let err = map_identity_error(api_error(
            "WEAK_PASSWORD : Password should be at least 6 characters",
        ));
        match err {
            AuthError::WeakPassword(reason) => {
                assert_eq!(reason, "Password should be at least 6 characters");
            }
            other => panic!("expected WeakPassword, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_code_passes_through() {
        assert!(matches!(
            map_identity_error(api_error("OPERATION_NOT_ALLOWED")),
            AuthError::Firebase(_)
        ));
    }
}
