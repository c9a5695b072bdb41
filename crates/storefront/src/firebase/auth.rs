//! Identity Toolkit REST client (email/password auth).
//!
//! Credential storage and verification live entirely in the hosted backend;
//! this client only relays sign-up/sign-in requests and decodes the result.
//! The server never sees a password hash.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use super::{ErrorEnvelope, FirebaseError};
use crate::config::FirebaseConfig;

/// An authenticated identity, as returned by sign-up or sign-in.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    /// The backend-assigned user id (`uid` everywhere else).
    pub local_id: String,
    #[serde(default)]
    pub email: String,
    /// Short-lived ID token. Held only long enough to run the profile
    /// update that follows registration.
    #[serde(default)]
    pub id_token: String,
    #[serde(default)]
    pub display_name: String,
    /// Avatar URL, when one was set at registration.
    #[serde(default)]
    pub profile_picture: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProfileRequest<'a> {
    id_token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    photo_url: Option<&'a str>,
    return_secure_token: bool,
}

// =============================================================================
// IdentityClient
// =============================================================================

/// Client for the Identity Toolkit accounts surface.
#[derive(Clone)]
pub struct IdentityClient {
    inner: Arc<IdentityClientInner>,
}

struct IdentityClientInner {
    client: reqwest::Client,
    /// `{host}/v1/accounts`
    accounts_root: String,
    api_key: String,
}

impl IdentityClient {
    /// Create a new Identity Toolkit client.
    #[must_use]
    pub fn new(config: &FirebaseConfig) -> Self {
        let accounts_root = format!(
            "{}/v1/accounts",
            config.identity_host.trim_end_matches('/')
        );

        Self {
            inner: Arc::new(IdentityClientInner {
                client: reqwest::Client::new(),
                accounts_root,
                api_key: config.api_key.expose_secret().to_string(),
            }),
        }
    }

    async fn post<B: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        action: &str,
        body: &B,
    ) -> Result<T, FirebaseError> {
        let url = format!("{}:{}", self.inner.accounts_root, action);

        let response = self
            .inner
            .client
            .post(url)
            .query(&[("key", self.inner.api_key.as_str())])
            .json(body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(FirebaseError::RateLimited(retry_after));
        }

        let text = response.text().await?;

        if !status.is_success() {
            if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&text) {
                return Err(FirebaseError::Api(envelope.error));
            }
            warn!(
                status = %status,
                body = %text.chars().take(500).collect::<String>(),
                "Identity Toolkit returned non-success status with unparseable body"
            );
            return Err(FirebaseError::Decode(format!(
                "HTTP {status}: {}",
                text.chars().take(200).collect::<String>()
            )));
        }

        serde_json::from_str(&text).map_err(FirebaseError::Parse)
    }

    /// Create an account with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`FirebaseError::Api`] with `EMAIL_EXISTS` or `WEAK_PASSWORD`
    /// codes on rejection.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, FirebaseError> {
        self.post(
            "signUp",
            &PasswordRequest {
                email,
                password,
                return_secure_token: true,
            },
        )
        .await
    }

    /// Verify an email/password pair.
    ///
    /// # Errors
    ///
    /// Returns [`FirebaseError::Api`] with `EMAIL_NOT_FOUND`,
    /// `INVALID_PASSWORD` or `INVALID_LOGIN_CREDENTIALS` codes on rejection.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, FirebaseError> {
        self.post(
            "signInWithPassword",
            &PasswordRequest {
                email,
                password,
                return_secure_token: true,
            },
        )
        .await
    }

    /// Set the display name and photo URL on a fresh account.
    ///
    /// # Errors
    ///
    /// Returns an error if the update is rejected.
    #[instrument(skip(self, id_token))]
    pub async fn update_profile(
        &self,
        id_token: &str,
        display_name: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<(), FirebaseError> {
        let _: serde_json::Value = self
            .post(
                "update",
                &UpdateProfileRequest {
                    id_token,
                    display_name,
                    photo_url,
                    return_secure_token: false,
                },
            )
            .await?;
        Ok(())
    }
}
