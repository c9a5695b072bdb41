//! Authentication error types.

use thiserror::Error;

use samsa_market_core::EmailError;

use crate::firebase::FirebaseError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email format is invalid.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Email/password combination rejected by the backend.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// An account with this email already exists.
    #[error("User already exists")]
    UserAlreadyExists,

    /// The backend rejected the password as too weak.
    #[error("Weak password: {0}")]
    WeakPassword(String),

    /// Backend request failed.
    #[error("Firebase error: {0}")]
    Firebase(#[from] FirebaseError),
}
