//! Session-stored state.
//!
//! The session record carries three independent slices - the signed-in user
//! snapshot, the theme preference, and the cart quantity mapping. Handlers
//! read and write them under the keys in [`session_keys`].

use serde::{Deserialize, Serialize};

use samsa_market_core::{Email, UserId};

/// Session-stored user identity.
///
/// A snapshot of the authenticated identity, captured at login/registration
/// and held until logout. The backend remains the source of truth; this is
/// only what pages need to render an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Backend-assigned user id.
    pub uid: UserId,
    /// The account email.
    pub email: Email,
    /// Display name chosen at registration.
    pub username: String,
    /// Avatar URL chosen at registration.
    pub photo_url: Option<String>,
}

/// UI theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Synthwave,
}

impl Theme {
    /// Flip between the two themes.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Synthwave,
            Self::Synthwave => Self::Light,
        }
    }
}

/// Session keys for the stored slices.
pub mod session_keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the theme preference.
    pub const THEME: &str = "theme";

    /// Key for the local cart quantity mapping.
    pub const CART: &str = "cart";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Theme::Synthwave).expect("serialize"),
            "\"synthwave\""
        );
        let theme: Theme = serde_json::from_str("\"light\"").expect("deserialize");
        assert_eq!(theme, Theme::Light);
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Light.toggled(), Theme::Synthwave);
        assert_eq!(Theme::Synthwave.toggled(), Theme::Light);
    }
}
