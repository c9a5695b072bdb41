//! User profile document shape.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use samsa_market_core::{Email, UserId};

use crate::firebase::value::Value;

/// The `users/{uid}` profile document.
///
/// Written once at registration; the Identity Toolkit owns the credentials,
/// this document only carries display data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: UserId,
    pub email: Email,
    pub username: String,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Encode the profile as Firestore document fields.
    #[must_use]
    pub fn to_fields(&self) -> BTreeMap<String, Value> {
        let mut fields = BTreeMap::new();
        fields.insert("uid".to_owned(), Value::string(self.uid.as_str()));
        fields.insert("email".to_owned(), Value::string(self.email.as_str()));
        fields.insert("username".to_owned(), Value::string(&self.username));
        fields.insert(
            "photoUrl".to_owned(),
            self.photo_url
                .as_deref()
                .map_or(Value::Null(()), Value::string),
        );
        fields.insert("createdAt".to_owned(), Value::timestamp(self.created_at));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_fields() {
        let profile = UserProfile {
            uid: UserId::new("u1"),
            email: Email::parse("cook@example.com").expect("valid email"),
            username: "Cook".to_owned(),
            photo_url: None,
            created_at: DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp"),
        };

        let fields = profile.to_fields();
        assert_eq!(
            fields.get("username").and_then(Value::as_str),
            Some("Cook")
        );
        assert_eq!(fields.get("photoUrl"), Some(&Value::Null(())));
        assert!(matches!(fields.get("createdAt"), Some(Value::Timestamp(_))));
    }
}
