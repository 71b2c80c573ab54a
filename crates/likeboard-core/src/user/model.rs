//! Identity models: user ids, the bearer credential and the user profile.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Server-assigned user id. Marketers are users, so the same id space
/// identifies like targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Opaque bearer token authorizing API calls.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value of the `Authorization` header for this credential.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Profile of the authenticated user, as returned by login/registration.
///
/// Statistics are optional and merged in later through [`UserStatsPatch`].
/// Fields the client does not model are kept in `extra` so that a
/// persisted profile round-trips without losing server data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes_given: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes_received: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_likes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Shallow-merges the `Some` fields of `patch`; everything else is kept.
    pub fn apply_stats(&mut self, patch: &UserStatsPatch) {
        if let Some(given) = patch.likes_given {
            self.likes_given = Some(given);
        }
        if let Some(received) = patch.likes_received {
            self.likes_received = Some(received);
        }
        if let Some(remaining) = patch.remaining_likes {
            self.remaining_likes = Some(remaining);
        }
    }
}

/// Partial statistics merged into a [`UserProfile`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStatsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes_given: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes_received: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_likes: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile() -> UserProfile {
        serde_json::from_value(json!({
            "id": 7,
            "email": "ana@example.com",
            "first_name": "Ana",
            "last_name": "Gómez",
            "bio": null,
            "avatar": null,
            "has_liked": false,
            "created_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_profile_keeps_unknown_fields() {
        let profile = profile();
        assert_eq!(profile.id, UserId(7));
        assert_eq!(profile.full_name(), "Ana Gómez");
        assert!(profile.extra.contains_key("created_at"));

        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["created_at"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_apply_stats_is_shallow() {
        let mut profile = profile();
        profile.likes_received = Some(3);

        profile.apply_stats(&UserStatsPatch {
            likes_given: Some(2),
            remaining_likes: Some(3),
            ..Default::default()
        });

        assert_eq!(profile.likes_given, Some(2));
        assert_eq!(profile.remaining_likes, Some(3));
        assert_eq!(profile.likes_received, Some(3));
        assert_eq!(profile.email, "ana@example.com");
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::new("secret-token");
        assert!(!format!("{:?}", credential).contains("secret"));
        assert_eq!(credential.bearer(), "Bearer secret-token");
    }
}
