//! User account models.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::role::UserRole;

/// A user account row.
///
/// The password hash never leaves the backend: it is skipped during
/// serialization so a `User` can be returned from a handler directly.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: UserRole,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Deactivated accounts cannot log in.
    pub is_active: bool,
    pub is_verified: bool,
    /// Whether the profile is visible to other users.
    pub profile_public: bool,
}

/// The slice of a user returned by login/status responses.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UserSummary {
    pub id: i64,
    pub role: UserRole,
    pub name: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            role: user.role,
            name: user.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: 1,
            email: "a@b.c".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            role: UserRole::Candidate,
            name: "Ana".to_string(),
            phone: None,
            created_at: Utc::now(),
            is_active: true,
            is_verified: false,
            profile_public: true,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password_hash"));
    }
}
