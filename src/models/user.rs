// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! User model for storage and API.

use serde::{Deserialize, Serialize};
use serde_json::Value;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// User account stored in the `users` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// UUID (also used as document ID)
    pub id: String,
    /// Email address, unique across users
    pub email: String,
    /// Argon2 PHC hash of the password
    pub password_hash: String,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    /// Avatar URL
    pub profile_picture: String,
    /// Account creation (RFC 3339)
    pub created_at: String,
    /// Last modification (RFC 3339)
    pub updated_at: String,
    /// Free-form client data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorites: Option<Value>,
    /// Free-form client settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
}

/// Allow-listed profile changes. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub email: Option<String>,
    pub user_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_picture: Option<String>,
    pub favorites: Option<Value>,
    pub settings: Option<Value>,
}

impl User {
    /// Apply a patch and stamp `updated_at`.
    pub fn apply(&mut self, patch: UserPatch, now: String) {
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(user_name) = patch.user_name {
            self.user_name = user_name;
        }
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(profile_picture) = patch.profile_picture {
            self.profile_picture = profile_picture;
        }
        if patch.favorites.is_some() {
            self.favorites = patch.favorites;
        }
        if patch.settings.is_some() {
            self.settings = patch.settings;
        }
        self.updated_at = now;
    }
}

/// Public profile view. Excludes credentials, identifiers, and client data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Profile {
    pub email: String,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub profile_picture: String,
    pub created_at: String,
}

impl From<User> for Profile {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            user_name: user.user_name,
            first_name: user.first_name,
            last_name: user.last_name,
            profile_picture: user.profile_picture,
            created_at: user.created_at,
        }
    }
}

/// Listing view: the stored document minus its ID and password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserDocument {
    pub email: String,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub profile_picture: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorites: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
}

impl From<User> for UserDocument {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            user_name: user.user_name,
            first_name: user.first_name,
            last_name: user.last_name,
            profile_picture: user.profile_picture,
            created_at: user.created_at,
            updated_at: user.updated_at,
            favorites: user.favorites,
            settings: user.settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_user() -> User {
        User {
            id: "3f1c0e5e-8f43-4a4b-9a4e-0d7f8b1d2c3a".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            user_name: "ada".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            profile_picture: "https://example.com/a.png".to_string(),
            created_at: "2026-01-01T00:00:00Z".to_string(),
            updated_at: "2026-01-01T00:00:00Z".to_string(),
            favorites: Some(json!(["Golden Gate Bridge"])),
            settings: Some(json!({"theme": "dark"})),
        }
    }

    #[test]
    fn test_profile_excludes_sensitive_fields() {
        let value = serde_json::to_value(Profile::from(sample_user())).unwrap();
        let obj = value.as_object().unwrap();

        for field in ["id", "password_hash", "updated_at", "favorites", "settings"] {
            assert!(!obj.contains_key(field), "profile leaked {field}");
        }
        assert_eq!(obj["email"], "ada@example.com");
    }

    #[test]
    fn test_user_document_excludes_id_and_hash() {
        let value = serde_json::to_value(UserDocument::from(sample_user())).unwrap();
        let obj = value.as_object().unwrap();

        assert!(!obj.contains_key("id"));
        assert!(!obj.contains_key("password_hash"));
        assert_eq!(obj["settings"], json!({"theme": "dark"}));
    }

    #[test]
    fn test_apply_patch_only_touches_supplied_fields() {
        let mut user = sample_user();
        let patch = UserPatch {
            first_name: Some("Augusta".to_string()),
            settings: Some(json!({"theme": "light"})),
            ..Default::default()
        };

        user.apply(patch, "2026-02-02T00:00:00Z".to_string());

        assert_eq!(user.first_name, "Augusta");
        assert_eq!(user.last_name, "Lovelace");
        assert_eq!(user.settings, Some(json!({"theme": "light"})));
        assert_eq!(user.favorites, Some(json!(["Golden Gate Bridge"])));
        assert_eq!(user.updated_at, "2026-02-02T00:00:00Z");
    }
}
