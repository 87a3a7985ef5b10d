//! User records.
//!
//! The password is write-only: it is accepted on [`NewUser`] and stored, but
//! [`User`] has no password field, so no response can ever echo it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user, as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Serial identifier.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Email address (unique across users).
    pub email: String,
    /// Postal address.
    pub address: String,
    /// Phone number.
    pub phone: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a user.
///
/// Missing fields decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Password, stored as given.
    pub password: String,
    /// Postal address.
    pub address: String,
    /// Phone number.
    pub phone: String,
}

/// Request body for overwriting a user's profile fields.
///
/// The password is not updatable through this shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserUpdate {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Postal address.
    pub address: String,
    /// Phone number.
    pub phone: String,
}

impl User {
    /// Build a user record from a creation request and store-assigned fields.
    #[must_use]
    pub fn from_new(
        id: i32,
        new: &NewUser,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: new.name.clone(),
            email: new.email.clone(),
            address: new.address.clone(),
            phone: new.phone.clone(),
            created_at,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_json_never_contains_password() {
        let new = NewUser {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "hunter2".into(),
            address: "1 Main St".into(),
            phone: "+1-555-0100".into(),
        };
        let user = User::from_new(7, &new, Utc::now(), Utc::now());

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "ada@example.com");
    }

    #[test]
    fn new_user_missing_fields_default_to_empty() {
        let new: NewUser = serde_json::from_str(r#"{"name":"Bob"}"#).unwrap();
        assert_eq!(new.name, "Bob");
        assert!(new.password.is_empty());
        assert!(new.phone.is_empty());
    }

    #[test]
    fn new_user_rejects_wrong_types() {
        let result = serde_json::from_str::<NewUser>(r#"{"name": 12}"#);
        assert!(result.is_err());
    }
}
