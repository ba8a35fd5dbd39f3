use serde::{Deserialize, Serialize};

use super::Timestamp;

/// Number of id characters shown when a user has no email.
const ID_PREFIX_LEN: usize = 4;

/// Identity record owned by the hosted auth service.
///
/// The storefront only needs `id` and `email`; everything else the backend
/// attaches is kept verbatim in `user_metadata`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    /// Backend-assigned user id.
    pub id: String,

    /// Email address, when the account has one.
    #[serde(default)]
    pub email: Option<String>,

    /// Free-form profile data set at sign-up.
    #[serde(default)]
    pub user_metadata: serde_json::Value,

    /// When the account was created.
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl UserRecord {
    /// Create a record with only an id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
            user_metadata: serde_json::Value::Null,
            created_at: None,
        }
    }

    /// Create a record with an id and an email.
    pub fn with_email(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::with_id(id)
        }
    }
}

/// Name shown in the storefront header.
///
/// Uses the local part of the email, then a short id-based fallback, then
/// `Guest` when nobody is signed in.
pub fn display_name(user: Option<&UserRecord>) -> String {
    let Some(user) = user else {
        return "Guest".to_string();
    };

    if let Some(local) = user
        .email
        .as_deref()
        .and_then(|email| email.split('@').next())
        .filter(|local| !local.is_empty())
    {
        return local.to_string();
    }

    if user.id.is_empty() {
        return "Guest".to_string();
    }

    let prefix: String = user.id.chars().take(ID_PREFIX_LEN).collect();
    format!("User-{prefix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_uses_email_local_part() {
        let user = UserRecord::with_email("1", "a@b.com");
        assert_eq!(display_name(Some(&user)), "a");
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let user = UserRecord::with_id("1234567");
        assert_eq!(display_name(Some(&user)), "User-1234");
    }

    #[test]
    fn test_display_name_guest() {
        assert_eq!(display_name(None), "Guest");
    }

    #[test]
    fn test_display_name_short_id() {
        let user = UserRecord::with_id("ab");
        assert_eq!(display_name(Some(&user)), "User-ab");
    }

    /// An email without a local part is no better than no email.
    #[test]
    fn test_display_name_empty_local_part() {
        let user = UserRecord::with_email("98765", "@example.com");
        assert_eq!(display_name(Some(&user)), "User-9876");
    }

    #[test]
    fn test_user_record_deserializes_backend_shape() {
        let json = r#"{
            "id": "f47ac10b-58cc-4372-a567-0e02b2c3d479",
            "aud": "authenticated",
            "email": "owner@pizza.test",
            "user_metadata": {"role": "owner"},
            "created_at": "2024-05-01T12:00:00Z"
        }"#;
        let user: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(user.email.as_deref(), Some("owner@pizza.test"));
        assert_eq!(user.user_metadata["role"], "owner");
        assert!(user.created_at.is_some());
    }
}
