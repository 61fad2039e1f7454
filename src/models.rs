//! Frontend Models
//!
//! Data structures matching backend schemas.

use serde::{Deserialize, Serialize};

/// Token response from the auth endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// User data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub is_active: bool,
}

/// Item data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: i64,
}

/// Liveness response from the health endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_optional_description() {
        let with: Item = serde_json::from_str(
            r#"{"id":1,"title":"Groceries","description":"Milk","owner_id":7}"#,
        )
        .unwrap();
        assert_eq!(with.description.as_deref(), Some("Milk"));

        let without: Item =
            serde_json::from_str(r#"{"id":2,"title":"Chores","description":null,"owner_id":7}"#)
                .unwrap();
        assert_eq!(without.description, None);
    }

    #[test]
    fn test_user_shape() {
        let user: User = serde_json::from_str(
            r#"{"id":3,"email":"a@b.c","username":"alice","is_active":true}"#,
        )
        .unwrap();
        assert_eq!(user.username, "alice");
        assert!(user.is_active);
    }
}
