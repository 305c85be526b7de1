use async_graphql::Enum;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, Enum, Copy)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl User {
    pub fn new(email: &str, role: UserRole) -> Self {
        User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            role,
            created_at: Some(Utc::now()),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("john@example.com", UserRole::User);
        assert_eq!(user.email, "john@example.com");
        assert!(!user.is_admin());
        assert!(user.created_at.is_some());
    }

    #[test]
    fn role_defaults_to_user_when_missing() {
        let json = r#"{"id":"u-1","email":"a@example.com"}"#;
        let user: User = serde_json::from_str(json).expect("user should parse");
        assert_eq!(user.role, UserRole::User);
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&UserRole::Admin).expect("serialize");
        assert_eq!(json, "\"admin\"");
    }
}
