use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::users::store::User;

/// Full profile returned to the account owner.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_deleted: bool,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            is_deleted: user.is_deleted,
        }
    }
}

/// Listing entry; exposes no soft-delete state and no hash.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserSummary>,
    pub total_users: i64,
    pub page: i64,
    pub limit: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateNameRequest {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub old_password: String,
    #[serde(default)]
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Test User".into(),
            email: "t@example.com".into(),
            password_hash: "$argon2id$v=19$hash".into(),
            is_deleted: false,
        }
    }

    #[test]
    fn profile_response_carries_soft_delete_flag_but_no_hash() {
        let json = serde_json::to_string(&ProfileResponse::from(sample_user())).unwrap();
        assert!(json.contains("\"is_deleted\":false"));
        assert!(!json.contains("argon2"));
    }

    #[test]
    fn user_summary_exposes_only_public_fields() {
        let json = serde_json::to_string(&UserSummary::from(sample_user())).unwrap();
        assert!(json.contains("\"email\""));
        assert!(!json.contains("is_deleted"));
        assert!(!json.contains("argon2"));
    }
}
