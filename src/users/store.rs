use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::errors::ApiError;

/// User record in the `users` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    #[sqlx(rename = "password")]
    pub password_hash: String,
    pub is_deleted: bool,
}

/// Persistence handle for user records. Passed around explicitly through
/// `AppState` rather than living in a process-wide global.
#[derive(Clone)]
pub struct UserStore {
    pool: PgPool,
}

impl UserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Inserts a new user. The unique index on email is the only duplicate
    /// check: a constraint violation maps to `Conflict`, which stays correct
    /// under concurrent identical registrations where a prior existence read
    /// would not.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, ApiError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password, is_deleted
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    /// Returns the record regardless of its soft-delete state.
    pub async fn get_by_id(&self, id: Uuid) -> Result<User, ApiError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, is_deleted
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    /// Full record including the password hash, for authentication only.
    pub async fn get_by_email(&self, email: &str) -> Result<User, ApiError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, is_deleted
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    /// Hash only, so password-reset never handles the rest of the record.
    pub async fn get_password_hash(&self, id: Uuid) -> Result<String, ApiError> {
        let row: (String,) = sqlx::query_as(r#"SELECT password FROM users WHERE id = $1"#)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    pub async fn update_name(&self, id: Uuid, name: &str) -> Result<(), ApiError> {
        let result = sqlx::query(r#"UPDATE users SET name = $1 WHERE id = $2"#)
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("user not found"));
        }
        Ok(())
    }

    pub async fn update_password_hash(&self, id: Uuid, hash: &str) -> Result<(), ApiError> {
        let result = sqlx::query(r#"UPDATE users SET password = $1 WHERE id = $2"#)
            .bind(hash)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("user not found"));
        }
        Ok(())
    }

    /// Flips the soft-delete flag. Idempotent; the row is never removed.
    pub async fn soft_delete(&self, id: Uuid) -> Result<(), ApiError> {
        sqlx::query(r#"UPDATE users SET is_deleted = TRUE WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Active users ordered by id ascending, plus the total active count for
    /// pagination metadata. Bounds policy on limit/offset belongs to the
    /// caller.
    pub async fn list_active(&self, limit: i64, offset: i64) -> Result<(Vec<User>, i64), ApiError> {
        let total: (i64,) =
            sqlx::query_as(r#"SELECT COUNT(*) FROM users WHERE is_deleted = FALSE"#)
                .fetch_one(&self.pool)
                .await?;

        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, is_deleted
            FROM users
            WHERE is_deleted = FALSE
            ORDER BY id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((users, total.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_never_serializes_its_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Test User".into(),
            email: "t@example.com".into(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$secret".into(),
            is_deleted: false,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
        assert!(json.contains("t@example.com"));
    }
}
