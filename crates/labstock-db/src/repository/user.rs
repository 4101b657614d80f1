//! # User Repository
//!
//! Account storage for the credential verifier.
//!
//! Passwords arrive here already hashed; this layer stores and returns
//! opaque PHC strings and never inspects them.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use labstock_core::User;

/// Columns selected for every User read, in declaration order.
const USER_COLUMNS: &str = "id, username, display_name, password_hash, role, created_at";

/// Repository for user account operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Gets a user by username (exact match).
    ///
    /// ## Returns
    /// * `Ok(Some(User))` - Account found
    /// * `Ok(None)` - No such account
    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Inserts a new user account.
    ///
    /// ## Returns
    /// * `Ok(())` - Inserted
    /// * `Err(DbError::UniqueViolation)` - Username already taken
    pub async fn insert(&self, user: &User) -> DbResult<()> {
        debug!(username = %user.username, "Inserting user");

        sqlx::query(
            r#"
            INSERT INTO users (id, username, display_name, password_hash, role, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.display_name)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Counts registered accounts (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new user record ID.
pub fn generate_user_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;
    use labstock_core::Role;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sample(username: &str) -> User {
        User {
            id: generate_user_id(),
            username: username.to_string(),
            display_name: "Test User".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            role: Role::User,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_by_username() {
        let db = test_db().await;
        let user = sample("alice");
        db.users().insert(&user).await.unwrap();

        let found = db.users().get_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.display_name, "Test User");
        assert_eq!(found.role, Role::User);
    }

    #[tokio::test]
    async fn test_missing_username_is_none() {
        let db = test_db().await;
        assert!(db.users().get_by_username("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let db = test_db().await;
        db.users().insert(&sample("alice")).await.unwrap();

        let err = db.users().insert(&sample("alice")).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_count() {
        let db = test_db().await;
        assert_eq!(db.users().count().await.unwrap(), 0);
        db.users().insert(&sample("alice")).await.unwrap();
        db.users().insert(&sample("bob")).await.unwrap();
        assert_eq!(db.users().count().await.unwrap(), 2);
    }
}
