//! User model and repository for feedhub.

use chrono::{DateTime, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{FeedHubError, Result};

/// A registered user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Opaque API key, generated once at creation and never changed.
    pub api_key: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// New user for creation.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name.
    pub name: String,
}

impl NewUser {
    /// Create a new user request.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Generate an unguessable API key.
///
/// 64 hex characters: SHA-256 over 32 bytes of OS randomness.
pub fn generate_api_key() -> String {
    let mut buf = [0u8; 32];
    rand::rng().fill_bytes(&mut buf);
    Sha256::digest(buf)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user with a freshly generated API key.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name.clone(),
            api_key: generate_api_key(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO users (id, name, api_key, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.api_key)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(self.pool)
        .await
        .map_err(|e| FeedHubError::Database(e.to_string()))?;

        Ok(user)
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, api_key, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| FeedHubError::Database(e.to_string()))?;

        Ok(user)
    }

    /// Get a user by API key.
    pub async fn get_by_api_key(&self, api_key: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, api_key, created_at, updated_at
            FROM users
            WHERE api_key = $1
            "#,
        )
        .bind(api_key)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| FeedHubError::Database(e.to_string()))?;

        Ok(user)
    }

    /// Count all users.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await
            .map_err(|e| FeedHubError::Database(e.to_string()))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn test_pool() -> SqlitePool {
        let pool = db::connect_in_memory().await.unwrap();
        db::migrate(&pool).await.unwrap();
        pool
    }

    #[test]
    fn test_generate_api_key_shape() {
        let key = generate_api_key();
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_api_key_unique() {
        assert_ne!(generate_api_key(), generate_api_key());
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        let user = repo.create(&NewUser::new("Ada")).await.unwrap();
        assert_eq!(user.name, "Ada");
        assert_eq!(user.api_key.len(), 64);

        let found = repo.get_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Ada");
        assert_eq!(found.api_key, user.api_key);
    }

    #[tokio::test]
    async fn test_get_by_api_key() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        let user = repo.create(&NewUser::new("Ada")).await.unwrap();

        let found = repo.get_by_api_key(&user.api_key).await.unwrap().unwrap();
        assert_eq!(found.id, user.id);

        let missing = repo.get_by_api_key("no-such-key").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_count() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);
        assert_eq!(repo.count().await.unwrap(), 0);

        repo.create(&NewUser::new("Ada")).await.unwrap();
        repo.create(&NewUser::new("Grace")).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
