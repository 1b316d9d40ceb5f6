//! Feed, follow, and post repositories for feedhub.

use chrono::Utc;
use uuid::Uuid;

use super::types::{Feed, FeedFollow, NewFeed, NewPost, Post};
use crate::db::DbPool;
use crate::{FeedHubError, Result};

/// Repository for feed operations.
pub struct FeedRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> FeedRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new feed. Fails if the URL is already registered.
    pub async fn create(&self, new_feed: &NewFeed) -> Result<Feed> {
        let feed = Feed {
            id: Uuid::new_v4(),
            name: new_feed.name.clone(),
            url: new_feed.url.clone(),
            user_id: new_feed.user_id,
            last_fetched_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO feeds (id, name, url, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(feed.id)
        .bind(&feed.name)
        .bind(&feed.url)
        .bind(feed.user_id)
        .bind(feed.created_at)
        .bind(feed.updated_at)
        .execute(self.pool)
        .await
        .map_err(|e| FeedHubError::Database(e.to_string()))?;

        Ok(feed)
    }

    /// Get a feed by ID.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Feed>> {
        let feed = sqlx::query_as::<_, Feed>(
            r#"
            SELECT id, name, url, user_id, last_fetched_at, created_at, updated_at
            FROM feeds
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| FeedHubError::Database(e.to_string()))?;

        Ok(feed)
    }

    /// List all feeds in registration order.
    pub async fn list_all(&self) -> Result<Vec<Feed>> {
        let feeds = sqlx::query_as::<_, Feed>(
            r#"
            SELECT id, name, url, user_id, last_fetched_at, created_at, updated_at
            FROM feeds
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(self.pool)
        .await
        .map_err(|e| FeedHubError::Database(e.to_string()))?;

        Ok(feeds)
    }

    /// Select the next batch of feeds to refresh, most stale first.
    ///
    /// Never-fetched feeds sort before everything else; ties break on feed
    /// ID so selection is deterministic for a fixed database state.
    pub async fn next_to_refresh(&self, limit: i64) -> Result<Vec<Feed>> {
        let feeds = sqlx::query_as::<_, Feed>(
            r#"
            SELECT id, name, url, user_id, last_fetched_at, created_at, updated_at
            FROM feeds
            ORDER BY last_fetched_at ASC NULLS FIRST, id ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await
        .map_err(|e| FeedHubError::Database(e.to_string()))?;

        Ok(feeds)
    }

    /// Stamp a feed as fetched now.
    pub async fn update_last_fetched(&self, id: Uuid) -> Result<bool> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE feeds SET last_fetched_at = $1, updated_at = $2 WHERE id = $3",
        )
        .bind(now)
        .bind(now)
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| FeedHubError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

/// Repository for feed follow operations.
pub struct FeedFollowRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> FeedFollowRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a follow linking a user to a feed.
    pub async fn create(&self, user_id: Uuid, feed_id: Uuid) -> Result<FeedFollow> {
        let follow = FeedFollow {
            id: Uuid::new_v4(),
            user_id,
            feed_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO feed_follows (id, user_id, feed_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(follow.id)
        .bind(follow.user_id)
        .bind(follow.feed_id)
        .bind(follow.created_at)
        .bind(follow.updated_at)
        .execute(self.pool)
        .await
        .map_err(|e| FeedHubError::Database(e.to_string()))?;

        Ok(follow)
    }

    /// Get a follow by ID.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<FeedFollow>> {
        let follow = sqlx::query_as::<_, FeedFollow>(
            r#"
            SELECT id, user_id, feed_id, created_at, updated_at
            FROM feed_follows
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| FeedHubError::Database(e.to_string()))?;

        Ok(follow)
    }

    /// List a user's follows in creation order.
    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<FeedFollow>> {
        let follows = sqlx::query_as::<_, FeedFollow>(
            r#"
            SELECT id, user_id, feed_id, created_at, updated_at
            FROM feed_follows
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await
        .map_err(|e| FeedHubError::Database(e.to_string()))?;

        Ok(follows)
    }

    /// Delete a follow by ID.
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM feed_follows WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| FeedHubError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

/// Repository for post operations.
pub struct PostRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> PostRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a post unless its identity already exists for the feed.
    ///
    /// Returns the new post ID, or None when the (feed, identity) pair was
    /// already stored. Re-ingestion of an unchanged document is therefore a
    /// no-op.
    pub async fn create_or_ignore(&self, post: &NewPost) -> Result<Option<Uuid>> {
        let id = Uuid::new_v4();
        let inserted: Option<Uuid> = sqlx::query_scalar(
            r#"
            INSERT INTO posts (id, feed_id, guid, title, url, description, published_at, fetched_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT(feed_id, guid) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(post.feed_id)
        .bind(&post.guid)
        .bind(&post.title)
        .bind(&post.url)
        .bind(&post.description)
        .bind(post.published_at)
        .bind(Utc::now())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| FeedHubError::Database(e.to_string()))?;

        Ok(inserted)
    }

    /// List the posts visible to a user through their follows, newest first.
    pub async fn list_for_user(&self, user_id: Uuid, limit: i64) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT DISTINCT p.id, p.feed_id, p.guid, p.title, p.url, p.description,
                   p.published_at, p.fetched_at
            FROM posts p
            JOIN feed_follows ff ON ff.feed_id = p.feed_id
            WHERE ff.user_id = $1
            ORDER BY p.published_at DESC NULLS LAST, p.fetched_at DESC, p.id ASC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool)
        .await
        .map_err(|e| FeedHubError::Database(e.to_string()))?;

        Ok(posts)
    }

    /// Count the posts stored for a feed.
    pub async fn count_by_feed(&self, feed_id: Uuid) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE feed_id = $1")
            .bind(feed_id)
            .fetch_one(self.pool)
            .await
            .map_err(|e| FeedHubError::Database(e.to_string()))?;
        Ok(count)
    }
}
