//! API response DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::db::User;
use crate::rss::{Feed, FeedFollow, Post};

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "OK".
    pub status: String,
}

/// User as returned by the API.
///
/// The key is included so the caller can store it; it is never recoverable
/// any other way.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
    /// Display name.
    pub name: String,
    /// API key.
    pub api_key: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            created_at: user.created_at,
            updated_at: user.updated_at,
            name: user.name,
            api_key: user.api_key,
        }
    }
}

/// Feed as returned by the API.
#[derive(Debug, Serialize)]
pub struct FeedResponse {
    /// Feed ID.
    pub id: Uuid,
    /// When the feed was created.
    pub created_at: DateTime<Utc>,
    /// When the feed was last updated.
    pub updated_at: DateTime<Utc>,
    /// Display name.
    pub name: String,
    /// Feed URL.
    pub url: String,
    /// Registering user.
    pub user_id: Uuid,
    /// Last poll time, null if never polled.
    pub last_fetched_at: Option<DateTime<Utc>>,
}

impl From<Feed> for FeedResponse {
    fn from(feed: Feed) -> Self {
        Self {
            id: feed.id,
            created_at: feed.created_at,
            updated_at: feed.updated_at,
            name: feed.name,
            url: feed.url,
            user_id: feed.user_id,
            last_fetched_at: feed.last_fetched_at,
        }
    }
}

/// Follow as returned by the API.
#[derive(Debug, Serialize)]
pub struct FeedFollowResponse {
    /// Follow ID.
    pub id: Uuid,
    /// When the follow was created.
    pub created_at: DateTime<Utc>,
    /// When the follow was last updated.
    pub updated_at: DateTime<Utc>,
    /// Following user.
    pub user_id: Uuid,
    /// Followed feed.
    pub feed_id: Uuid,
}

impl From<FeedFollow> for FeedFollowResponse {
    fn from(follow: FeedFollow) -> Self {
        Self {
            id: follow.id,
            created_at: follow.created_at,
            updated_at: follow.updated_at,
            user_id: follow.user_id,
            feed_id: follow.feed_id,
        }
    }
}

/// Response for feed creation: the feed plus the creator's automatic follow.
#[derive(Debug, Serialize)]
pub struct CreateFeedResponse {
    /// The created feed.
    pub feed: FeedResponse,
    /// The creator's follow of it.
    pub feed_follow: FeedFollowResponse,
}

/// Post as returned by the API.
#[derive(Debug, Serialize)]
pub struct PostResponse {
    /// Post ID.
    pub id: Uuid,
    /// Feed this post belongs to.
    pub feed_id: Uuid,
    /// Item identity within the feed.
    pub guid: String,
    /// Item title.
    pub title: Option<String>,
    /// Link to the original article.
    pub url: Option<String>,
    /// Item description.
    pub description: Option<String>,
    /// Publication time, null if the feed carried none.
    pub published_at: Option<DateTime<Utc>>,
    /// When the item was ingested.
    pub fetched_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            feed_id: post.feed_id,
            guid: post.guid,
            title: post.title,
            url: post.url,
            description: post.description,
            published_at: post.published_at,
            fetched_at: post.fetched_at,
        }
    }
}
