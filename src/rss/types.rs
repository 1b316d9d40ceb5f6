//! Feed, follow, and post types for feedhub.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Maximum feed document size in bytes (5MB).
pub const MAX_FEED_SIZE: u64 = 5 * 1024 * 1024;

/// A remote syndication feed.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Feed {
    /// Feed ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Feed URL, unique across the system.
    pub url: String,
    /// User who registered the feed.
    pub user_id: Uuid,
    /// Last time the feed was polled. None means never.
    pub last_fetched_at: Option<DateTime<Utc>>,
    /// When the feed was created.
    pub created_at: DateTime<Utc>,
    /// When the feed was last updated.
    pub updated_at: DateTime<Utc>,
}

/// New feed for creation.
#[derive(Debug, Clone)]
pub struct NewFeed {
    /// Display name.
    pub name: String,
    /// Feed URL.
    pub url: String,
    /// Creating user.
    pub user_id: Uuid,
}

impl NewFeed {
    /// Create a new feed request.
    pub fn new(name: impl Into<String>, url: impl Into<String>, user_id: Uuid) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            user_id,
        }
    }
}

/// A follow relationship between a user and a feed.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FeedFollow {
    /// Follow ID.
    pub id: Uuid,
    /// Following user.
    pub user_id: Uuid,
    /// Followed feed.
    pub feed_id: Uuid,
    /// When the follow was created.
    pub created_at: DateTime<Utc>,
    /// When the follow was last updated.
    pub updated_at: DateTime<Utc>,
}

/// An ingested syndication item.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Post {
    /// Post ID.
    pub id: Uuid,
    /// Feed this post belongs to.
    pub feed_id: Uuid,
    /// Item identity within the feed (guid when present, else link).
    pub guid: String,
    /// Item title.
    pub title: Option<String>,
    /// Link to the original article.
    pub url: Option<String>,
    /// Item description or summary.
    pub description: Option<String>,
    /// When the item was published. None if the feed's date was absent
    /// or unparseable.
    pub published_at: Option<DateTime<Utc>>,
    /// When the item was discovered by the ingestion worker.
    pub fetched_at: DateTime<Utc>,
}

/// New post for creation.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Feed the post belongs to.
    pub feed_id: Uuid,
    /// Item identity.
    pub guid: String,
    /// Item title.
    pub title: Option<String>,
    /// Link to the original article.
    pub url: Option<String>,
    /// Item description.
    pub description: Option<String>,
    /// Publication time.
    pub published_at: Option<DateTime<Utc>>,
}

impl NewPost {
    /// Create a new post with the given identity.
    pub fn new(feed_id: Uuid, guid: impl Into<String>) -> Self {
        Self {
            feed_id,
            guid: guid.into(),
            title: None,
            url: None,
            description: None,
            published_at: None,
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the link.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the publication time.
    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }
}

/// Parsed channel data from a fetched document.
#[derive(Debug, Clone)]
pub struct ParsedChannel {
    /// Channel title.
    pub title: String,
    /// Channel description.
    pub description: Option<String>,
    /// Parsed items.
    pub items: Vec<ParsedItem>,
}

/// Parsed item data from a fetched document.
///
/// Every field is best-effort; a missing field never drops the item.
#[derive(Debug, Clone, Default)]
pub struct ParsedItem {
    /// Item guid, if present.
    pub guid: Option<String>,
    /// Item title.
    pub title: Option<String>,
    /// Link to the original article.
    pub link: Option<String>,
    /// Item description.
    pub description: Option<String>,
    /// Publication time, if the feed carried a parseable date.
    pub published_at: Option<DateTime<Utc>>,
}

impl ParsedItem {
    /// Identity key for deduplication: guid when present, else link.
    ///
    /// Items with neither cannot be deduplicated and are skipped by the
    /// ingestion worker.
    pub fn identity(&self) -> Option<&str> {
        match self.guid.as_deref() {
            Some(guid) if !guid.is_empty() => Some(guid),
            _ => match self.link.as_deref() {
                Some(link) if !link.is_empty() => Some(link),
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post_builder() {
        let feed_id = Uuid::new_v4();
        let now = Utc::now();
        let post = NewPost::new(feed_id, "guid-1")
            .with_title("Title")
            .with_url("https://example.com/1")
            .with_description("Summary")
            .with_published_at(now);

        assert_eq!(post.feed_id, feed_id);
        assert_eq!(post.guid, "guid-1");
        assert_eq!(post.title.as_deref(), Some("Title"));
        assert_eq!(post.url.as_deref(), Some("https://example.com/1"));
        assert_eq!(post.description.as_deref(), Some("Summary"));
        assert_eq!(post.published_at, Some(now));
    }

    #[test]
    fn test_item_identity_prefers_guid() {
        let item = ParsedItem {
            guid: Some("guid-1".to_string()),
            link: Some("https://example.com/1".to_string()),
            ..Default::default()
        };
        assert_eq!(item.identity(), Some("guid-1"));
    }

    #[test]
    fn test_item_identity_falls_back_to_link() {
        let item = ParsedItem {
            guid: None,
            link: Some("https://example.com/1".to_string()),
            ..Default::default()
        };
        assert_eq!(item.identity(), Some("https://example.com/1"));

        let empty_guid = ParsedItem {
            guid: Some(String::new()),
            link: Some("https://example.com/2".to_string()),
            ..Default::default()
        };
        assert_eq!(empty_guid.identity(), Some("https://example.com/2"));
    }

    #[test]
    fn test_item_identity_none_when_unidentifiable() {
        let item = ParsedItem::default();
        assert_eq!(item.identity(), None);
    }
}
