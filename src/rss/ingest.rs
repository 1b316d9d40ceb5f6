//! Per-feed ingestion worker for feedhub.

use tracing::{debug, error, info, warn};

use crate::db::DbPool;
use crate::rss::fetcher::FeedSource;
use crate::rss::parser::parse_channel;
use crate::rss::repository::{FeedRepository, PostRepository};
use crate::rss::types::{Feed, NewPost};
use crate::Result;

/// Fetch, parse, and persist one feed, then stamp it as fetched.
///
/// Never returns an error to the caller: failure is logged and confined to
/// this feed. `last_fetched_at` is updated even on failure so a permanently
/// broken feed cannot monopolize every batch.
pub async fn sync_feed<S: FeedSource + ?Sized>(db: &DbPool, source: &S, feed: &Feed) {
    match fetch_and_store(db, source, feed).await {
        Ok(new_count) => {
            if new_count > 0 {
                info!("Feed {} updated: {} new post(s)", feed.url, new_count);
            } else {
                debug!("Feed {} updated: no new posts", feed.url);
            }
        }
        Err(e) => {
            warn!("Failed to ingest feed {}: {}", feed.url, e);
        }
    }

    if let Err(e) = FeedRepository::new(db).update_last_fetched(feed.id).await {
        error!("Failed to stamp feed {} as fetched: {}", feed.url, e);
    }
}

/// Fetch and parse the feed document, storing any items not yet seen.
///
/// Returns the number of newly stored posts.
async fn fetch_and_store<S: FeedSource + ?Sized>(
    db: &DbPool,
    source: &S,
    feed: &Feed,
) -> Result<usize> {
    let bytes = source.fetch_raw(&feed.url).await?;
    let channel = parse_channel(&bytes)?;

    debug!(
        "Feed {} parsed: channel '{}', {} item(s)",
        feed.url,
        channel.title,
        channel.items.len()
    );

    let posts = PostRepository::new(db);
    let mut new_count = 0;

    for item in channel.items {
        let Some(identity) = item.identity() else {
            debug!("Skipping unidentifiable item in feed {}", feed.url);
            continue;
        };

        let mut new_post = NewPost::new(feed.id, identity);
        if let Some(title) = item.title.clone() {
            new_post = new_post.with_title(title);
        }
        if let Some(link) = item.link.clone() {
            new_post = new_post.with_url(link);
        }
        if let Some(description) = item.description.clone() {
            new_post = new_post.with_description(description);
        }
        if let Some(published_at) = item.published_at {
            new_post = new_post.with_published_at(published_at);
        }

        match posts.create_or_ignore(&new_post).await {
            Ok(Some(_)) => new_count += 1,
            Ok(None) => {} // Already stored
            Err(e) => {
                error!("Failed to store post for feed {}: {}", feed.url, e);
            }
        }
    }

    Ok(new_count)
}
