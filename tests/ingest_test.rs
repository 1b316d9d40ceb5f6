//! End-to-end ingestion tests.
//!
//! Drive the polling scheduler against stub feed sources and read the
//! results back through the API.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::header::AUTHORIZATION;
use serde_json::Value;

use feedhub::config::SchedulerConfig;
use feedhub::rss::{FeedSource, PollScheduler};
use feedhub::{FeedHubError, Result};

use common::{create_feed, create_test_server, register_user_key};

/// Serves a canned document for every URL except those ending in `bad.xml`,
/// which fail with an HTTP error.
struct StubSource;

#[async_trait]
impl FeedSource for StubSource {
    async fn fetch_raw(&self, url: &str) -> Result<Vec<u8>> {
        if url.ends_with("bad.xml") {
            return Err(FeedHubError::FetchStatus(500));
        }
        let doc = format!(
            r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Stub</title>
    <item>
      <guid>{url}#1</guid>
      <title>First</title>
      <link>{url}/1</link>
      <pubDate>Wed, 01 Jan 2025 12:00:00 GMT</pubDate>
    </item>
    <item>
      <guid>{url}#2</guid>
      <title>Second</title>
      <link>{url}/2</link>
      <pubDate>Thu, 02 Jan 2025 12:00:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#
        );
        Ok(doc.into_bytes())
    }
}

fn test_scheduler_config() -> SchedulerConfig {
    SchedulerConfig {
        batch_size: 10,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_polled_posts_reach_the_api() {
    let (server, pool) = create_test_server().await;
    let ada_key = register_user_key(&server, "Ada").await;
    create_feed(&server, &ada_key, "Blog", "https://example.com/feed.xml").await;

    let scheduler = PollScheduler::new(pool, Arc::new(StubSource), &test_scheduler_config());
    scheduler.poll_once().await;

    let response = server
        .get("/v1/posts")
        .add_header(AUTHORIZATION, format!("ApiKey {ada_key}"))
        .await;
    response.assert_status_ok();

    let posts: Value = response.json();
    let posts = posts.as_array().unwrap();
    assert_eq!(posts.len(), 2);

    // Newest publication first
    assert_eq!(posts[0]["title"], "Second");
    assert_eq!(posts[1]["title"], "First");
}

#[tokio::test]
async fn test_repeated_polls_do_not_duplicate_posts() {
    let (server, pool) = create_test_server().await;
    let ada_key = register_user_key(&server, "Ada").await;
    create_feed(&server, &ada_key, "Blog", "https://example.com/feed.xml").await;

    let scheduler = PollScheduler::new(pool, Arc::new(StubSource), &test_scheduler_config());
    scheduler.poll_once().await;
    scheduler.poll_once().await;
    scheduler.poll_once().await;

    let response = server
        .get("/v1/posts")
        .add_header(AUTHORIZATION, format!("ApiKey {ada_key}"))
        .await;
    let posts: Value = response.json();
    assert_eq!(posts.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_broken_feed_does_not_block_others() {
    let (server, pool) = create_test_server().await;
    let ada_key = register_user_key(&server, "Ada").await;
    create_feed(&server, &ada_key, "Broken", "https://example.com/bad.xml").await;
    create_feed(&server, &ada_key, "Blog", "https://example.com/good.xml").await;

    let scheduler = PollScheduler::new(pool, Arc::new(StubSource), &test_scheduler_config());
    scheduler.poll_once().await;

    let response = server
        .get("/v1/posts")
        .add_header(AUTHORIZATION, format!("ApiKey {ada_key}"))
        .await;
    let posts: Value = response.json();
    let posts = posts.as_array().unwrap();
    assert_eq!(posts.len(), 2);
    for post in posts {
        assert!(post["guid"].as_str().unwrap().contains("good.xml"));
    }

    // Both feeds were stamped, broken one included
    let response = server.get("/v1/feeds").await;
    let feeds: Value = response.json();
    for feed in feeds.as_array().unwrap() {
        assert!(
            feed["last_fetched_at"].as_str().is_some(),
            "feed {} was not stamped",
            feed["url"]
        );
    }
}
