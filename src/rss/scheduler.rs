//! Background polling scheduler for feedhub.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, error, info};

use crate::config::SchedulerConfig;
use crate::db::DbPool;
use crate::rss::fetcher::FeedSource;
use crate::rss::ingest::sync_feed;
use crate::rss::repository::FeedRepository;

/// Periodic feed poller.
///
/// Each cycle selects the stalest feeds and refreshes them concurrently.
/// Cycles never overlap: a new cycle starts only after every feed in the
/// previous batch has completed.
pub struct PollScheduler<S: FeedSource> {
    db: DbPool,
    source: Arc<S>,
    batch_size: i64,
    interval: std::time::Duration,
}

impl<S: FeedSource> PollScheduler<S> {
    /// Create a scheduler from configuration.
    pub fn new(db: DbPool, source: Arc<S>, config: &SchedulerConfig) -> Self {
        Self {
            db,
            source,
            batch_size: config.batch_size,
            interval: std::time::Duration::from_secs(config.interval_secs),
        }
    }

    /// Run the polling loop forever.
    pub async fn run(self) {
        info!(
            "Polling scheduler started: batch size {}, interval {:?}",
            self.batch_size, self.interval
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.poll_once().await;
        }
    }

    /// Run a single polling cycle.
    pub async fn poll_once(&self) {
        let feeds = match FeedRepository::new(&self.db)
            .next_to_refresh(self.batch_size)
            .await
        {
            Ok(feeds) => feeds,
            Err(e) => {
                error!("Failed to select feeds to refresh: {}", e);
                return;
            }
        };

        if feeds.is_empty() {
            debug!("No feeds to refresh");
            return;
        }

        debug!("Refreshing {} feed(s)", feeds.len());

        let tasks = feeds
            .iter()
            .map(|feed| sync_feed(&self.db, self.source.as_ref(), feed));
        join_all(tasks).await;
    }
}
