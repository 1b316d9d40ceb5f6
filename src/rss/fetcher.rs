//! Remote feed fetching for feedhub.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::SchedulerConfig;
use crate::rss::types::MAX_FEED_SIZE;
use crate::{FeedHubError, Result};

/// Connect timeout in seconds.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 5;

/// User agent string for feed fetching.
const USER_AGENT: &str = "feedhub/0.1 (feed aggregator)";

/// Source of raw syndication documents.
///
/// The polling scheduler and ingestion worker only see this trait, so tests
/// can substitute a stub without touching the network.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the raw document at the given URL.
    async fn fetch_raw(&self, url: &str) -> Result<Vec<u8>>;
}

/// HTTP feed fetcher.
///
/// One GET per call, no retries, no state beyond the shared client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the configured total timeout.
    pub fn new(config: &SchedulerConfig) -> Result<Self> {
        Self::with_timeout(Duration::from_secs(config.fetch_timeout_secs))
    }

    /// Create a fetcher with an explicit total timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FeedHubError::Fetch(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl FeedSource for HttpFetcher {
    async fn fetch_raw(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FeedHubError::Fetch(format!("failed to fetch feed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedHubError::FetchStatus(status.as_u16()));
        }

        if let Some(content_length) = response.content_length() {
            if content_length > MAX_FEED_SIZE {
                return Err(FeedHubError::Fetch(format!(
                    "feed too large: {content_length} bytes (max {MAX_FEED_SIZE} bytes)"
                )));
            }
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FeedHubError::Fetch(format!("failed to read response: {e}")))?;

        if bytes.len() as u64 > MAX_FEED_SIZE {
            return Err(FeedHubError::Fetch(format!(
                "feed too large: {} bytes (max {MAX_FEED_SIZE} bytes)",
                bytes.len()
            )));
        }

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetcher_from_config() {
        let config = SchedulerConfig::default();
        assert!(HttpFetcher::new(&config).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_url_is_fetch_error() {
        let fetcher = HttpFetcher::with_timeout(Duration::from_secs(1)).unwrap();
        let err = fetcher.fetch_raw("not a url").await.unwrap_err();
        assert!(matches!(err, FeedHubError::Fetch(_)));
    }
}
