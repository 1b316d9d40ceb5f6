//! Syndication document parsing for feedhub.
//!
//! A malformed top-level document fails the whole fetch; anything missing at
//! the item level is tolerated.

use feed_rs::parser;

use crate::rss::types::{ParsedChannel, ParsedItem};
use crate::{FeedHubError, Result};

/// Parse raw document bytes into a channel.
pub fn parse_channel(bytes: &[u8]) -> Result<ParsedChannel> {
    let feed = parser::parse(bytes)
        .map_err(|e| FeedHubError::Parse(format!("failed to parse feed: {e}")))?;

    let title = feed
        .title
        .map(|t| t.content)
        .unwrap_or_else(|| "Untitled Feed".to_string());

    let description = feed.description.map(|d| d.content);

    let items: Vec<ParsedItem> = feed
        .entries
        .into_iter()
        .map(|entry| {
            let guid = if entry.id.is_empty() {
                None
            } else {
                Some(entry.id)
            };
            let title = entry.title.map(|t| t.content);
            let link = entry.links.first().map(|l| l.href.clone());
            let description = entry
                .summary
                .map(|t| t.content)
                .or(entry.content.and_then(|c| c.body));
            // Date strings feed-rs could not parse come through as None
            let published_at = entry.published.or(entry.updated);

            ParsedItem {
                guid,
                title,
                link,
                description,
                published_at,
            }
        })
        .collect();

    Ok(ParsedChannel {
        title,
        description,
        items,
    })
}
