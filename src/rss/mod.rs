//! Feed polling, parsing, and ingestion for feedhub.

pub mod fetcher;
pub mod ingest;
pub mod parser;
pub mod repository;
pub mod scheduler;
pub mod types;

pub use fetcher::{FeedSource, HttpFetcher};
pub use ingest::sync_feed;
pub use repository::{FeedFollowRepository, FeedRepository, PostRepository};
pub use scheduler::PollScheduler;
pub use types::{Feed, FeedFollow, NewFeed, NewPost, ParsedChannel, ParsedItem, Post};
