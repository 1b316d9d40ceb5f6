//! feedhub - RSS feed aggregation service
//!
//! A multi-user feed aggregator: users register feeds, a background
//! scheduler polls them, and followers read the collected posts through
//! a REST API.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod rss;
pub mod web;

pub use config::Config;
pub use db::{DbPool, NewUser, User, UserRepository};
pub use error::{FeedHubError, Result};
pub use rss::{
    Feed, FeedFollow, FeedFollowRepository, FeedRepository, FeedSource, HttpFetcher, PollScheduler,
    Post, PostRepository,
};
pub use web::WebServer;
