//! API handlers for feedhub.

pub mod feed;
pub mod feed_follow;
pub mod post;
pub mod user;

pub use feed::*;
pub use feed_follow::*;
pub use post::*;
pub use user::*;

use crate::db::DbPool;

/// Shared application state for handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database pool.
    pub db: DbPool,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}
