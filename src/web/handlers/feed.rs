//! Feed registration and listing handlers.

use axum::{body::Bytes, extract::State, Json};
use std::sync::Arc;

use crate::rss::types::NewFeed;
use crate::rss::{FeedFollowRepository, FeedRepository};
use crate::web::dto::{CreateFeedRequest, CreateFeedResponse, FeedResponse};
use crate::web::error::ApiError;
use crate::web::middleware::ApiKeyUser;

use super::AppState;

/// POST /v1/feeds
///
/// Register a feed for polling. The creator automatically follows it.
pub async fn create_feed(
    State(state): State<Arc<AppState>>,
    ApiKeyUser(user): ApiKeyUser,
    body: Bytes,
) -> Result<Json<CreateFeedResponse>, ApiError> {
    let req: CreateFeedRequest =
        serde_json::from_slice(&body).map_err(|e| ApiError::internal(e.to_string()))?;

    let feed = FeedRepository::new(&state.db)
        .create(&NewFeed::new(req.name, req.url, user.id))
        .await
        .map_err(|e| ApiError::internal(format!("Error Creating Feed: {e}")))?;

    let feed_follow = FeedFollowRepository::new(&state.db)
        .create(user.id, feed.id)
        .await
        .map_err(|e| ApiError::internal(format!("Error Creating Feed Follow: {e}")))?;

    Ok(Json(CreateFeedResponse {
        feed: feed.into(),
        feed_follow: feed_follow.into(),
    }))
}

/// GET /v1/feeds
///
/// List every registered feed. No authentication required.
pub async fn get_all_feeds(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FeedResponse>>, ApiError> {
    let feeds = FeedRepository::new(&state.db)
        .list_all()
        .await
        .map_err(|e| ApiError::internal(format!("Error Getting Feeds: {e}")))?;

    Ok(Json(feeds.into_iter().map(Into::into).collect()))
}
