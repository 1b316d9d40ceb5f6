//! Follow management handlers.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::rss::FeedFollowRepository;
use crate::web::dto::{CreateFeedFollowRequest, FeedFollowResponse};
use crate::web::error::ApiError;
use crate::web::middleware::ApiKeyUser;

use super::AppState;

/// POST /v1/feed_follows
///
/// Follow an existing feed.
pub async fn create_feed_follow(
    State(state): State<Arc<AppState>>,
    ApiKeyUser(user): ApiKeyUser,
    body: Bytes,
) -> Result<Json<FeedFollowResponse>, ApiError> {
    let req: CreateFeedFollowRequest =
        serde_json::from_slice(&body).map_err(|e| ApiError::internal(e.to_string()))?;

    let feed_follow = FeedFollowRepository::new(&state.db)
        .create(user.id, req.feed_id)
        .await
        .map_err(|e| ApiError::internal(format!("Error Creating Feed Follow: {e}")))?;

    Ok(Json(feed_follow.into()))
}

/// GET /v1/feed_follows
///
/// List the authenticated user's follows.
pub async fn get_feed_follows(
    State(state): State<Arc<AppState>>,
    ApiKeyUser(user): ApiKeyUser,
) -> Result<Json<Vec<FeedFollowResponse>>, ApiError> {
    let follows = FeedFollowRepository::new(&state.db)
        .list_by_user(user.id)
        .await
        .map_err(|e| ApiError::internal(format!("Error Getting Feed Follows: {e}")))?;

    Ok(Json(follows.into_iter().map(Into::into).collect()))
}

/// DELETE /v1/feed_follows/{feed_follow_id}
///
/// Unfollow a feed. Only the owner of the follow may delete it.
pub async fn delete_feed_follow(
    State(state): State<Arc<AppState>>,
    ApiKeyUser(user): ApiKeyUser,
    Path(feed_follow_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = Uuid::parse_str(&feed_follow_id)
        .map_err(|e| ApiError::internal(format!("Error getting feed follow ID: {e}")))?;

    let repo = FeedFollowRepository::new(&state.db);

    let feed_follow = repo
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::internal(format!("Error Getting Feed Follow: {e}")))?
        .ok_or_else(|| ApiError::not_found("feed follow not found"))?;

    if feed_follow.user_id != user.id {
        return Err(ApiError::unauthorized(
            "This user does not own the given feed follow",
        ));
    }

    repo.delete(id)
        .await
        .map_err(|e| ApiError::internal(format!("Error Deleting Feed Follow: {e}")))?;

    Ok(StatusCode::OK)
}
