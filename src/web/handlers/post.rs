//! Aggregated post handlers.

use axum::{
    extract::{Query, State},
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;

use crate::rss::PostRepository;
use crate::web::dto::PostResponse;
use crate::web::error::ApiError;
use crate::web::middleware::ApiKeyUser;

use super::AppState;

/// Default number of posts returned when no usable limit is given.
const DEFAULT_POSTS_LIMIT: i64 = 10;

/// GET /v1/posts?limit=N
///
/// Newest posts across every feed the user follows. A missing or
/// non-numeric limit falls back to the default.
pub async fn get_posts(
    State(state): State<Arc<AppState>>,
    ApiKeyUser(user): ApiKeyUser,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let limit = params
        .get("limit")
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(DEFAULT_POSTS_LIMIT);

    let posts = PostRepository::new(&state.db)
        .list_for_user(user.id, limit)
        .await
        .map_err(|e| ApiError::internal(format!("Error Getting Posts: {e}")))?;

    Ok(Json(posts.into_iter().map(Into::into).collect()))
}
