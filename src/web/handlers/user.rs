//! User registration and lookup handlers.

use axum::{body::Bytes, extract::State, Json};
use std::sync::Arc;

use crate::db::{NewUser, UserRepository};
use crate::web::dto::{CreateUserRequest, UserResponse};
use crate::web::error::ApiError;
use crate::web::middleware::ApiKeyUser;

use super::AppState;

/// POST /v1/users
///
/// Register a user and mint their API key. The key appears in this
/// response and nowhere else.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<UserResponse>, ApiError> {
    let req: CreateUserRequest =
        serde_json::from_slice(&body).map_err(|e| ApiError::internal(e.to_string()))?;

    let user = UserRepository::new(&state.db)
        .create(&NewUser::new(req.name))
        .await
        .map_err(|e| ApiError::internal(format!("Error Creating User: {e}")))?;

    Ok(Json(user.into()))
}

/// GET /v1/users
///
/// Return the user identified by the presented API key.
pub async fn get_user(ApiKeyUser(user): ApiKeyUser) -> Json<UserResponse> {
    Json(user.into())
}
