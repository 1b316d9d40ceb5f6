//! API key authentication middleware.

use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, Request},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::db::{User, UserRepository};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Scheme prefix expected in the Authorization header.
const API_KEY_PREFIX: &str = "ApiKey ";

/// Extract the key from an Authorization header value.
///
/// Returns None when the scheme prefix is absent.
fn parse_api_key(header: &str) -> Option<&str> {
    header.strip_prefix(API_KEY_PREFIX)
}

/// Extractor for authenticated users.
///
/// Use this extractor to require an API key for a handler. The handler
/// receives the resolved user row.
#[derive(Debug, Clone)]
pub struct ApiKeyUser(pub User);

impl<S> FromRequestParts<S> for ApiKeyUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let header = parts
                .headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .ok_or_else(|| ApiError::unauthorized("Authorization header missing"))?;

            let api_key = parse_api_key(header)
                .ok_or_else(|| ApiError::unauthorized("Malformed Token"))?;

            // Get application state from extensions (set by middleware)
            let app_state = parts
                .extensions
                .get::<Arc<AppState>>()
                .ok_or_else(|| ApiError::internal("Application state not configured"))?;

            let user = UserRepository::new(&app_state.db)
                .get_by_api_key(api_key)
                .await
                .map_err(|e| ApiError::internal(format!("Error getting user by ApiKey: {e}")))?
                .ok_or_else(|| {
                    ApiError::internal("Error getting user by ApiKey: no matching user")
                })?;

            Ok(ApiKeyUser(user))
        })
    }
}

/// Middleware function to inject application state into request extensions.
pub async fn inject_state(
    app_state: Arc<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(app_state);
    next.run(request).await
}
