//! Test helpers for feedhub API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum_test::TestServer;
use serde_json::{json, Value};

use feedhub::db::{self, DbPool};
use feedhub::web::handlers::AppState;
use feedhub::web::router::create_router;

/// Create a test server with a migrated in-memory database.
pub async fn create_test_server() -> (TestServer, DbPool) {
    let pool = db::connect_in_memory()
        .await
        .expect("Failed to create test database");
    db::migrate(&pool).await.expect("Failed to run migrations");

    let app_state = Arc::new(AppState::new(pool.clone()));
    let router = create_router(app_state, &[]);
    let server = TestServer::new(router).expect("Failed to create test server");

    (server, pool)
}

/// Register a user and return the response body, including the API key.
pub async fn register_user(server: &TestServer, name: &str) -> Value {
    let response = server.post("/v1/users").json(&json!({ "name": name })).await;
    response.assert_status_ok();
    response.json::<Value>()
}

/// Register a user and return only their API key.
pub async fn register_user_key(server: &TestServer, name: &str) -> String {
    let user = register_user(server, name).await;
    user["api_key"]
        .as_str()
        .expect("api_key missing from response")
        .to_string()
}

/// Create a feed as the given user and return the response body.
pub async fn create_feed(server: &TestServer, api_key: &str, name: &str, url: &str) -> Value {
    let response = server
        .post("/v1/feeds")
        .add_header(AUTHORIZATION, format!("ApiKey {api_key}"))
        .json(&json!({ "name": name, "url": url }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()
}
