//! API request DTOs.

use serde::Deserialize;
use uuid::Uuid;

/// Request body for user registration.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    /// Display name.
    pub name: String,
}

/// Request body for feed registration.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFeedRequest {
    /// Display name.
    pub name: String,
    /// Feed URL.
    pub url: String,
}

/// Request body for following a feed.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFeedFollowRequest {
    /// Feed to follow.
    pub feed_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_create_user() {
        let req: CreateUserRequest = serde_json::from_str(r#"{"name": "Ada"}"#).unwrap();
        assert_eq!(req.name, "Ada");
    }

    #[test]
    fn test_deserialize_create_feed_follow() {
        let id = Uuid::new_v4();
        let req: CreateFeedFollowRequest =
            serde_json::from_str(&format!(r#"{{"feed_id": "{id}"}}"#)).unwrap();
        assert_eq!(req.feed_id, id);
    }

    #[test]
    fn test_deserialize_rejects_bad_uuid() {
        let result: Result<CreateFeedFollowRequest, _> =
            serde_json::from_str(r#"{"feed_id": "not-a-uuid"}"#);
        assert!(result.is_err());
    }
}
