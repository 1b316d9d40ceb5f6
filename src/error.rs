//! Error types for feedhub.

use thiserror::Error;

/// Common error type for feedhub.
#[derive(Error, Debug)]
pub enum FeedHubError {
    /// Database error.
    ///
    /// Wraps errors from the sqlx backend; sqlx errors convert automatically.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Permission denied error.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Remote fetch returned a non-success HTTP status.
    #[error("fetch error: HTTP status {0}")]
    FetchStatus(u16),

    /// Remote fetch failed in transport or while reading the body.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Syndication document could not be parsed.
    #[error("feed parse error: {0}")]
    Parse(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for FeedHubError {
    fn from(e: sqlx::Error) -> Self {
        FeedHubError::Database(e.to_string())
    }
}

/// Result type alias for feedhub operations.
pub type Result<T> = std::result::Result<T, FeedHubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        let err = FeedHubError::Auth("invalid key".to_string());
        assert_eq!(err.to_string(), "authentication error: invalid key");
    }

    #[test]
    fn test_not_found_error_display() {
        let err = FeedHubError::NotFound("feed follow".to_string());
        assert_eq!(err.to_string(), "feed follow not found");
    }

    #[test]
    fn test_fetch_status_display() {
        let err = FeedHubError::FetchStatus(404);
        assert_eq!(err.to_string(), "fetch error: HTTP status 404");
    }

    #[test]
    fn test_parse_error_display() {
        let err = FeedHubError::Parse("unexpected end of document".to_string());
        assert_eq!(err.to_string(), "feed parse error: unexpected end of document");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FeedHubError = io_err.into();
        assert!(matches!(err, FeedHubError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(FeedHubError::Auth("test".to_string()))
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
