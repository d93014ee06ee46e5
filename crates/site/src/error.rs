//! Unified error handling with Sentry integration.
//!
//! Page handlers return [`AppError`], which renders a plain-text body.
//! JSON API handlers wrap it in [`ApiError`] together with the route's fixed
//! message so clients always get `{"error": "..."}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;

/// Application-level error type for the site.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The record clashes with an existing one.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Template rendering or other internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    ///
    /// Repository constraint errors map to client errors; everything else
    /// from the store is a server error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Database(RepositoryError::Conflict(_)) | Self::Conflict(_) => {
                StatusCode::CONFLICT
            }
            Self::Database(RepositoryError::InvalidReference(_)) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Database(RepositoryError::NotFound) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Log and report server errors to Sentry. Client errors are not reported.
    fn capture(&self) {
        if self.status().is_server_error() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }
    }

    /// Message safe to show to clients.
    fn public_message(&self) -> String {
        match self {
            Self::Database(RepositoryError::Conflict(msg) | RepositoryError::InvalidReference(msg)) => {
                msg.clone()
            }
            Self::Database(RepositoryError::NotFound) => "Not found".to_string(),
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::NotFound(msg) | Self::BadRequest(msg) | Self::Conflict(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.capture();
        (self.status(), self.public_message()).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// JSON body of every API error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// An [`AppError`] raised by a JSON API route.
///
/// Server errors are reported with the route's fixed message (for example
/// `Failed to fetch articles`) instead of the underlying cause; client errors
/// keep their own message.
#[derive(Debug)]
pub struct ApiError {
    message: &'static str,
    source: AppError,
}

impl ApiError {
    #[must_use]
    pub const fn new(message: &'static str, source: AppError) -> Self {
        Self { message, source }
    }

    /// A 400 response with `detail` as the error message.
    #[must_use]
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new("Invalid request", AppError::BadRequest(detail.into()))
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.source.status()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.source.capture();
        let status = self.source.status();
        let error = if status.is_server_error() {
            self.message.to_string()
        } else {
            self.source.public_message()
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

/// Attach a route's fixed failure message to any error convertible to
/// [`AppError`].
pub trait ApiResultExt<T> {
    /// Convert the error into an [`ApiError`] carrying `message`.
    ///
    /// # Errors
    ///
    /// Returns the wrapped error unchanged in meaning.
    fn api_context(self, message: &'static str) -> std::result::Result<T, ApiError>;
}

impl<T, E: Into<AppError>> ApiResultExt<T> for std::result::Result<T, E> {
    fn api_context(self, message: &'static str) -> std::result::Result<T, ApiError> {
        self.map_err(|e| ApiError::new(message, e.into()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("articolo".to_string());
        assert_eq!(err.to_string(), "Not found: articolo");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Conflict("test".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(RepositoryError::Conflict("slug".to_string()).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(RepositoryError::InvalidReference("category".to_string()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(RepositoryError::DataCorruption("price".to_string()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_api_error_hides_server_details() {
        let err = ApiError::new(
            "Failed to fetch articles",
            RepositoryError::DataCorruption("bad slug".to_string()).into(),
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "Failed to fetch articles" })
        );
    }

    #[tokio::test]
    async fn test_api_error_keeps_client_message() {
        let response = ApiError::bad_request("price is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "price is required" })
        );
    }
}
