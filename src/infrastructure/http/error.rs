//! Translation of application errors into HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::application::errors::ApplicationError;

/// Error returned by every story route
#[derive(Debug)]
pub struct ApiError(ApplicationError);

impl From<ApplicationError> for ApiError {
    fn from(error: ApplicationError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            ApplicationError::Validation(failure) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "title": "Validation failed",
                    "errors": failure.errors(),
                })),
            )
                .into_response(),
            error @ ApplicationError::NotFound { .. } => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "title": "Not found",
                    "detail": error.to_string(),
                })),
            )
                .into_response(),
            error @ (ApplicationError::Cancelled | ApplicationError::Repository(_)) => {
                tracing::error!("Request failed: {}", error);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::RepositoryError;
    use crate::application::validation::ValidationFailure;

    fn status_of(error: ApplicationError) -> StatusCode {
        ApiError::from(error).into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            status_of(ValidationFailure::single("title", "Title is required").into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ApplicationError::not_found("UserStory", -100)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(RepositoryError::Database("disk full".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(ApplicationError::Cancelled),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
