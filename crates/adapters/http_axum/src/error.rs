//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use wardhub_domain::error::{ValidationError, WardHubError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`WardHubError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(WardHubError);

impl From<WardHubError> for ApiError {
    fn from(err: WardHubError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

/// A body that is not JSON, lacks the JSON content type, or does not fit the
/// request shape is a client error, whatever status axum would pick.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ValidationError::MalformedBody(rejection.body_text()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            WardHubError::Validation(_) => StatusCode::BAD_REQUEST,
            WardHubError::NotFound(_) => StatusCode::NOT_FOUND,
            WardHubError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wardhub_domain::error::NotFoundError;

    #[test]
    fn should_map_validation_to_bad_request() {
        let response = ApiError::from(ValidationError::InvalidId { entity: "space" }).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn should_map_not_found_to_404() {
        let err = WardHubError::from(NotFoundError {
            entity: "Space",
            id: "x".to_string(),
        });
        assert_eq!(ApiError::from(err).into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn should_map_storage_to_500() {
        let err = WardHubError::Storage(Box::new(std::io::Error::other("disk full")));
        assert_eq!(
            ApiError::from(err).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
