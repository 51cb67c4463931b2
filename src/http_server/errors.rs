//! # HTTP API Errors

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::executor::ResolveError;

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Filter rejected or remote call failed
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Request body is not a JSON resolution request
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// No route matched
    #[error("Resource not found")]
    NotFound,
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Resolve(e) if e.is_caller_error() => StatusCode::BAD_REQUEST,
            ApiError::Resolve(_) => StatusCode::BAD_GATEWAY,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Resolve(e) => e.code(),
            ApiError::InvalidBody(_) => "FLATQUERY_API_INVALID_BODY",
            ApiError::NotFound => "FLATQUERY_API_NOT_FOUND",
        }
    }

    /// Message shown to the caller, without the code prefix
    pub fn message(&self) -> String {
        match self {
            ApiError::Resolve(ResolveError::Filter(e)) => e.message().to_string(),
            other => other.to_string(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.message(),
            code: err.code(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterError;
    use crate::remote::RemoteError;

    #[test]
    fn test_status_codes() {
        let rejected = ApiError::from(ResolveError::from(FilterError::missing_property()));
        assert_eq!(rejected.status_code(), StatusCode::BAD_REQUEST);

        let remote = ApiError::from(ResolveError::from(RemoteError::Transport("reset".into())));
        assert_eq!(remote.status_code(), StatusCode::BAD_GATEWAY);

        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::InvalidBody("eof".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_filter_message_has_no_code_prefix() {
        let err = ApiError::from(ResolveError::from(FilterError::missing_property()));
        let body = ErrorResponse::from(&err);

        assert_eq!(body.error, "Property is required in filter condition");
        assert_eq!(body.code, "FLATQUERY_FILTER_MISSING_PROPERTY");
    }

    #[test]
    fn test_not_found_body() {
        let body = ErrorResponse::from(&ApiError::NotFound);
        assert_eq!(body.error, "Resource not found");
    }
}
