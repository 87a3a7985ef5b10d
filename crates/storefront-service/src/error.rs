//! API error types and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use storefront_store::StoreError;

/// API error type.
///
/// Rendered as a plain-text body carrying the message, with the matching
/// HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed body, identifier, path or query parameter.
    #[error("{0}")]
    BadRequest(String),

    /// No matching row or document.
    #[error("{0}")]
    NotFound(String),

    /// Store connectivity, query or transaction failure.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                msg
            }
            Self::BadRequest(msg) | Self::NotFound(msg) => msg,
        };

        (status, message).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_variants() {
        assert_eq!(
            ApiError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_errors_become_internal_with_their_text() {
        let err: ApiError = StoreError::Database("connection refused".into()).into();
        assert!(matches!(&err, ApiError::Internal(msg) if msg.contains("connection refused")));
    }

    #[test]
    fn response_body_is_plain_text() {
        let response = ApiError::NotFound("User not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(content_type.starts_with("text/plain"));
    }
}
