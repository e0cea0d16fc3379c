//! HTTP mapping for code lifecycle errors.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use onetap_common::{CodeError, MessageResponse};

/// Error returned by route handlers
#[derive(Debug)]
pub struct ApiError(pub CodeError);

impl From<CodeError> for ApiError {
    fn from(err: CodeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Server-side failures keep their detail in the logs only
        let message = if self.0.is_client_error() {
            self.0.to_string()
        } else {
            tracing::error!(error = %self.0, "Request failed");
            "Internal server error".to_string()
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}
