use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use giftwell_core::CoreError;
use giftwell_types::api::Ack;

/// Core failures mapped onto the wire. Authorization failures stay 401
/// (the service's long-standing contract); storage detail is logged here
/// and never echoed to the caller.
pub struct ApiError(CoreError);

pub type ApiResult<T> = Result<T, ApiError>;

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self(CoreError::Storage(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            CoreError::Unauthenticated | CoreError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "unauthorised".to_string())
            }
            CoreError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            CoreError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            CoreError::Invalid(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            CoreError::Storage(e) => {
                error!("storage failure: {e:#}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };
        (status, Json(Ack::failed(message))).into_response()
    }
}
