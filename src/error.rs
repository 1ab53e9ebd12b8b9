use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::client::ClientError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Upstream(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg).into_response(),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response(),
        }
    }
}

impl From<ClientError> for ApiError {
    fn from(value: ClientError) -> Self {
        match value {
            ClientError::Http(err) => {
                error!("HTTP error: {err}");
                ApiError::Upstream("Failed to reach the scheduling service".into())
            }
            ClientError::Rejected(_) => ApiError::Upstream(value.to_string()),
            ClientError::MissingData => ApiError::Internal(value.to_string()),
        }
    }
}
