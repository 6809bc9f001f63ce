use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use userhub_core::DomainError;

use crate::app::dto::Envelope;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failures a handler reports to the client.
///
/// The `Display` text is the client-facing envelope message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid user ID")]
    InvalidId,

    #[error("Invalid JSON format")]
    InvalidBody,

    #[error("Name and email are required")]
    MissingFields,

    #[error("User not found")]
    UserNotFound,

    #[error("Route not found")]
    RouteNotFound,

    /// Detail is logged, never sent to the client.
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId | ApiError::InvalidBody | ApiError::MissingFields => {
                StatusCode::BAD_REQUEST
            }
            ApiError::UserNotFound | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Id parse failures are mapped to [`ApiError::InvalidId`] at the call site;
/// a bare `Decode` here always comes from a request body.
impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Decode(_) => ApiError::InvalidBody,
            DomainError::Validation(_) => ApiError::MissingFields,
            DomainError::NotFound => ApiError::UserNotFound,
            DomainError::Storage(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!(%detail, "request failed");
        }
        json_error(self.status(), self.to_string())
    }
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(Envelope::error(message))).into_response()
}
