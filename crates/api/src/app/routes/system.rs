use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use chrono::{SecondsFormat, Utc};

use crate::app::dto::{self, Envelope, HealthInfo};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub async fn health(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    let info = HealthInfo {
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        uptime: dto::format_uptime(services.uptime()),
    };
    (
        StatusCode::OK,
        Json(Envelope::success("Service is healthy", info.into())),
    )
}

pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
