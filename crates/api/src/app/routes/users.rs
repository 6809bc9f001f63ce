use std::sync::Arc;

use axum::{
    Json, Router, async_trait,
    body::Bytes,
    extract::{Extension, FromRequestParts, Path},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
    routing::get,
};

use userhub_core::UserId;
use userhub_users::{decode_draft, validate_create, validate_update};

use crate::app::dto::Envelope;
use crate::app::errors::{ApiError, ApiResult};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

pub async fn list_users(Extension(services): Extension<Arc<AppServices>>) -> ApiResult<Response> {
    let users = services.users().list()?;
    Ok(respond(
        StatusCode::OK,
        Envelope::success("Users retrieved successfully", users.into()),
    ))
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    UserIdPath(id): UserIdPath,
) -> ApiResult<Response> {
    let user = services.users().get(id)?.ok_or(ApiError::UserNotFound)?;
    Ok(respond(StatusCode::OK, Envelope::success("User found", user.into())))
}

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> ApiResult<Response> {
    let draft = decode_draft(&body)?;
    validate_create(&draft)?;

    let user = services.users().insert(draft)?;
    tracing::info!(user_id = %user.id, "user created");
    Ok(respond(
        StatusCode::CREATED,
        Envelope::success("User created successfully", user.into()),
    ))
}

pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    UserIdPath(id): UserIdPath,
    body: Bytes,
) -> ApiResult<Response> {
    let draft = decode_draft(&body)?;
    validate_update(&draft)?;

    let user = services
        .users()
        .replace(id, draft)?
        .ok_or(ApiError::UserNotFound)?;
    tracing::info!(user_id = %id, "user updated");
    Ok(respond(
        StatusCode::OK,
        Envelope::success("User updated successfully", user.into()),
    ))
}

pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    UserIdPath(id): UserIdPath,
) -> ApiResult<Response> {
    services.users().remove(id)?.ok_or(ApiError::UserNotFound)?;
    tracing::info!(user_id = %id, "user deleted");
    Ok(respond(StatusCode::OK, Envelope::done("User deleted successfully")))
}

/// The `{id}` path segment, parsed.
///
/// Any segment axum cannot hand over as a string (e.g. percent-encoded bytes
/// that are not UTF-8) is treated like a non-numeric id, so the client still
/// gets the error envelope.
pub struct UserIdPath(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for UserIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::InvalidId)?;
        parse_id(&raw).map(Self)
    }
}

fn parse_id(raw: &str) -> ApiResult<UserId> {
    raw.parse().map_err(|_| ApiError::InvalidId)
}

fn respond(status: StatusCode, envelope: Envelope) -> Response {
    (status, Json(envelope)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_integers_only() {
        assert_eq!(parse_id("12").unwrap(), UserId::new(12));
        assert_eq!(parse_id("-1").unwrap(), UserId::new(-1));
        assert!(matches!(parse_id("abc"), Err(ApiError::InvalidId)));
        assert!(matches!(parse_id("1a"), Err(ApiError::InvalidId)));
    }
}
