use axum::{Router, routing::get};

pub mod system;
pub mod users;

/// Router for every public endpoint.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .nest("/api/users", users::router())
        .fallback(system::not_found)
}
