//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: the injected user store plus the service clock
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: the response envelope and its payload shapes
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use userhub_users::UserStore;

use crate::middleware::{self, InterceptorChain};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(users: Arc<dyn UserStore>) -> Router {
    build_app_with(users, InterceptorChain::standard())
}

/// Same router with a caller-chosen interceptor chain.
pub fn build_app_with(users: Arc<dyn UserStore>, chain: InterceptorChain) -> Router {
    let services = Arc::new(services::build_services(users));

    // Interceptors wrap everything, including the fallback.
    routes::router().layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn_with_state(
                chain,
                middleware::intercept,
            ))
            .layer(Extension(services)),
    )
}
