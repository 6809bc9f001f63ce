use std::time::{Duration, Instant};

use axum::http::Method;

/// Monotonic start marker for the running service.
///
/// Created once when the app is built; the health check reports time elapsed
/// since then.
#[derive(Debug, Copy, Clone)]
pub struct ServiceClock {
    started_at: Instant,
}

impl ServiceClock {
    pub fn start() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

/// What interceptors know about the request being served.
#[derive(Debug, Clone)]
pub struct RequestInfo {
    method: Method,
    path: String,
    started_at: Instant,
}

impl RequestInfo {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            started_at: Instant::now(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}
