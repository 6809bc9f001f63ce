//! HTTP API: server configuration, routing, interceptors and request/response
//! mapping for the users service.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
