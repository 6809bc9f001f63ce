//! `userhub-core` — shared domain building blocks.
//!
//! This crate contains **pure domain** primitives (no HTTP, no storage).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::UserId;
