//! Users domain module.
//!
//! This crate contains the user record, its request payload validation and the
//! in-memory record store. No HTTP concerns live here.

pub mod store;
pub mod user;

pub use store::{InMemoryUserStore, UserStore};
pub use user::{User, UserDraft, decode_draft, validate_create, validate_update};
