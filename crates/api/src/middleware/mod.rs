//! Request extractors that run before handlers.
//!
//! - [`auth::AuthUser`] -- Resolves the bearer token to an existing user.

pub mod auth;
