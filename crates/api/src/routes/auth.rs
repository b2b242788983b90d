//! Route definitions for account and token endpoints.

use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Auth routes mounted at `/auth`.
///
/// ```text
/// POST   /signup    -> signup
/// POST   /login     -> login
/// DELETE /me        -> withdraw
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/me", delete(auth::withdraw))
}
