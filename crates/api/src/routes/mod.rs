pub mod article;
pub mod auth;
pub mod comment;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                        create account (public)
/// /auth/login                         issue access token (public)
/// /auth/me                            withdraw (requires auth)
///
/// /articles                           search (public), create
/// /articles/{article_id}              get (public), update, delete
/// /articles/{article_id}/snapshots    history (author only)
///
/// /comments                           list (?article_id, public), create
/// /comments/{comment_id}              update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/articles", article::router())
        .nest("/comments", comment::router())
}
