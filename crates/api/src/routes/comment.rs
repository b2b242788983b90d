//! Route definitions for comments.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::comment;
use crate::state::AppState;

/// Comment routes mounted at `/comments`.
///
/// ```text
/// GET    /                 -> list_comments (?article_id=)
/// POST   /                 -> create_comment
/// PUT    /{comment_id}     -> update_comment
/// DELETE /{comment_id}     -> delete_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(comment::list_comments).post(comment::create_comment),
        )
        .route(
            "/{comment_id}",
            put(comment::update_comment).delete(comment::delete_comment),
        )
}
