//! Route definitions for articles.

use axum::routing::get;
use axum::Router;

use crate::handlers::article;
use crate::state::AppState;

/// Article routes mounted at `/articles`.
///
/// ```text
/// GET    /                          -> search_articles
/// POST   /                          -> create_article
/// GET    /{article_id}              -> get_article
/// PUT    /{article_id}              -> update_article
/// DELETE /{article_id}              -> delete_article
/// GET    /{article_id}/snapshots    -> list_snapshots
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(article::search_articles).post(article::create_article),
        )
        .route(
            "/{article_id}",
            get(article::get_article)
                .put(article::update_article)
                .delete(article::delete_article),
        )
        .route("/{article_id}/snapshots", get(article::list_snapshots))
}
