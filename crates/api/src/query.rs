//! Query-string parameter types for list endpoints.
//!
//! Raw parameters are resolved into the store's query types here, so clamping
//! and normalization happen once before any backend sees them.

use agora_core::pagination::{
    clamp_limit, clamp_skip, normalize_search, SortOrder, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};
use agora_core::types::DbId;
use agora_db::models::article::ArticleQuery;
use agora_db::models::comment::CommentQuery;
use serde::Deserialize;

/// Query parameters for `GET /articles`.
#[derive(Debug, Default, Deserialize)]
pub struct ArticleSearchParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub author_id: Option<DbId>,
    /// `latest` (default) or `oldest`. Anything else fails deserialization.
    #[serde(default)]
    pub sort: SortOrder,
}

impl ArticleSearchParams {
    pub fn resolve(&self) -> ArticleQuery {
        ArticleQuery {
            skip: clamp_skip(self.skip),
            limit: clamp_limit(self.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT),
            search: normalize_search(self.search.as_deref()),
            author_id: self.author_id,
            sort: self.sort,
        }
    }
}

/// Query parameters for `GET /comments`.
#[derive(Debug, Deserialize)]
pub struct CommentListParams {
    pub article_id: DbId,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl CommentListParams {
    pub fn resolve(&self) -> CommentQuery {
        CommentQuery {
            article_id: self.article_id,
            skip: clamp_skip(self.skip),
            limit: clamp_limit(self.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_params_are_clamped_and_normalized() {
        let params = ArticleSearchParams {
            skip: Some(-2),
            limit: Some(1000),
            search: Some("  Rust ".into()),
            ..Default::default()
        };
        let query = params.resolve();
        assert_eq!(query.skip, 0);
        assert_eq!(query.limit, MAX_PAGE_LIMIT);
        assert_eq!(query.search.as_deref(), Some("rust"));
        assert_eq!(query.sort, SortOrder::Latest);
    }

    #[test]
    fn comment_params_use_default_limit() {
        let article_id = agora_core::types::new_id();
        let params = CommentListParams {
            article_id,
            skip: None,
            limit: None,
        };
        let query = params.resolve();
        assert_eq!(query.article_id, article_id);
        assert_eq!(query.limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(query.skip, 0);
    }
}
