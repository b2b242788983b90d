//! Repository for the `articles` table.
//!
//! Article content is not stored here; see [`super::ArticleSnapshotRepo`].

use agora_core::types::{DbId, Timestamp};
use sqlx::PgExecutor;

use super::like_pattern;
use crate::models::article::{ArticleQuery, ArticleRow, ArticleSummary};

/// Column list for articles queries.
const COLUMNS: &str = "id, author_id, created_at";

/// Filter shared by [`ArticleRepo::search`] and [`ArticleRepo::count`].
///
/// `s` is the current (latest) snapshot of each article.
const SEARCH_FROM: &str = "FROM articles a
     JOIN LATERAL (
         SELECT title, body, created_at FROM article_snapshots
         WHERE article_id = a.id
         ORDER BY created_at DESC
         LIMIT 1
     ) s ON TRUE
     WHERE ($1::UUID IS NULL OR a.author_id = $1)
       AND ($2::TEXT IS NULL OR LOWER(s.title) LIKE $2 OR LOWER(s.body) LIKE $2)";

pub struct ArticleRepo;

impl ArticleRepo {
    /// Insert the article row. The caller adds the first snapshot in the same transaction.
    pub async fn insert<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
        author_id: DbId,
        created_at: Timestamp,
    ) -> Result<ArticleRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO articles (id, author_id, created_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArticleRow>(&query)
            .bind(id)
            .bind(author_id)
            .bind(created_at)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<ArticleRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE id = $1");
        sqlx::query_as::<_, ArticleRow>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Fetch the row with `FOR UPDATE`, serializing snapshot appends for this article.
    pub async fn lock_for_update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<ArticleRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, ArticleRow>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Fetch the row with `FOR SHARE` so it cannot be deleted until the transaction ends.
    pub async fn lock_for_share<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<ArticleRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE id = $1 FOR SHARE");
        sqlx::query_as::<_, ArticleRow>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Delete an article; snapshots and comments cascade.
    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// One page of article summaries matching `filter`.
    pub async fn search<'e, E: PgExecutor<'e>>(
        executor: E,
        filter: &ArticleQuery,
    ) -> Result<Vec<ArticleSummary>, sqlx::Error> {
        let dir = filter.sort.as_sql();
        let query = format!(
            "SELECT a.id, a.author_id, s.title, a.created_at, s.created_at AS updated_at
             {SEARCH_FROM}
             ORDER BY a.created_at {dir}, a.id {dir}
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, ArticleSummary>(&query)
            .bind(filter.author_id)
            .bind(filter.search.as_deref().map(like_pattern))
            .bind(filter.limit)
            .bind(filter.skip)
            .fetch_all(executor)
            .await
    }

    /// Number of articles matching `filter`, ignoring paging.
    pub async fn count<'e, E: PgExecutor<'e>>(
        executor: E,
        filter: &ArticleQuery,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) {SEARCH_FROM}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(filter.author_id)
            .bind(filter.search.as_deref().map(like_pattern))
            .fetch_one(executor)
            .await
    }
}
