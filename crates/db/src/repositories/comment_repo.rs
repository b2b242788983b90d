//! Repository for the `comments` table.

use agora_core::types::{DbId, Timestamp};
use sqlx::PgExecutor;

use crate::models::comment::CommentRow;

const COLUMNS: &str = "id, article_id, author_id, created_at";

pub struct CommentRepo;

impl CommentRepo {
    pub async fn insert<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
        article_id: DbId,
        author_id: DbId,
        created_at: Timestamp,
    ) -> Result<CommentRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (id, article_id, author_id, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CommentRow>(&query)
            .bind(id)
            .bind(article_id)
            .bind(author_id)
            .bind(created_at)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<CommentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, CommentRow>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Fetch the row with `FOR UPDATE`, serializing snapshot appends for this comment.
    pub async fn lock_for_update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<CommentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, CommentRow>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// One page of an article's comments in discussion order (oldest first).
    pub async fn list_by_article<'e, E: PgExecutor<'e>>(
        executor: E,
        article_id: DbId,
        limit: i64,
        skip: i64,
    ) -> Result<Vec<CommentRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments
             WHERE article_id = $1
             ORDER BY created_at ASC, id ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, CommentRow>(&query)
            .bind(article_id)
            .bind(limit)
            .bind(skip)
            .fetch_all(executor)
            .await
    }

    pub async fn count_by_article<'e, E: PgExecutor<'e>>(
        executor: E,
        article_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE article_id = $1")
            .bind(article_id)
            .fetch_one(executor)
            .await
    }
}
