//! Repository for the `comment_snapshots` table (append-only).

use agora_core::types::{new_id, DbId, Timestamp};
use sqlx::PgExecutor;

use crate::models::comment::CommentSnapshot;

const COLUMNS: &str = "id, comment_id, body, created_at";

pub struct CommentSnapshotRepo;

impl CommentSnapshotRepo {
    pub async fn insert<'e, E: PgExecutor<'e>>(
        executor: E,
        comment_id: DbId,
        body: &str,
        created_at: Timestamp,
    ) -> Result<CommentSnapshot, sqlx::Error> {
        let query = format!(
            "INSERT INTO comment_snapshots (id, comment_id, body, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CommentSnapshot>(&query)
            .bind(new_id())
            .bind(comment_id)
            .bind(body)
            .bind(created_at)
            .fetch_one(executor)
            .await
    }

    pub async fn latest_created_at<'e, E: PgExecutor<'e>>(
        executor: E,
        comment_id: DbId,
    ) -> Result<Option<Timestamp>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<Timestamp>>(
            "SELECT MAX(created_at) FROM comment_snapshots WHERE comment_id = $1",
        )
        .bind(comment_id)
        .fetch_one(executor)
        .await
    }

    pub async fn list_by_comment<'e, E: PgExecutor<'e>>(
        executor: E,
        comment_id: DbId,
    ) -> Result<Vec<CommentSnapshot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comment_snapshots
             WHERE comment_id = $1
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, CommentSnapshot>(&query)
            .bind(comment_id)
            .fetch_all(executor)
            .await
    }

    /// Snapshots for a batch of comments, grouped by comment and oldest first within each.
    pub async fn list_by_comments<'e, E: PgExecutor<'e>>(
        executor: E,
        comment_ids: &[DbId],
    ) -> Result<Vec<CommentSnapshot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comment_snapshots
             WHERE comment_id = ANY($1)
             ORDER BY comment_id, created_at ASC"
        );
        sqlx::query_as::<_, CommentSnapshot>(&query)
            .bind(comment_ids)
            .fetch_all(executor)
            .await
    }
}
