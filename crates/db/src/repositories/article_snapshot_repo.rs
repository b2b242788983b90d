//! Repository for the `article_snapshots` table.
//!
//! Snapshots are immutable: there is no update and no per-row delete.

use agora_core::types::{new_id, DbId, Timestamp};
use sqlx::PgExecutor;

use crate::models::article::{ArticleSnapshot, CreateArticle};

const COLUMNS: &str = "id, article_id, title, body, created_at";

pub struct ArticleSnapshotRepo;

impl ArticleSnapshotRepo {
    pub async fn insert<'e, E: PgExecutor<'e>>(
        executor: E,
        article_id: DbId,
        content: &CreateArticle,
        created_at: Timestamp,
    ) -> Result<ArticleSnapshot, sqlx::Error> {
        let query = format!(
            "INSERT INTO article_snapshots (id, article_id, title, body, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArticleSnapshot>(&query)
            .bind(new_id())
            .bind(article_id)
            .bind(&content.title)
            .bind(&content.body)
            .bind(created_at)
            .fetch_one(executor)
            .await
    }

    /// Creation time of the newest snapshot, if any.
    pub async fn latest_created_at<'e, E: PgExecutor<'e>>(
        executor: E,
        article_id: DbId,
    ) -> Result<Option<Timestamp>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<Timestamp>>(
            "SELECT MAX(created_at) FROM article_snapshots WHERE article_id = $1",
        )
        .bind(article_id)
        .fetch_one(executor)
        .await
    }

    /// All snapshots of an article, oldest first.
    pub async fn list_by_article<'e, E: PgExecutor<'e>>(
        executor: E,
        article_id: DbId,
    ) -> Result<Vec<ArticleSnapshot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM article_snapshots
             WHERE article_id = $1
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, ArticleSnapshot>(&query)
            .bind(article_id)
            .fetch_all(executor)
            .await
    }
}
