use std::collections::HashMap;

use agora_core::snapshot::next_snapshot_time;
use agora_core::types::{new_id, DbId};
use async_trait::async_trait;
use chrono::Utc;

use super::{ResourceStore, StoreError};
use crate::models::article::{Article, ArticleQuery, ArticleSnapshot, ArticleSummary, CreateArticle};
use crate::models::comment::{Comment, CommentQuery, CommentSnapshot};
use crate::models::page::Paginated;
use crate::models::user::{CreateUser, User};
use crate::repositories::{
    ArticleRepo, ArticleSnapshotRepo, CommentRepo, CommentSnapshotRepo, UserRepo,
};
use crate::DbPool;

/// PostgreSQL unique-violation SQLSTATE.
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL foreign-key-violation SQLSTATE.
const FOREIGN_KEY_VIOLATION: &str = "23503";

fn has_code(err: &sqlx::Error, expected: &str) -> bool {
    err.as_database_error()
        .and_then(|db_err| db_err.code())
        .is_some_and(|code| code == expected)
}

/// An author row removed between authentication and the insert surfaces as a
/// foreign-key violation on `author_id`.
fn author_missing(author_id: DbId) -> impl FnOnce(sqlx::Error) -> StoreError {
    move |err| {
        if has_code(&err, FOREIGN_KEY_VIOLATION) {
            tracing::warn!(%author_id, "Insert rejected: author no longer exists");
            StoreError::AuthorNotFound(author_id)
        } else {
            StoreError::Database(err)
        }
    }
}

/// [`ResourceStore`] backed by Postgres.
///
/// Appends lock the parent row (`SELECT ... FOR UPDATE`) inside a transaction,
/// so concurrent appends to one parent queue up while different parents proceed
/// independently.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl ResourceStore for PgStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError> {
        UserRepo::create(&self.pool, input).await.map_err(|err| {
            if has_code(&err, UNIQUE_VIOLATION) {
                tracing::warn!(username = %input.username, "Signup rejected: username taken");
                StoreError::Duplicate(format!("username '{}' is already taken", input.username))
            } else {
                StoreError::Database(err)
            }
        })
    }

    async fn find_user(&self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_username(&self.pool, username).await?)
    }

    async fn delete_user(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(UserRepo::delete(&self.pool, id).await?)
    }

    async fn create_article(
        &self,
        author_id: DbId,
        content: &CreateArticle,
    ) -> Result<Article, StoreError> {
        let created_at = next_snapshot_time(None, Utc::now());
        let mut tx = self.pool.begin().await?;
        let row = ArticleRepo::insert(&mut *tx, new_id(), author_id, created_at)
            .await
            .map_err(author_missing(author_id))?;
        let snapshot = ArticleSnapshotRepo::insert(&mut *tx, row.id, content, created_at).await?;
        tx.commit().await?;
        Ok(Article::from_parts(row, vec![snapshot]))
    }

    async fn find_article(&self, id: DbId) -> Result<Option<Article>, StoreError> {
        let Some(row) = ArticleRepo::find_by_id(&self.pool, id).await? else {
            return Ok(None);
        };
        let snapshots = ArticleSnapshotRepo::list_by_article(&self.pool, id).await?;
        Ok(Some(Article::from_parts(row, snapshots)))
    }

    async fn search_articles(
        &self,
        query: &ArticleQuery,
    ) -> Result<Paginated<ArticleSummary>, StoreError> {
        let data = ArticleRepo::search(&self.pool, query).await?;
        let total = ArticleRepo::count(&self.pool, query).await?;
        Ok(Paginated::new(data, query.skip, query.limit, total))
    }

    async fn append_article_snapshot(
        &self,
        id: DbId,
        content: &CreateArticle,
    ) -> Result<Option<Article>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let Some(row) = ArticleRepo::lock_for_update(&mut *tx, id).await? else {
            return Ok(None);
        };
        let last = ArticleSnapshotRepo::latest_created_at(&mut *tx, id).await?;
        let created_at = next_snapshot_time(last, Utc::now());
        ArticleSnapshotRepo::insert(&mut *tx, id, content, created_at).await?;
        let snapshots = ArticleSnapshotRepo::list_by_article(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(Some(Article::from_parts(row, snapshots)))
    }

    async fn list_article_snapshots(
        &self,
        id: DbId,
    ) -> Result<Option<Vec<ArticleSnapshot>>, StoreError> {
        if ArticleRepo::find_by_id(&self.pool, id).await?.is_none() {
            return Ok(None);
        }
        Ok(Some(ArticleSnapshotRepo::list_by_article(&self.pool, id).await?))
    }

    async fn delete_article(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(ArticleRepo::delete(&self.pool, id).await?)
    }

    async fn create_comment(
        &self,
        article_id: DbId,
        author_id: DbId,
        body: &str,
    ) -> Result<Option<Comment>, StoreError> {
        let mut tx = self.pool.begin().await?;
        // Holding a share lock keeps a concurrent delete from orphaning the comment.
        if ArticleRepo::lock_for_share(&mut *tx, article_id).await?.is_none() {
            return Ok(None);
        }
        let created_at = next_snapshot_time(None, Utc::now());
        let row = CommentRepo::insert(&mut *tx, new_id(), article_id, author_id, created_at)
            .await
            .map_err(author_missing(author_id))?;
        let snapshot = CommentSnapshotRepo::insert(&mut *tx, row.id, body, created_at).await?;
        tx.commit().await?;
        Ok(Some(Comment::from_parts(row, vec![snapshot])))
    }

    async fn find_comment(&self, id: DbId) -> Result<Option<Comment>, StoreError> {
        let Some(row) = CommentRepo::find_by_id(&self.pool, id).await? else {
            return Ok(None);
        };
        let snapshots = CommentSnapshotRepo::list_by_comment(&self.pool, id).await?;
        Ok(Some(Comment::from_parts(row, snapshots)))
    }

    async fn append_comment_snapshot(
        &self,
        id: DbId,
        body: &str,
    ) -> Result<Option<Comment>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let Some(row) = CommentRepo::lock_for_update(&mut *tx, id).await? else {
            return Ok(None);
        };
        let last = CommentSnapshotRepo::latest_created_at(&mut *tx, id).await?;
        let created_at = next_snapshot_time(last, Utc::now());
        CommentSnapshotRepo::insert(&mut *tx, id, body, created_at).await?;
        let snapshots = CommentSnapshotRepo::list_by_comment(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(Some(Comment::from_parts(row, snapshots)))
    }

    async fn delete_comment(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(CommentRepo::delete(&self.pool, id).await?)
    }

    async fn list_comments(&self, query: &CommentQuery) -> Result<Paginated<Comment>, StoreError> {
        let rows =
            CommentRepo::list_by_article(&self.pool, query.article_id, query.limit, query.skip)
                .await?;
        let total = CommentRepo::count_by_article(&self.pool, query.article_id).await?;

        let ids: Vec<DbId> = rows.iter().map(|row| row.id).collect();
        let mut by_comment: HashMap<DbId, Vec<CommentSnapshot>> = HashMap::new();
        for snapshot in CommentSnapshotRepo::list_by_comments(&self.pool, &ids).await? {
            by_comment.entry(snapshot.comment_id).or_default().push(snapshot);
        }

        let data = rows
            .into_iter()
            .map(|row| {
                let snapshots = by_comment.remove(&row.id).unwrap_or_default();
                Comment::from_parts(row, snapshots)
            })
            .collect();
        Ok(Paginated::new(data, query.skip, query.limit, total))
    }
}
