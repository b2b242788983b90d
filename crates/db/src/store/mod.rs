//! The resource store seam.
//!
//! Lookups return `Ok(None)` for missing ids and mutations return `Ok(false)` /
//! `Ok(None)` when their target is gone, leaving the not-found decision to the
//! caller. Snapshot appends are atomic per parent: two concurrent appends to the
//! same article or comment are applied one after the other, each with a strictly
//! later `created_at`.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use agora_core::types::DbId;
use async_trait::async_trait;

use crate::models::article::{Article, ArticleQuery, ArticleSnapshot, ArticleSummary, CreateArticle};
use crate::models::comment::{Comment, CommentQuery};
use crate::models::page::Paginated;
use crate::models::user::{CreateUser, User};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A unique field (e.g. username) is already taken.
    #[error("Duplicate value: {0}")]
    Duplicate(String),

    /// The author of a new article or comment was deleted before it was stored.
    #[error("Author {0} no longer exists")]
    AuthorNotFound(DbId),
}

#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Confirm the backing storage is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;

    // -- users --------------------------------------------------------------

    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError>;

    async fn find_user(&self, id: DbId) -> Result<Option<User>, StoreError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Remove a user along with every article and comment they authored.
    async fn delete_user(&self, id: DbId) -> Result<bool, StoreError>;

    // -- articles -----------------------------------------------------------

    /// Create an article whose history starts with one snapshot of `content`.
    ///
    /// Fails with [`StoreError::AuthorNotFound`] if `author_id` is not a user.
    async fn create_article(
        &self,
        author_id: DbId,
        content: &CreateArticle,
    ) -> Result<Article, StoreError>;

    async fn find_article(&self, id: DbId) -> Result<Option<Article>, StoreError>;

    async fn search_articles(
        &self,
        query: &ArticleQuery,
    ) -> Result<Paginated<ArticleSummary>, StoreError>;

    /// Append a new snapshot, returning the article with its updated history.
    async fn append_article_snapshot(
        &self,
        id: DbId,
        content: &CreateArticle,
    ) -> Result<Option<Article>, StoreError>;

    /// Snapshot history of an article, oldest first.
    async fn list_article_snapshots(
        &self,
        id: DbId,
    ) -> Result<Option<Vec<ArticleSnapshot>>, StoreError>;

    /// Delete an article, its snapshots and its comments.
    async fn delete_article(&self, id: DbId) -> Result<bool, StoreError>;

    // -- comments -----------------------------------------------------------

    /// Create a comment on `article_id`. Returns `None` if the article does not exist
    /// and fails with [`StoreError::AuthorNotFound`] if `author_id` is not a user.
    async fn create_comment(
        &self,
        article_id: DbId,
        author_id: DbId,
        body: &str,
    ) -> Result<Option<Comment>, StoreError>;

    async fn find_comment(&self, id: DbId) -> Result<Option<Comment>, StoreError>;

    async fn append_comment_snapshot(
        &self,
        id: DbId,
        body: &str,
    ) -> Result<Option<Comment>, StoreError>;

    async fn delete_comment(&self, id: DbId) -> Result<bool, StoreError>;

    async fn list_comments(&self, query: &CommentQuery) -> Result<Paginated<Comment>, StoreError>;
}
