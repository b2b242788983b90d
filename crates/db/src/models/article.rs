//! Article, article snapshot and related DTO models.

use agora_core::pagination::SortOrder;
use agora_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `articles` table. Content lives in `article_snapshots`.
#[derive(Debug, Clone, FromRow)]
pub struct ArticleRow {
    pub id: DbId,
    pub author_id: DbId,
    pub created_at: Timestamp,
}

/// An immutable version of an article's content.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ArticleSnapshot {
    pub id: DbId,
    pub article_id: DbId,
    pub title: String,
    pub body: String,
    pub created_at: Timestamp,
}

/// An article with its full snapshot history, oldest first.
///
/// Always holds at least one snapshot; the last one is the current content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    pub id: DbId,
    pub author_id: DbId,
    pub created_at: Timestamp,
    pub snapshots: Vec<ArticleSnapshot>,
}

impl Article {
    pub fn from_parts(row: ArticleRow, snapshots: Vec<ArticleSnapshot>) -> Self {
        Self {
            id: row.id,
            author_id: row.author_id,
            created_at: row.created_at,
            snapshots,
        }
    }

    /// The most recent snapshot.
    pub fn current(&self) -> Option<&ArticleSnapshot> {
        self.snapshots.last()
    }

    /// Listing view built from the current snapshot.
    pub fn summary(&self) -> Option<ArticleSummary> {
        self.current().map(|snapshot| ArticleSummary {
            id: self.id,
            author_id: self.author_id,
            title: snapshot.title.clone(),
            created_at: self.created_at,
            updated_at: snapshot.created_at,
        })
    }
}

/// Article listing entry.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ArticleSummary {
    pub id: DbId,
    pub author_id: DbId,
    pub title: String,
    pub created_at: Timestamp,
    /// Creation time of the current snapshot.
    pub updated_at: Timestamp,
}

/// Body for creating an article or appending a new version of one.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateArticle {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 20000))]
    pub body: String,
}

/// Resolved article search: already clamped and normalized.
#[derive(Debug, Clone, Default)]
pub struct ArticleQuery {
    pub skip: i64,
    pub limit: i64,
    /// Lowercased substring matched against the current title and body.
    pub search: Option<String>,
    pub author_id: Option<DbId>,
    pub sort: SortOrder,
}
