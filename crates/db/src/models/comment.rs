//! Comment, comment snapshot and related DTO models.

use agora_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    pub id: DbId,
    pub article_id: DbId,
    pub author_id: DbId,
    pub created_at: Timestamp,
}

/// An immutable version of a comment's text.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct CommentSnapshot {
    pub id: DbId,
    pub comment_id: DbId,
    pub body: String,
    pub created_at: Timestamp,
}

/// A comment with its snapshot history, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub article_id: DbId,
    pub author_id: DbId,
    pub created_at: Timestamp,
    pub snapshots: Vec<CommentSnapshot>,
}

impl Comment {
    pub fn from_parts(row: CommentRow, snapshots: Vec<CommentSnapshot>) -> Self {
        Self {
            id: row.id,
            article_id: row.article_id,
            author_id: row.author_id,
            created_at: row.created_at,
            snapshots,
        }
    }

    pub fn identity(&self) -> CommentIdentity {
        CommentIdentity {
            comment_id: self.id,
            article_id: self.article_id,
        }
    }
}

/// Minimal echo of a created or updated comment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentIdentity {
    pub comment_id: DbId,
    pub article_id: DbId,
}

/// DTO for commenting on an article.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateComment {
    pub article_id: DbId,
    #[validate(length(min = 1, max = 2000))]
    pub body: String,
}

/// DTO for appending a new version of a comment.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateComment {
    #[validate(length(min = 1, max = 2000))]
    pub body: String,
}

/// Resolved comment listing for one article.
#[derive(Debug, Clone)]
pub struct CommentQuery {
    pub article_id: DbId,
    pub skip: i64,
    pub limit: i64,
}
