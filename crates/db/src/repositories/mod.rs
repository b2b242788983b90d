//! Postgres repositories, one per table.
//!
//! Every function takes a generic [`sqlx::PgExecutor`] so it can run against
//! the pool or inside a transaction opened by the caller.

pub mod article_repo;
pub mod article_snapshot_repo;
pub mod comment_repo;
pub mod comment_snapshot_repo;
pub mod user_repo;

pub use article_repo::ArticleRepo;
pub use article_snapshot_repo::ArticleSnapshotRepo;
pub use comment_repo::CommentRepo;
pub use comment_snapshot_repo::CommentSnapshotRepo;
pub use user_repo::UserRepo;

/// Escape `LIKE` wildcards in user input and wrap it for substring matching.
pub(crate) fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[test]
    fn plain_text_is_wrapped() {
        assert_eq!(like_pattern("rust"), "%rust%");
    }
}
