use agora_core::snapshot::next_snapshot_time;
use agora_core::types::{new_id, DbId};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::{ResourceStore, StoreError};
use crate::models::article::{Article, ArticleQuery, ArticleSnapshot, ArticleSummary, CreateArticle};
use crate::models::comment::{Comment, CommentQuery, CommentSnapshot};
use crate::models::page::Paginated;
use crate::models::user::{CreateUser, User};

/// In-process [`ResourceStore`].
///
/// Each map entry is guarded by its shard lock, so an append holds exactly its
/// parent's entry for the duration of the push. No guard is ever held across
/// an `.await`.
#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<DbId, User>,
    usernames: DashMap<String, DbId>,
    articles: DashMap<DbId, Article>,
    comments: DashMap<DbId, Comment>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn remove_article_cascade(&self, id: DbId) -> bool {
        if self.articles.remove(&id).is_none() {
            return false;
        }
        self.comments.retain(|_, comment| comment.article_id != id);
        true
    }
}

fn matches_search(article: &Article, query: &ArticleQuery) -> bool {
    if query.author_id.is_some_and(|author| author != article.author_id) {
        return false;
    }
    let Some(term) = query.search.as_deref() else {
        return true;
    };
    article.current().is_some_and(|snapshot| {
        snapshot.title.to_lowercase().contains(term) || snapshot.body.to_lowercase().contains(term)
    })
}

/// Slice `items` by `skip`/`limit`; both are already clamped non-negative.
fn page<T>(items: Vec<T>, skip: i64, limit: i64) -> Vec<T> {
    let skip = usize::try_from(skip).unwrap_or(usize::MAX);
    let limit = usize::try_from(limit).unwrap_or(0);
    items.into_iter().skip(skip).take(limit).collect()
}

#[async_trait]
impl ResourceStore for MemoryStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError> {
        match self.usernames.entry(input.username.clone()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(format!(
                "username '{}' is already taken",
                input.username
            ))),
            Entry::Vacant(slot) => {
                let user = User {
                    id: new_id(),
                    username: input.username.clone(),
                    password_hash: input.password_hash.clone(),
                    created_at: Utc::now(),
                };
                self.users.insert(user.id, user.clone());
                slot.insert(user.id);
                Ok(user)
            }
        }
    }

    async fn find_user(&self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(self.users.get(&id).map(|user| user.clone()))
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let Some(id) = self.usernames.get(username).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|user| user.clone()))
    }

    async fn delete_user(&self, id: DbId) -> Result<bool, StoreError> {
        let Some((_, user)) = self.users.remove(&id) else {
            return Ok(false);
        };
        self.usernames.remove(&user.username);

        let authored: Vec<DbId> = self
            .articles
            .iter()
            .filter(|entry| entry.author_id == id)
            .map(|entry| entry.id)
            .collect();
        for article_id in authored {
            self.remove_article_cascade(article_id);
        }
        self.comments.retain(|_, comment| comment.author_id != id);
        Ok(true)
    }

    async fn create_article(
        &self,
        author_id: DbId,
        content: &CreateArticle,
    ) -> Result<Article, StoreError> {
        // Holding the author's entry makes a concurrent `delete_user` wait, and
        // its cascade then sweeps this article.
        let Some(_author) = self.users.get(&author_id) else {
            return Err(StoreError::AuthorNotFound(author_id));
        };
        let id = new_id();
        let created_at = next_snapshot_time(None, Utc::now());
        let article = Article {
            id,
            author_id,
            created_at,
            snapshots: vec![ArticleSnapshot {
                id: new_id(),
                article_id: id,
                title: content.title.clone(),
                body: content.body.clone(),
                created_at,
            }],
        };
        self.articles.insert(id, article.clone());
        Ok(article)
    }

    async fn find_article(&self, id: DbId) -> Result<Option<Article>, StoreError> {
        Ok(self.articles.get(&id).map(|article| article.clone()))
    }

    async fn search_articles(
        &self,
        query: &ArticleQuery,
    ) -> Result<Paginated<ArticleSummary>, StoreError> {
        let mut matched: Vec<ArticleSummary> = self
            .articles
            .iter()
            .filter(|entry| matches_search(entry.value(), query))
            .filter_map(|entry| entry.summary())
            .collect();

        matched.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        if query.sort.is_descending() {
            matched.reverse();
        }

        let total = i64::try_from(matched.len()).unwrap_or(i64::MAX);
        let data = page(matched, query.skip, query.limit);
        Ok(Paginated::new(data, query.skip, query.limit, total))
    }

    async fn append_article_snapshot(
        &self,
        id: DbId,
        content: &CreateArticle,
    ) -> Result<Option<Article>, StoreError> {
        let Some(mut article) = self.articles.get_mut(&id) else {
            return Ok(None);
        };
        let last = article.current().map(|snapshot| snapshot.created_at);
        article.snapshots.push(ArticleSnapshot {
            id: new_id(),
            article_id: id,
            title: content.title.clone(),
            body: content.body.clone(),
            created_at: next_snapshot_time(last, Utc::now()),
        });
        Ok(Some(article.clone()))
    }

    async fn list_article_snapshots(
        &self,
        id: DbId,
    ) -> Result<Option<Vec<ArticleSnapshot>>, StoreError> {
        Ok(self.articles.get(&id).map(|article| article.snapshots.clone()))
    }

    async fn delete_article(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.remove_article_cascade(id))
    }

    async fn create_comment(
        &self,
        article_id: DbId,
        author_id: DbId,
        body: &str,
    ) -> Result<Option<Comment>, StoreError> {
        // Both guards stay alive until the comment is inserted, so a concurrent
        // article or account delete either runs first or sweeps this comment.
        let Some(_author) = self.users.get(&author_id) else {
            return Err(StoreError::AuthorNotFound(author_id));
        };
        let Some(_article) = self.articles.get(&article_id) else {
            return Ok(None);
        };
        let id = new_id();
        let created_at = next_snapshot_time(None, Utc::now());
        let comment = Comment {
            id,
            article_id,
            author_id,
            created_at,
            snapshots: vec![CommentSnapshot {
                id: new_id(),
                comment_id: id,
                body: body.to_string(),
                created_at,
            }],
        };
        self.comments.insert(id, comment.clone());
        Ok(Some(comment))
    }

    async fn find_comment(&self, id: DbId) -> Result<Option<Comment>, StoreError> {
        Ok(self.comments.get(&id).map(|comment| comment.clone()))
    }

    async fn append_comment_snapshot(
        &self,
        id: DbId,
        body: &str,
    ) -> Result<Option<Comment>, StoreError> {
        let Some(mut comment) = self.comments.get_mut(&id) else {
            return Ok(None);
        };
        let last = comment.snapshots.last().map(|snapshot| snapshot.created_at);
        comment.snapshots.push(CommentSnapshot {
            id: new_id(),
            comment_id: id,
            body: body.to_string(),
            created_at: next_snapshot_time(last, Utc::now()),
        });
        Ok(Some(comment.clone()))
    }

    async fn delete_comment(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.comments.remove(&id).is_some())
    }

    async fn list_comments(&self, query: &CommentQuery) -> Result<Paginated<Comment>, StoreError> {
        let mut matched: Vec<Comment> = self
            .comments
            .iter()
            .filter(|entry| entry.article_id == query.article_id)
            .map(|entry| entry.value().clone())
            .collect();
        matched.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));

        let total = i64::try_from(matched.len()).unwrap_or(i64::MAX);
        let data = page(matched, query.skip, query.limit);
        Ok(Paginated::new(data, query.skip, query.limit, total))
    }
}
