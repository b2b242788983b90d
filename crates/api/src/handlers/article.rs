//! Handlers for the `/articles` resource.
//!
//! Updates never overwrite: each one appends a snapshot to the article's
//! history. Mutations are author-only.

use agora_core::content::{normalize_title, require_body};
use agora_core::error::CoreError;
use agora_core::permission::ensure_author;
use agora_core::types::DbId;
use agora_db::models::article::{Article, ArticleSnapshot, ArticleSummary, CreateArticle};
use agora_db::models::page::Paginated;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery, ValidJson};
use crate::middleware::auth::AuthUser;
use crate::query::ArticleSearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn article_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Article",
        id,
    })
}

/// Load an article or fail with `ARTICLE_NOT_FOUND`.
async fn ensure_article(state: &AppState, id: DbId) -> AppResult<Article> {
    state
        .store
        .find_article(id)
        .await?
        .ok_or_else(|| article_not_found(id))
}

/// Apply the content rules the DTO's length checks cannot express.
fn normalize_content(input: CreateArticle) -> AppResult<CreateArticle> {
    let title = normalize_title(&input.title)?;
    require_body(&input.body)?;
    Ok(CreateArticle {
        title,
        body: input.body,
    })
}

/// GET /api/v1/articles
pub async fn search_articles(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ArticleSearchParams>,
) -> AppResult<Json<Paginated<ArticleSummary>>> {
    let page = state.store.search_articles(&params.resolve()).await?;
    Ok(Json(page))
}

/// POST /api/v1/articles
pub async fn create_article(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(input): ValidJson<CreateArticle>,
) -> AppResult<(StatusCode, Json<DataResponse<Article>>)> {
    let content = normalize_content(input)?;
    let article = state.store.create_article(auth.user_id, &content).await?;

    tracing::info!(
        article_id = %article.id,
        user_id = %auth.user_id,
        "Article created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: article })))
}

/// GET /api/v1/articles/{article_id}
pub async fn get_article(
    State(state): State<AppState>,
    AppPath(article_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Article>>> {
    let article = ensure_article(&state, article_id).await?;
    Ok(Json(DataResponse { data: article }))
}

/// PUT /api/v1/articles/{article_id}
///
/// Appends a snapshot holding the new title and body.
pub async fn update_article(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(article_id): AppPath<DbId>,
    ValidJson(input): ValidJson<CreateArticle>,
) -> AppResult<Json<DataResponse<Article>>> {
    let existing = ensure_article(&state, article_id).await?;
    ensure_author(auth.user_id, existing.author_id, "Article")?;

    let content = normalize_content(input)?;
    let article = state
        .store
        .append_article_snapshot(article_id, &content)
        .await?
        .ok_or_else(|| article_not_found(article_id))?;

    tracing::info!(
        article_id = %article_id,
        user_id = %auth.user_id,
        snapshot_count = article.snapshots.len(),
        "Article snapshot appended",
    );

    Ok(Json(DataResponse { data: article }))
}

/// DELETE /api/v1/articles/{article_id}
///
/// Removes the article, its snapshots and its comments.
pub async fn delete_article(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(article_id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let existing = ensure_article(&state, article_id).await?;
    ensure_author(auth.user_id, existing.author_id, "Article")?;

    if !state.store.delete_article(article_id).await? {
        return Err(article_not_found(article_id));
    }

    tracing::info!(article_id = %article_id, user_id = %auth.user_id, "Article deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/articles/{article_id}/snapshots
///
/// Full edit history, oldest first. Only the author may read it.
pub async fn list_snapshots(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(article_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<ArticleSnapshot>>>> {
    let existing = ensure_article(&state, article_id).await?;
    ensure_author(auth.user_id, existing.author_id, "Article")?;

    let snapshots = state
        .store
        .list_article_snapshots(article_id)
        .await?
        .ok_or_else(|| article_not_found(article_id))?;

    Ok(Json(DataResponse { data: snapshots }))
}
