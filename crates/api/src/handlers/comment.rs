//! Handlers for the `/comments` resource.

use agora_core::content::require_body;
use agora_core::error::CoreError;
use agora_core::permission::ensure_author;
use agora_core::types::DbId;
use agora_db::models::comment::{Comment, CommentIdentity, CreateComment, UpdateComment};
use agora_db::models::page::Paginated;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery, ValidJson};
use crate::middleware::auth::AuthUser;
use crate::query::CommentListParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn comment_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Comment",
        id,
    })
}

fn article_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Article",
        id,
    })
}

async fn ensure_comment(state: &AppState, id: DbId) -> AppResult<Comment> {
    state
        .store
        .find_comment(id)
        .await?
        .ok_or_else(|| comment_not_found(id))
}

/// GET /api/v1/comments?article_id=
pub async fn list_comments(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<CommentListParams>,
) -> AppResult<Json<Paginated<Comment>>> {
    let query = params.resolve();
    if state.store.find_article(query.article_id).await?.is_none() {
        return Err(article_not_found(query.article_id));
    }

    let page = state.store.list_comments(&query).await?;
    Ok(Json(page))
}

/// POST /api/v1/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(input): ValidJson<CreateComment>,
) -> AppResult<(StatusCode, Json<DataResponse<CommentIdentity>>)> {
    require_body(&input.body)?;

    let comment = state
        .store
        .create_comment(input.article_id, auth.user_id, &input.body)
        .await?
        .ok_or_else(|| article_not_found(input.article_id))?;

    tracing::info!(
        comment_id = %comment.id,
        article_id = %comment.article_id,
        user_id = %auth.user_id,
        "Comment created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: comment.identity(),
        }),
    ))
}

/// PUT /api/v1/comments/{comment_id}
///
/// Appends a snapshot with the new body and echoes the comment's identity.
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(comment_id): AppPath<DbId>,
    ValidJson(input): ValidJson<UpdateComment>,
) -> AppResult<(StatusCode, Json<DataResponse<CommentIdentity>>)> {
    let existing = ensure_comment(&state, comment_id).await?;
    ensure_author(auth.user_id, existing.author_id, "Comment")?;
    require_body(&input.body)?;

    let comment = state
        .store
        .append_comment_snapshot(comment_id, &input.body)
        .await?
        .ok_or_else(|| comment_not_found(comment_id))?;

    tracing::info!(
        comment_id = %comment_id,
        user_id = %auth.user_id,
        snapshot_count = comment.snapshots.len(),
        "Comment snapshot appended",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: comment.identity(),
        }),
    ))
}

/// DELETE /api/v1/comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(comment_id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let existing = ensure_comment(&state, comment_id).await?;
    ensure_author(auth.user_id, existing.author_id, "Comment")?;

    if !state.store.delete_comment(comment_id).await? {
        return Err(comment_not_found(comment_id));
    }

    tracing::info!(comment_id = %comment_id, user_id = %auth.user_id, "Comment deleted");
    Ok(StatusCode::NO_CONTENT)
}
