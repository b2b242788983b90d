//! JWT-based authentication extractor for Axum handlers.

use agora_core::error::CoreError;
use agora_core::permission::{authenticate, Credential};
use agora_core::types::DbId;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::auth::jwt::{classify_token, JwtConfig};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// Rejects with `PERMISSION_REQUIRED`, `PERMISSION_INVALID` or
/// `PERMISSION_EXPIRED` before the handler runs. A token whose user has since
/// been removed counts as no identity at all.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<StatusCode> {
///     tracing::info!(user_id = %user.user_id, "handling request");
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's id (from `claims.sub`).
    pub user_id: DbId,
    pub username: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let credential = bearer_credential(&parts.headers, &state.config.jwt);
        let user_id = authenticate(credential)?;

        let user = state.store.find_user(user_id).await?.ok_or_else(|| {
            AppError::Core(CoreError::PermissionRequired(
                "User no longer exists".into(),
            ))
        })?;

        Ok(AuthUser {
            user_id: user.id,
            username: user.username,
        })
    }
}

/// Classify the `Authorization` header of a request.
pub fn bearer_credential(headers: &HeaderMap, jwt: &JwtConfig) -> Credential {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Credential::Missing;
    };

    let Some(token) = value
        .to_str()
        .ok()
        .and_then(|raw| raw.strip_prefix("Bearer "))
    else {
        return Credential::Invalid;
    };

    classify_token(token.trim(), jwt)
}
