//! Handlers for the `/auth` resource (signup, login, withdraw).

use agora_core::account::validate_username;
use agora_core::error::CoreError;
use agora_db::models::user::{CreateUser, UserResponse};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_new_password, password_matches};
use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
///
/// Username and password rules run in the handler.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    validate_username(&input.username)?;
    let password_hash = hash_new_password(&input.password)?;

    let user = state
        .store
        .create_user(&CreateUser {
            username: input.username,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User signed up");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(&user),
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Unknown usernames and wrong passwords fail identically.
pub async fn login(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = state
        .store
        .find_user_by_username(&input.username)
        .await?
        .ok_or(AppError::Core(CoreError::InvalidCredentials))?;

    if !password_matches(&input.password, &user.password_hash)? {
        tracing::debug!(user_id = %user.id, "Rejected login with wrong password");
        return Err(AppError::Core(CoreError::InvalidCredentials));
    }

    let access_token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse {
        access_token,
        token_type: "Bearer",
        expires_in: state.config.jwt.expires_in_secs(),
        user: UserResponse::from(&user),
    }))
}

/// DELETE /api/v1/auth/me
///
/// Removes the caller's account together with everything they authored.
pub async fn withdraw(State(state): State<AppState>, auth: AuthUser) -> AppResult<StatusCode> {
    let deleted = state.store.delete_user(auth.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }));
    }

    tracing::info!(user_id = %auth.user_id, username = %auth.username, "User withdrew");
    Ok(StatusCode::NO_CONTENT)
}
