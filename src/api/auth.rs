use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};

use crate::api::errors::ApiError;
use crate::api::extract::Json;
use crate::api::guards::CurrentUser;
use crate::api::validation;
use crate::core::security;
use crate::core::state::AppState;
use crate::core::time::{primitive_now_utc, to_primitive_utc};
use crate::db::types::UserRole;
use crate::repositories;
use crate::schemas::auth::{LogoutResponse, TokenResponse};
use crate::schemas::user::{UserCreate, UserLogin, UserResponse};

const BAD_CREDENTIALS: &str = "Incorrect email or password.";

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout/:user_id", get(logout))
}

async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<UserCreate>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    validation::validate_name(&payload.name)?;
    validation::validate_email(&payload.email)?;
    validation::validate_password_len(&payload.password)?;
    validation::validate_password_confirmation(&payload.password, &payload.password_confirmation)?;

    let existing = repositories::users::exists_by_email(state.db(), &payload.email)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to check existing user"))?;

    if existing.is_some() {
        return Err(ApiError::Conflict("Email is already taken.".to_string()));
    }

    let hashed_password = security::hash_password(&payload.password)
        .map_err(|e| ApiError::internal(e, "Failed to hash password"))?;

    // The only place a role is ever assigned. The suffix match is
    // case-sensitive, the same comparison the signup form documents.
    let role = if payload.email.ends_with(&state.settings().admin().admin_email_suffix) {
        UserRole::Administrator
    } else {
        UserRole::Candidate
    };

    let now = primitive_now_utc();
    let user = repositories::users::create(
        state.db(),
        repositories::users::CreateUser {
            name: &payload.name,
            email: &payload.email,
            hashed_password,
            role,
            created_at: now,
            updated_at: now,
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create user"))?;

    let token = issue_access_token(&state, user.id).await?;

    let response = TokenResponse { token, user: UserResponse::from_db(user) };

    Ok((StatusCode::CREATED, Json(response)))
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<UserLogin>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = repositories::users::find_by_email(state.db(), &payload.email)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load user"))?
        .ok_or(ApiError::Unauthorized(BAD_CREDENTIALS))?;

    let verified = security::verify_password(&payload.password, &user.hashed_password)
        .map_err(|_| ApiError::Unauthorized(BAD_CREDENTIALS))?;

    if !verified {
        return Err(ApiError::Unauthorized(BAD_CREDENTIALS));
    }

    let token = issue_access_token(&state, user.id).await?;

    Ok(Json(TokenResponse { token, user: UserResponse::from_db(user) }))
}

async fn logout(
    CurrentUser(user): CurrentUser,
    Path(user_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LogoutResponse>, ApiError> {
    let target_id = validation::parse_id(&user_id)?;

    if user.id != target_id && !user.role.is_administrator() {
        return Err(ApiError::not_found());
    }

    let target = repositories::users::find_by_id(state.db(), target_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load user"))?;

    if target.is_none() {
        return Err(ApiError::not_found());
    }

    repositories::tokens::delete_for_user(state.db(), target_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to revoke access tokens"))?;

    Ok(Json(LogoutResponse { msg: "Logged out.".to_string() }))
}

/// Signs a token and registers its `jti` so the guard will accept it.
async fn issue_access_token(state: &AppState, user_id: i64) -> Result<String, ApiError> {
    let issued = security::create_access_token(user_id, state.settings(), None)
        .map_err(|e| ApiError::internal(e, "Failed to create access token"))?;

    repositories::tokens::insert(
        state.db(),
        repositories::tokens::CreateAccessToken {
            jti: &issued.jti,
            user_id,
            created_at: primitive_now_utc(),
            expires_at: to_primitive_utc(issued.expires_at),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to register access token"))?;

    Ok(issued.token)
}
