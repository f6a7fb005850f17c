use async_trait::async_trait;
use axum::extract::{FromRequestParts, State};
use axum::http::{header, request::Parts};

use crate::api::errors::ApiError;
use crate::core::{security, state::AppState};
use crate::db::models::User;
use crate::repositories;

const UNAUTHENTICATED: &str = "Unauthenticated.";

/// Extracts the bearer-token holder. The token must verify, its `jti` must
/// still be registered (logout deletes the registration), and the user row
/// must exist. Every failure mode answers with the same 401 body.
pub(crate) struct CurrentUser(pub(crate) User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let State(app_state) = State::<AppState>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to access application state"))?;

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthorized(UNAUTHENTICATED))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthorized(UNAUTHENTICATED))?;

        let claims = security::verify_token(token, app_state.settings())
            .map_err(|_| ApiError::Unauthorized(UNAUTHENTICATED))?;

        let registered = repositories::tokens::find_by_jti(app_state.db(), &claims.jti)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to check access token"))?;

        match registered {
            Some(row) if row.user_id == claims.sub => {}
            _ => return Err(ApiError::Unauthorized(UNAUTHENTICATED)),
        }

        let user = repositories::users::find_by_id(app_state.db(), claims.sub)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to load user"))?;

        let Some(user) = user else {
            return Err(ApiError::Unauthorized(UNAUTHENTICATED));
        };

        Ok(CurrentUser(user))
    }
}
