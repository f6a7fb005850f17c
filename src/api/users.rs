use axum::{routing::get, Json, Router};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentUser;
use crate::core::state::AppState;
use crate::repositories;
use crate::schemas::user::{UserList, UserResponse};

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", get(list_users))
}

async fn list_users(
    CurrentUser(_user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<Json<UserList>, ApiError> {
    let users = repositories::users::list_all(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list users"))?;

    Ok(Json(UserList { users: users.into_iter().map(UserResponse::from_db).collect() }))
}
