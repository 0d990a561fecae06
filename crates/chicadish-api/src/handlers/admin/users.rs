//! Admin user listing handlers.

use axum::Json;
use axum::extract::{Path, State};

use crate::dto::response::UserDto;
use crate::error::ApiResult;
use crate::extractors::parse_user_id;
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserDto>>> {
    let users = state.admin_user_service.list_users().await?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

/// GET /api/admin/clients
pub async fn list_clients(State(state): State<AppState>) -> ApiResult<Json<Vec<UserDto>>> {
    let users = state.admin_user_service.list_clients().await?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

/// GET /api/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<UserDto>> {
    let id = parse_user_id(&id)?;
    let user = state.admin_user_service.get_user(id).await?;
    Ok(Json(user.into()))
}
