//! Auth handlers: login, registration, current user.

use axum::Json;
use axum::extract::State;

use chicadish_entity::user::Role;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::AuthResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let session = state.auth_service.login(&req.email, &req.password).await?;
    Ok(Json(session.into()))
}

/// POST /api/auth/register/client
pub async fn register_client(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<Json<AuthResponse>> {
    register(state, req, Role::Client).await
}

/// POST /api/auth/register/admin
///
/// Open to anonymous callers unless `auth.allow_admin_registration` is off.
pub async fn register_admin(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<Json<AuthResponse>> {
    register(state, req, Role::Admin).await
}

async fn register(
    state: AppState,
    req: RegisterRequest,
    role: Role,
) -> ApiResult<Json<AuthResponse>> {
    let session = state.auth_service.register(req.into(), role).await?;
    Ok(Json(session.into()))
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<AuthResponse>> {
    let user = state.user_service.current_user(auth.identity()).await?;
    Ok(Json(AuthResponse::identity_only(&user)))
}
