//! Access-rule guard run before routing.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use chicadish_auth::identity::Principal;

use crate::error::ApiResult;
use crate::state::AppState;

/// Rejects requests whose principal does not satisfy the rule for their path.
pub async fn authorize(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let principal = request
        .extensions()
        .get::<Principal>()
        .cloned()
        .unwrap_or_default();
    let path = request.uri().path();

    if let Err(e) = state.rbac_enforcer.check(path, &principal) {
        let user_id = principal.identity().map(|id| id.user_id.to_string());
        warn!(
            path = %path,
            user_id = user_id.as_deref(),
            reason = %e.kind,
            "Access denied"
        );
        return Err(e.into());
    }

    Ok(next.run(request).await)
}
