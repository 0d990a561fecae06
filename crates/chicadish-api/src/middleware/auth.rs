//! Bearer-token authentication middleware.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use chicadish_auth::filter;

use crate::state::AppState;

/// Resolves the caller's [`Principal`](chicadish_auth::Principal) and attaches
/// it to the request extensions.
///
/// Never rejects: an absent or invalid token leaves the request anonymous.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let principal = {
        let header = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        filter::authenticate(header, &state.jwt_decoder)
    };

    request.extensions_mut().insert(principal);
    next.run(request).await
}
