use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{has_role, AuthUser, Role};
use crate::error::ApiError;
use crate::state::AppState;

/// Admin gate. Must run after [`super::require_token`].
///
/// Looks up the caller's user document and only lets the request through when
/// its `role` is `"admin"`. A caller without a user document is treated as
/// a non-admin.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("JWT authentication required before admin check"))?;

    if !has_role(state.store(), &auth_user.email, Role::Admin).await? {
        tracing::warn!("Admin access denied for {}", auth_user.email);
        return Err(ApiError::forbidden("Forbidden access"));
    }

    Ok(next.run(request).await)
}
