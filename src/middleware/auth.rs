use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::authenticate;
use crate::error::ApiError;
use crate::state::AppState;

pub use crate::auth::AuthUser;

/// JWT authentication middleware.
///
/// Missing `Authorization` header → 401. Any other failure (wrong scheme, bad
/// signature, expired) → 403. On success the caller's [`AuthUser`] is
/// inserted into request extensions for downstream handlers.
pub async fn require_token(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = authenticate(request.headers(), state.tokens())?;

    tracing::debug!("Authenticated request for {}", auth_user.email);
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}
