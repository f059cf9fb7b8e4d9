use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::auth::{has_role, Role};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AdminStatus {
    pub admin: bool,
}

/// GET /admin/:email - whether `email` belongs to an admin
///
/// Unknown users report `admin: false`.
pub async fn admin_get(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<AdminStatus>, ApiError> {
    let admin = has_role(state.store(), &email, Role::Admin).await?;
    Ok(Json(AdminStatus { admin }))
}
