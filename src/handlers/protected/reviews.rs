use axum::{extract::State, Extension, Json};

use crate::database::{Collection, Document, InsertAck};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// POST /reviews - store the body as a new review
pub async fn reviews_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(review): Json<Document>,
) -> Result<Json<InsertAck>, ApiError> {
    let ack = state.store().insert_one(Collection::Reviews, review).await?;
    tracing::debug!("Review {} posted by {}", ack.inserted_id, user.email);
    Ok(Json(ack))
}
