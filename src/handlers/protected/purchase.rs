use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::database::{Collection, Document, Filter, UpdateAck};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /purchase/:id - a single part, or `null`
pub async fn purchase_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<Document>>, ApiError> {
    let part = state.store().find_one(Collection::Parts, Filter::by_id(&id)?).await?;
    Ok(Json(part))
}

/// PATCH /purchase/:id - set the part's `available` quantity from the body
///
/// A body without `available` sets it to `null`.
pub async fn purchase_patch(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Document>,
) -> Result<Json<UpdateAck>, ApiError> {
    let filter = Filter::by_id(&id)?;

    let mut set = Document::new();
    set.insert(
        "available".to_string(),
        body.get("available").cloned().unwrap_or(Value::Null),
    );

    let ack = state.store().update_one(Collection::Parts, filter, set, false).await?;
    Ok(Json(ack))
}
