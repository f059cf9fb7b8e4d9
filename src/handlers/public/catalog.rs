use axum::{extract::State, Json};

use crate::database::{Collection, Document, Filter};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /tools - every part in the catalog
pub async fn tools_get(State(state): State<AppState>) -> Result<Json<Vec<Document>>, ApiError> {
    let parts = state.store().find(Collection::Parts, Filter::all()).await?;
    Ok(Json(parts))
}

/// GET /reviews - every review
pub async fn reviews_get(State(state): State<AppState>) -> Result<Json<Vec<Document>>, ApiError> {
    let reviews = state.store().find(Collection::Reviews, Filter::all()).await?;
    Ok(Json(reviews))
}
