use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::database::{Collection, Document, Filter, UpdateAck};
use crate::error::ApiError;
use crate::state::AppState;

/// Display attributes copied from a profile update body.
pub const PROFILE_FIELDS: [&str; 5] = ["name", "country", "city", "img", "location"];

/// GET /profile/:email - profile for `email`, or `null`
pub async fn profile_get(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Option<Document>>, ApiError> {
    tracing::debug!("Loading profile for {}", email);
    let profile = state
        .store()
        .find_one(Collection::Profiles, Filter::eq("email", email))
        .await?;
    Ok(Json(profile))
}

/// PUT /profile/:email - upsert the profile keyed by `email`
///
/// The display attributes are written as a whole: an attribute missing from
/// the body is stored as `null`. `email` always comes from the path so the key
/// cannot drift away from the filter.
pub async fn profile_put(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(body): Json<Document>,
) -> Result<Json<UpdateAck>, ApiError> {
    let set = profile_update(&email, &body);
    let ack = state
        .store()
        .update_one(Collection::Profiles, Filter::eq("email", email.as_str()), set, true)
        .await?;
    Ok(Json(ack))
}

fn profile_update(email: &str, body: &Document) -> Document {
    let mut set: Document = PROFILE_FIELDS
        .iter()
        .map(|field| (field.to_string(), body.get(*field).cloned().unwrap_or(Value::Null)))
        .collect();
    set.insert("email".to_string(), Value::String(email.to_string()));
    set
}
