// handlers/public/user.rs - PUT /user/:email
//
// Token issuance policy: this is the only endpoint that mints tokens, and it
// mints one on every call. Whether the user document was inserted or already
// existed, the response carries a fresh token for `email` valid for the
// configured expiry (one day by default). Clients call it right after signing
// in with their identity provider to obtain a bearer token for the API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::database::{Collection, Document, Filter, UpdateAck};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UserPutResponse {
    pub result: UpdateAck,
    pub token: String,
}

/// PUT /user/:email - upsert the user keyed by `email` and issue a token
///
/// Only `email` is written. `role` is never taken from the body, so granting
/// admin stays an out-of-band operation on the users collection.
pub async fn user_put(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(_body): Json<Document>,
) -> Result<Json<UserPutResponse>, ApiError> {
    let mut set = Document::new();
    set.insert("email".to_string(), Value::String(email.clone()));

    let result = state
        .store()
        .update_one(Collection::Users, Filter::eq("email", email.as_str()), set, true)
        .await?;

    let token = state.tokens().issue(&email)?;
    tracing::info!("Issued token for {}", email);

    Ok(Json(UserPutResponse { result, token }))
}
