use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::database::{Collection, DeleteAck, Document, Filter, InsertAck};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// Field on an order naming the customer who placed it.
pub const OWNER_FIELD: &str = "userEmail";

#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    pub email: Option<String>,
}

/// POST /orders - store the body as a new order
pub async fn orders_post(
    State(state): State<AppState>,
    Json(order): Json<Document>,
) -> Result<Json<InsertAck>, ApiError> {
    let ack = state.store().insert_one(Collection::Orders, order).await?;
    Ok(Json(ack))
}

/// GET /orders?email= - the caller's own orders
///
/// `email` must equal the token identity; otherwise the request is refused
/// before the store is touched.
pub async fn orders_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<OrdersQuery>,
) -> Result<Json<Vec<Document>>, ApiError> {
    match query.email {
        Some(email) if email == user.email => {
            let orders = state
                .store()
                .find(Collection::Orders, Filter::eq(OWNER_FIELD, email))
                .await?;
            Ok(Json(orders))
        }
        requested => {
            tracing::warn!(
                "Order listing for {:?} refused for caller {}",
                requested,
                user.email
            );
            Err(ApiError::forbidden("Forbidden access"))
        }
    }
}

/// DELETE /order/:id - cancel one of the caller's orders
///
/// The delete is scoped to orders owned by the caller. Cancelling somebody
/// else's order, or one that does not exist, reports `deletedCount: 0`.
pub async fn order_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<DeleteAck>, ApiError> {
    let filter = Filter::by_id(&id)?.and_eq(OWNER_FIELD, user.email.as_str());
    let ack = state.store().delete_one(Collection::Orders, filter).await?;

    if ack.deleted_count == 0 {
        tracing::debug!("No order {} owned by {} to delete", id, user.email);
    }
    Ok(Json(ack))
}
