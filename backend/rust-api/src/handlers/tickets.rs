use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};

use super::{api_error, store_error, ApiError};
use crate::models::Order;
use crate::services::{self, PurchaseError, PurchaseRequest};
use crate::AppState;

pub async fn purchase_tickets(
    State(state): State<AppState>,
    payload: Result<Json<PurchaseRequest>, JsonRejection>,
) -> Result<Json<Order>, ApiError> {
    let Json(request) = payload.map_err(|e| api_error(StatusCode::BAD_REQUEST, e.body_text()))?;

    let order = services::purchase_tickets(&state.store, request)
        .await
        .map_err(|e| match e {
            PurchaseError::EventNotFound(_) => api_error(StatusCode::NOT_FOUND, e.to_string()),
            PurchaseError::SoldOut { .. } => api_error(StatusCode::CONFLICT, e.to_string()),
            PurchaseError::Store(err) => store_error(err, "Failed to record purchase"),
            PurchaseError::InvalidQuantity
            | PurchaseError::InvalidBuyer
            | PurchaseError::MissingEvent
            | PurchaseError::InvalidDiscount(_) => api_error(StatusCode::BAD_REQUEST, e.to_string()),
        })?;

    Ok(Json(order))
}
