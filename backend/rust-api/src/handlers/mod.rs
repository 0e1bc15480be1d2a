pub mod credentials;
pub mod events;
pub mod fraud;
pub mod tickets;

use axum::{http::StatusCode, response::Json};

use crate::services::StoreError;

pub use credentials::{get_perks, PerksRequest, PerksResponse};
pub use events::{
    create_event,
    get_event,
    list_events,
    update_event,
    CreateEventRequest,
    ListEventsResponse,
};
pub use fraud::{analyze_fraud, AnalyzeFraudRequest};
pub use tickets::purchase_tickets;

/// Error half of every handler result: a status plus `{"error": message}`.
pub type ApiError = (StatusCode, Json<serde_json::Value>);

pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(serde_json::json!({"error": message.into()})))
}

/// Map a store failure to a response. Storage details are logged, not returned.
pub fn store_error(err: StoreError, message: &str) -> ApiError {
    match err {
        StoreError::Invalid(reason) => api_error(StatusCode::BAD_REQUEST, reason),
        StoreError::DuplicateId(id) => {
            api_error(StatusCode::CONFLICT, format!("Event {} already exists", id))
        }
        other => {
            tracing::error!("{}: {:?}", message, other);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, message)
        }
    }
}
