use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};

use super::{api_error, store_error, ApiError};
use crate::models::{CredentialType, Event, EventMetadata, EventPatch, NewEvent};
use crate::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub name: Option<String>,
    pub total_tickets: Option<i64>,
    pub price_per_ticket: Option<f64>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub image: Option<String>,
}

#[derive(Serialize)]
pub struct ListEventsResponse {
    pub success: bool,
    pub events: Vec<Event>,
    pub count: usize,
}

impl CreateEventRequest {
    /// Check required fields and ranges, producing the issuer-supplied part of the event.
    fn into_new_event(self, organizer: &str, contract_address: &str) -> Result<NewEvent, String> {
        let (Some(name), Some(total_tickets), Some(price_per_ticket)) =
            (self.name, self.total_tickets, self.price_per_ticket)
        else {
            return Err("Missing required fields".to_string());
        };

        let name = name.trim().to_string();
        if name.is_empty() {
            return Err("Missing required fields".to_string());
        }
        let total_tickets = u32::try_from(total_tickets)
            .ok()
            .filter(|t| *t >= 1)
            .ok_or_else(|| "totalTickets must be a positive integer".to_string())?;
        if !price_per_ticket.is_finite() || price_per_ticket < 0.0 {
            return Err("pricePerTicket must be a non-negative number".to_string());
        }

        let mut metadata = EventMetadata::default();
        if let Some(location) = self.location.filter(|l| !l.trim().is_empty()) {
            metadata.location = location;
        }
        if let Some(image) = self.image.filter(|i| !i.trim().is_empty()) {
            metadata.image = image;
        }

        Ok(NewEvent {
            name,
            total_tickets,
            price_per_ticket,
            description: self.description.unwrap_or_default(),
            organizer: organizer.to_string(),
            required_credential: CredentialType::HumanVerified,
            contract_address: contract_address.to_string(),
            metadata,
        })
    }
}

pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let Json(payload) = payload.map_err(|e| api_error(StatusCode::BAD_REQUEST, e.body_text()))?;

    let new_event = payload
        .into_new_event(&state.config.organizer_address, &state.config.contract_address)
        .map_err(|msg| api_error(StatusCode::BAD_REQUEST, msg))?;

    let event = state
        .store
        .create_event(new_event)
        .await
        .map_err(|e| store_error(e, "Failed to save event"))?;

    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<ListEventsResponse>, ApiError> {
    let events = state
        .store
        .load_events()
        .await
        .map_err(|e| store_error(e, "Failed to load events"))?;

    let count = events.len();
    Ok(Json(ListEventsResponse {
        success: true,
        events,
        count,
    }))
}

pub async fn get_event(
    Path(event_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Event>, ApiError> {
    state
        .store
        .get_event(&event_id)
        .await
        .map_err(|e| store_error(e, "Failed to fetch event"))?
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Event not found"))
}

pub async fn update_event(
    Path(event_id): Path<String>,
    State(state): State<AppState>,
    payload: Result<Json<EventPatch>, JsonRejection>,
) -> Result<Json<Event>, ApiError> {
    let Json(patch) = payload.map_err(|e| api_error(StatusCode::BAD_REQUEST, e.body_text()))?;

    state
        .store
        .update_event(&event_id, &patch)
        .await
        .map_err(|e| store_error(e, "Failed to update event"))?
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Event not found"))
}
