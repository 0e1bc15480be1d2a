use axum::{
    extract::{rejection::JsonRejection, Json},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{api_error, ApiError};
use crate::models::Perk;
use crate::services::perks::perks_for_credential;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerksRequest {
    pub credential_id: Option<String>,
    pub wallet_address: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerksResponse {
    pub is_valid: bool,
    pub credential_id: String,
    pub wallet_address: Option<String>,
    pub verified_at: DateTime<Utc>,
    pub perks: Vec<Perk>,
}

// Credential proof checks happen in the identity provider; any presented id is accepted.
pub async fn get_perks(
    payload: Result<Json<PerksRequest>, JsonRejection>,
) -> Result<Json<PerksResponse>, ApiError> {
    let Json(payload) = payload.map_err(|e| api_error(StatusCode::BAD_REQUEST, e.body_text()))?;

    let credential_id = payload
        .credential_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "credentialId required"))?;

    let perks = perks_for_credential(&credential_id);
    tracing::debug!("Resolved {} perk(s) for credential {}", perks.len(), credential_id);

    Ok(Json(PerksResponse {
        is_valid: true,
        credential_id,
        wallet_address: payload.wallet_address.filter(|w| !w.is_empty()),
        verified_at: Utc::now(),
        perks,
    }))
}
