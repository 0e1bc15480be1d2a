use axum::{
    extract::{rejection::JsonRejection, Json},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;

use super::{api_error, ApiError};
use crate::models::FraudAnalysis;
use crate::services::fraud::{self, PurchaseRecord};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeFraudRequest {
    #[serde(default)]
    pub wallet_address: String,
    #[serde(default)]
    pub purchase_history: Vec<PurchaseRecord>,
}

pub async fn analyze_fraud(
    payload: Result<Json<AnalyzeFraudRequest>, JsonRejection>,
) -> Result<Json<FraudAnalysis>, ApiError> {
    let Json(payload) = payload.map_err(|e| api_error(StatusCode::BAD_REQUEST, e.body_text()))?;

    let activity = fraud::activity_from_history(&payload.wallet_address, &payload.purchase_history, Utc::now());
    let analysis = fraud::analyze_fraud(&activity);

    if fraud::is_fraudulent(&analysis) {
        tracing::warn!(
            "Wallet {} flagged for blocking (score {}, flags {:?})",
            analysis.wallet_address,
            analysis.suspicious_score,
            analysis.flags
        );
    }

    Ok(Json(analysis))
}
