use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Observed behaviour of one wallet, the input to fraud scoring.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletActivity {
    pub address: String,
    #[serde(default)]
    pub transaction_count: u32,
    /// Purchases per hour.
    #[serde(default)]
    pub purchase_frequency: f64,
    #[serde(default)]
    pub account_age_days: f64,
    #[serde(default)]
    pub failed_transactions: u32,
    #[serde(default)]
    pub unique_ips: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecommendedAction {
    Allow,
    Review,
    Block,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudAnalysis {
    pub wallet_address: String,
    pub suspicious_score: u32,
    pub flags: Vec<String>,
    pub last_analyzed_at: DateTime<Utc>,
    pub recommended_action: RecommendedAction,
}
