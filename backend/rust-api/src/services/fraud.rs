//! Threshold-based fraud scoring for buyer wallets.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::models::{FraudAnalysis, RecommendedAction, WalletActivity};

/// Account age assumed when a wallet has no purchase history.
const UNKNOWN_ACCOUNT_AGE_DAYS: f64 = 100.0;
const VELOCITY_WINDOW_MINUTES: i64 = 60;

/// One past purchase as reported by the client.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    /// Unix milliseconds.
    pub timestamp: i64,
    #[serde(default)]
    pub location: Option<String>,
}

pub fn analyze_fraud(activity: &WalletActivity) -> FraudAnalysis {
    let mut flags = Vec::new();
    let mut score: u32 = 0;

    let mut flag = |hit: bool, name: &str, weight: u32| {
        if hit {
            flags.push(name.to_string());
            score += weight;
        }
    };

    flag(activity.purchase_frequency > 5.0, "RAPID_PURCHASES", 30);
    flag(activity.account_age_days < 7.0, "NEW_ACCOUNT", 25);
    flag(activity.transaction_count > 100, "HIGH_TRANSACTION_COUNT", 15);
    flag(activity.failed_transactions > 10, "MULTIPLE_FAILURES", 20);
    flag(activity.locations.len() > 5, "SUSPICIOUS_LOCATIONS", 15);
    flag(activity.unique_ips.len() > 10, "MULTIPLE_IPS", 10);

    let score = score.min(100);
    FraudAnalysis {
        wallet_address: activity.address.clone(),
        suspicious_score: score,
        flags,
        last_analyzed_at: Utc::now(),
        recommended_action: recommended_action(score),
    }
}

pub fn recommended_action(score: u32) -> RecommendedAction {
    if score < 30 {
        RecommendedAction::Allow
    } else if score < 70 {
        RecommendedAction::Review
    } else {
        RecommendedAction::Block
    }
}

pub fn is_fraudulent(analysis: &FraudAnalysis) -> bool {
    analysis.recommended_action == RecommendedAction::Block
}

/// Purchases inside the trailing window, per minute of window.
pub fn purchase_velocity(timestamps: &[DateTime<Utc>], now: DateTime<Utc>, window_minutes: i64) -> f64 {
    if window_minutes <= 0 {
        return 0.0;
    }
    let window = Duration::minutes(window_minutes);
    let recent = timestamps.iter().filter(|ts| now - **ts <= window).count();
    recent as f64 / window_minutes as f64
}

/// Wallets whose transaction count or purchase frequency exceeds twice the population mean.
pub fn detect_anomalies(activities: &[WalletActivity]) -> BTreeMap<String, Vec<String>> {
    let mut anomalies = BTreeMap::new();
    if activities.is_empty() {
        return anomalies;
    }

    let n = activities.len() as f64;
    let avg_transactions = activities.iter().map(|a| f64::from(a.transaction_count)).sum::<f64>() / n;
    let avg_frequency = activities.iter().map(|a| a.purchase_frequency).sum::<f64>() / n;

    for activity in activities {
        let mut flags = Vec::new();
        if f64::from(activity.transaction_count) > avg_transactions * 2.0 {
            flags.push("TRANSACTION_OUTLIER".to_string());
        }
        if activity.purchase_frequency > avg_frequency * 2.0 {
            flags.push("FREQUENCY_OUTLIER".to_string());
        }
        if !flags.is_empty() {
            anomalies.insert(activity.address.clone(), flags);
        }
    }
    anomalies
}

/// Derive wallet activity from a raw purchase history.
pub fn activity_from_history(address: &str, history: &[PurchaseRecord], now: DateTime<Utc>) -> WalletActivity {
    let timestamps: Vec<DateTime<Utc>> = history
        .iter()
        .filter_map(|p| DateTime::<Utc>::from_timestamp_millis(p.timestamp))
        .collect();

    let account_age_days = timestamps
        .iter()
        .min()
        .map(|first| (now - *first).num_milliseconds() as f64 / 86_400_000.0)
        .unwrap_or(UNKNOWN_ACCOUNT_AGE_DAYS);

    let locations: HashSet<&str> = history.iter().filter_map(|p| p.location.as_deref()).collect();

    WalletActivity {
        address: address.to_string(),
        transaction_count: history.len() as u32,
        // per-minute rate over the last hour, scaled to per hour
        purchase_frequency: purchase_velocity(&timestamps, now, VELOCITY_WINDOW_MINUTES)
            * VELOCITY_WINDOW_MINUTES as f64,
        account_age_days,
        failed_transactions: 0,
        unique_ips: Vec::new(),
        locations: locations.into_iter().map(str::to_string).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet(address: &str) -> WalletActivity {
        WalletActivity {
            address: address.to_string(),
            account_age_days: 365.0,
            ..Default::default()
        }
    }

    #[test]
    fn quiet_wallet_is_allowed() {
        let analysis = analyze_fraud(&wallet("0xquiet"));
        assert_eq!(analysis.suspicious_score, 0);
        assert!(analysis.flags.is_empty());
        assert_eq!(analysis.recommended_action, RecommendedAction::Allow);
    }

    #[test]
    fn new_rapid_wallet_is_reviewed() {
        let mut activity = wallet("0xbot");
        activity.purchase_frequency = 12.0;
        activity.account_age_days = 1.0;
        let analysis = analyze_fraud(&activity);
        assert_eq!(analysis.suspicious_score, 55);
        assert_eq!(analysis.flags, vec!["RAPID_PURCHASES", "NEW_ACCOUNT"]);
        assert_eq!(analysis.recommended_action, RecommendedAction::Review);
        assert!(!is_fraudulent(&analysis));
    }

    #[test]
    fn every_flag_caps_at_hundred_and_blocks() {
        let activity = WalletActivity {
            address: "0xfarm".to_string(),
            transaction_count: 500,
            purchase_frequency: 50.0,
            account_age_days: 0.5,
            failed_transactions: 40,
            unique_ips: (0..20).map(|i| format!("10.0.0.{i}")).collect(),
            locations: (0..8).map(|i| format!("city-{i}")).collect(),
        };
        let analysis = analyze_fraud(&activity);
        assert_eq!(analysis.suspicious_score, 100);
        assert_eq!(analysis.flags.len(), 6);
        assert!(is_fraudulent(&analysis));
    }

    #[test]
    fn action_thresholds() {
        assert_eq!(recommended_action(29), RecommendedAction::Allow);
        assert_eq!(recommended_action(30), RecommendedAction::Review);
        assert_eq!(recommended_action(69), RecommendedAction::Review);
        assert_eq!(recommended_action(70), RecommendedAction::Block);
    }

    #[test]
    fn velocity_counts_only_recent_purchases() {
        let now = Utc::now();
        let stamps = vec![
            now - Duration::minutes(5),
            now - Duration::minutes(30),
            now - Duration::minutes(90),
        ];
        assert_eq!(purchase_velocity(&stamps, now, 60), 2.0 / 60.0);
        assert_eq!(purchase_velocity(&stamps, now, 0), 0.0);
    }

    #[test]
    fn anomalies_flag_outliers() {
        let mut heavy = wallet("0xheavy");
        heavy.transaction_count = 100;
        heavy.purchase_frequency = 20.0;
        let mut light_a = wallet("0xa");
        light_a.transaction_count = 2;
        light_a.purchase_frequency = 1.0;
        let mut light_b = wallet("0xb");
        light_b.transaction_count = 3;
        light_b.purchase_frequency = 1.0;

        let anomalies = detect_anomalies(&[heavy, light_a, light_b]);
        assert_eq!(anomalies.len(), 1);
        assert_eq!(
            anomalies.get("0xheavy"),
            Some(&vec!["TRANSACTION_OUTLIER".to_string(), "FREQUENCY_OUTLIER".to_string()])
        );
        assert!(detect_anomalies(&[]).is_empty());
    }

    #[test]
    fn history_without_entries_is_an_old_account() {
        let activity = activity_from_history("0xnew", &[], Utc::now());
        assert_eq!(activity.transaction_count, 0);
        assert_eq!(activity.account_age_days, 100.0);
        assert_eq!(analyze_fraud(&activity).recommended_action, RecommendedAction::Allow);
    }

    #[test]
    fn history_derives_frequency_age_and_locations() {
        let now = Utc::now();
        let history: Vec<PurchaseRecord> = (0..8)
            .map(|i| PurchaseRecord {
                timestamp: (now - Duration::minutes(i * 5)).timestamp_millis(),
                location: Some(format!("loc-{}", i % 3)),
            })
            .collect();
        let activity = activity_from_history("0xfast", &history, now);
        assert_eq!(activity.transaction_count, 8);
        assert!((activity.purchase_frequency - 8.0).abs() < 1e-9);
        assert!(activity.account_age_days < 1.0);
        assert_eq!(activity.locations.len(), 3);
    }
}
