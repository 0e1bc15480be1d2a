//! Serde helpers for monetary totals: written as a decimal string with four fractional
//! digits (e.g. "1.5000"), read back from either a string or a JSON number.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const PRICE_DECIMALS: i32 = 4;

/// Round to [`PRICE_DECIMALS`] places.
pub fn round_price(value: f64) -> f64 {
    let factor = 10f64.powi(PRICE_DECIMALS);
    (value * factor).round() / factor
}

/// Format with exactly [`PRICE_DECIMALS`] fractional digits.
pub fn format_price(value: f64) -> String {
    format!("{:.*}", PRICE_DECIMALS as usize, value)
}

/// Serialize f64 as "0.0000". Used with #[serde(with = "crate::utils::price")].
pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    format_price(*value).serialize(serializer)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Text(String),
    Number(f64),
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawPrice::deserialize(deserializer)? {
        RawPrice::Number(n) => Ok(n),
        RawPrice::Text(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}
