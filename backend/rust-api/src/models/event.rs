//! Event records as stored in the events file (camelCase JSON).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::ids::EventId;
use crate::services::purchase::LEGACY_UNIT_PRICE;

/// Older event files hold `"pricePerTicket": null` where the submitted price was not a
/// number; those events always sold at the flat legacy price.
fn price_or_legacy<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(LEGACY_UNIT_PRICE))
}

/// Credential a buyer must hold to purchase tickets for an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CredentialType {
    #[default]
    HumanVerified,
    FanBadge,
}

impl CredentialType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialType::HumanVerified => "HUMAN_VERIFIED",
            CredentialType::FanBadge => "FAN_BADGE",
        }
    }
}

impl std::fmt::Display for CredentialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display attributes. Keys other than `location` and `image` are kept as-is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventMetadata {
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default = "default_image")]
    pub image: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_location() -> String {
    "Virtual".to_string()
}

fn default_image() -> String {
    "🎪".to_string()
}

impl Default for EventMetadata {
    fn default() -> Self {
        Self {
            location: default_location(),
            image: default_image(),
            extra: Map::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub total_tickets: u32,
    #[serde(default)]
    pub sold_tickets: u32,
    #[serde(deserialize_with = "price_or_legacy")]
    pub price_per_ticket: f64,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub organizer: String,
    #[serde(default)]
    pub required_credential: CredentialType,
    #[serde(default)]
    pub contract_address: String,
    #[serde(default)]
    pub metadata: EventMetadata,
}

impl Event {
    pub fn remaining_tickets(&self) -> u32 {
        self.total_tickets.saturating_sub(self.sold_tickets)
    }

    /// Checks the record-level invariants: non-empty name, capacity of at least one,
    /// a finite non-negative price and `sold_tickets <= total_tickets`.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Event name must not be empty".to_string());
        }
        if self.total_tickets == 0 {
            return Err("totalTickets must be at least 1".to_string());
        }
        if !self.price_per_ticket.is_finite() || self.price_per_ticket < 0.0 {
            return Err("pricePerTicket must be a non-negative number".to_string());
        }
        if self.sold_tickets > self.total_tickets {
            return Err(format!(
                "soldTickets ({}) cannot exceed totalTickets ({})",
                self.sold_tickets, self.total_tickets
            ));
        }
        Ok(())
    }
}

/// Fields supplied by the issuer; the store assigns `id`, `createdAt` and `soldTickets`.
#[derive(Clone, Debug, PartialEq)]
pub struct NewEvent {
    pub name: String,
    pub total_tickets: u32,
    pub price_per_ticket: f64,
    pub description: String,
    pub organizer: String,
    pub required_credential: CredentialType,
    pub contract_address: String,
    pub metadata: EventMetadata,
}

impl NewEvent {
    pub fn into_event(self, id: EventId, created_at: DateTime<Utc>) -> Event {
        Event {
            id,
            name: self.name,
            total_tickets: self.total_tickets,
            sold_tickets: 0,
            price_per_ticket: self.price_per_ticket,
            description: self.description,
            created_at,
            organizer: self.organizer,
            required_credential: self.required_credential,
            contract_address: self.contract_address,
            metadata: self.metadata,
        }
    }
}

/// Partial update. Present fields replace the stored ones; `id` and `createdAt` are immutable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tickets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_tickets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_ticket: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_credential: Option<CredentialType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EventMetadata>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        *self == EventPatch::default()
    }

    /// Shallow merge into `event`.
    pub fn apply_to(&self, event: &mut Event) {
        if let Some(name) = &self.name {
            event.name = name.clone();
        }
        if let Some(total) = self.total_tickets {
            event.total_tickets = total;
        }
        if let Some(sold) = self.sold_tickets {
            event.sold_tickets = sold;
        }
        if let Some(price) = self.price_per_ticket {
            event.price_per_ticket = price;
        }
        if let Some(description) = &self.description {
            event.description = description.clone();
        }
        if let Some(organizer) = &self.organizer {
            event.organizer = organizer.clone();
        }
        if let Some(credential) = self.required_credential {
            event.required_credential = credential;
        }
        if let Some(address) = &self.contract_address {
            event.contract_address = address.clone();
        }
        if let Some(metadata) = &self.metadata {
            event.metadata = metadata.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Event {
        NewEvent {
            name: "Web3 Summit".to_string(),
            total_tickets: 500,
            price_per_ticket: 0.5,
            description: String::new(),
            organizer: "0xabc".to_string(),
            required_credential: CredentialType::HumanVerified,
            contract_address: String::new(),
            metadata: EventMetadata::default(),
        }
        .into_event("event_1".to_string(), Utc::now())
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["totalTickets"], 500);
        assert_eq!(json["soldTickets"], 0);
        assert_eq!(json["requiredCredential"], "HUMAN_VERIFIED");
        assert_eq!(json["metadata"]["location"], "Virtual");
    }

    #[test]
    fn metadata_keeps_unknown_keys() {
        let metadata: EventMetadata =
            serde_json::from_value(serde_json::json!({"location": "Berlin", "venue": "Hall 3"})).unwrap();
        assert_eq!(metadata.location, "Berlin");
        assert_eq!(metadata.image, "🎪");
        assert_eq!(metadata.extra.get("venue"), Some(&Value::from("Hall 3")));
    }

    #[test]
    fn null_price_reads_as_legacy_price() {
        let mut json = serde_json::to_value(sample()).unwrap();
        json["pricePerTicket"] = Value::Null;
        let event: Event = serde_json::from_value(json).unwrap();
        assert_eq!(event.price_per_ticket, LEGACY_UNIT_PRICE);
        assert!(event.validate().is_ok());
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let mut event = sample();
        let before = event.clone();
        let patch = EventPatch {
            sold_tickets: Some(10),
            ..Default::default()
        };
        patch.apply_to(&mut event);

        assert_eq!(event.sold_tickets, 10);
        assert_eq!(event.name, before.name);
        assert_eq!(event.total_tickets, before.total_tickets);
        assert_eq!(event.created_at, before.created_at);
    }

    #[test]
    fn validate_rejects_oversold_event() {
        let mut event = sample();
        event.sold_tickets = 501;
        assert!(event.validate().is_err());
        event.sold_tickets = 500;
        assert!(event.validate().is_ok());
    }
}
