//! Purchase orders and the perks that discount them. Orders are returned to the buyer and
//! never persisted; the event's `soldTickets` is the durable trace of a purchase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{EventId, OrderId, TicketId};

/// A discount unlocked by a credential. Only `id` and `discountPercent` are required
/// when a buyer echoes a perk back with a purchase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Perk {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub discount_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_benefit: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub success: bool,
    pub order_id: OrderId,
    pub event_id: EventId,
    pub buyer_address: String,
    pub ticket_count: u32,
    pub ticket_ids: Vec<TicketId>,
    /// Always `None`: tickets are not minted on-chain by this service.
    pub transaction_hash: Option<String>,
    pub unit_price: f64,
    #[serde(with = "crate::utils::price")]
    pub total_price: f64,
    pub purchased_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_perk: Option<Perk>,
    pub remaining_tickets: u32,
}
