//! Ticket purchase accounting.
//!
//! A purchase reserves capacity on the stored event and prices the order with that
//! event's own `pricePerTicket`, minus the buyer's perk discount.

use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Order, Perk};
use crate::services::event_store::{EventStore, ReserveError, StoreError};
use crate::utils::price::round_price;

/// Flat per-ticket price of the first ProofPass release; the seeded summit event uses it.
pub const LEGACY_UNIT_PRICE: f64 = 0.5;

/// Upper bound on tickets in a single order.
pub const MAX_TICKETS_PER_ORDER: u32 = 100;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub event_id: String,
    pub quantity: u32,
    pub buyer_address: String,
    #[serde(default)]
    pub applied_perk: Option<Perk>,
}

#[derive(Debug, Error)]
pub enum PurchaseError {
    #[error("quantity must be between 1 and {}", MAX_TICKETS_PER_ORDER)]
    InvalidQuantity,
    #[error("buyerAddress is required")]
    InvalidBuyer,
    #[error("eventId is required")]
    MissingEvent,
    #[error("discountPercent must be between 0 and 100, got {0}")]
    InvalidDiscount(f64),
    #[error("event {0} not found")]
    EventNotFound(String),
    #[error("only {remaining} tickets left, {requested} requested")]
    SoldOut { requested: u32, remaining: u32 },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ReserveError> for PurchaseError {
    fn from(err: ReserveError) -> Self {
        match err {
            ReserveError::NotFound(id) => PurchaseError::EventNotFound(id),
            ReserveError::SoldOut { requested, remaining } => PurchaseError::SoldOut { requested, remaining },
            ReserveError::Store(e) => PurchaseError::Store(e),
        }
    }
}

/// `quantity * unit_price` less `discount_percent` percent, rounded to four places.
pub fn order_total(quantity: u32, unit_price: f64, discount_percent: f64) -> f64 {
    let raw = f64::from(quantity) * unit_price;
    round_price(raw - raw * (discount_percent / 100.0))
}

fn validate(request: &PurchaseRequest) -> Result<f64, PurchaseError> {
    if request.event_id.trim().is_empty() {
        return Err(PurchaseError::MissingEvent);
    }
    if request.quantity == 0 || request.quantity > MAX_TICKETS_PER_ORDER {
        return Err(PurchaseError::InvalidQuantity);
    }
    if request.buyer_address.trim().is_empty() {
        return Err(PurchaseError::InvalidBuyer);
    }
    let discount = request
        .applied_perk
        .as_ref()
        .map(|perk| perk.discount_percent)
        .unwrap_or(0.0);
    if !discount.is_finite() || !(0.0..=100.0).contains(&discount) {
        return Err(PurchaseError::InvalidDiscount(discount));
    }
    Ok(discount)
}

/// Validate the request, reserve `quantity` tickets and build the order.
/// Nothing is written when validation fails or the event cannot cover the quantity.
pub async fn purchase_tickets(store: &EventStore, request: PurchaseRequest) -> Result<Order, PurchaseError> {
    let discount = validate(&request)?;

    let event = store.reserve_tickets(&request.event_id, request.quantity).await?;
    let total_price = order_total(request.quantity, event.price_per_ticket, discount);

    let order = Order {
        success: true,
        order_id: Uuid::new_v4(),
        event_id: event.id.clone(),
        buyer_address: request.buyer_address,
        ticket_count: request.quantity,
        ticket_ids: (0..request.quantity).map(|_| Uuid::new_v4()).collect(),
        transaction_hash: None,
        unit_price: event.price_per_ticket,
        total_price,
        purchased_at: Utc::now(),
        applied_perk: request.applied_perk,
        remaining_tickets: event.remaining_tickets(),
    };

    tracing::info!(
        order_id = %order.order_id,
        event_id = %order.event_id,
        tickets = order.ticket_count,
        total = order.total_price,
        "Order placed"
    );
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(quantity: u32, discount: Option<f64>) -> PurchaseRequest {
        PurchaseRequest {
            event_id: "event_1".to_string(),
            quantity,
            buyer_address: "0xbuyer".to_string(),
            applied_perk: discount.map(|d| Perk {
                id: "human_basic".to_string(),
                title: String::new(),
                description: String::new(),
                discount_percent: d,
                extra_benefit: None,
            }),
        }
    }

    #[test]
    fn quarter_discount_on_four_tickets() {
        assert_eq!(order_total(4, LEGACY_UNIT_PRICE, 25.0), 1.5);
    }

    #[test]
    fn no_discount_on_three_tickets() {
        assert_eq!(order_total(3, LEGACY_UNIT_PRICE, 0.0), 1.5);
    }

    #[test]
    fn full_discount_is_free() {
        assert_eq!(order_total(7, 1.25, 100.0), 0.0);
    }

    #[test]
    fn total_is_rounded_to_four_places() {
        assert_eq!(order_total(3, 0.33333, 10.0), 0.9);
        assert_eq!(order_total(1, 0.123456, 0.0), 0.1235);
    }

    #[test]
    fn validation_rejects_bad_input() {
        assert!(matches!(validate(&request(0, None)), Err(PurchaseError::InvalidQuantity)));
        assert!(matches!(
            validate(&request(MAX_TICKETS_PER_ORDER + 1, None)),
            Err(PurchaseError::InvalidQuantity)
        ));
        assert!(validate(&request(MAX_TICKETS_PER_ORDER, None)).is_ok());
        assert!(matches!(validate(&request(1, Some(120.0))), Err(PurchaseError::InvalidDiscount(_))));
        assert!(matches!(validate(&request(1, Some(-5.0))), Err(PurchaseError::InvalidDiscount(_))));

        let mut no_buyer = request(1, None);
        no_buyer.buyer_address = "  ".to_string();
        assert!(matches!(validate(&no_buyer), Err(PurchaseError::InvalidBuyer)));

        assert_eq!(validate(&request(2, Some(25.0))).unwrap(), 25.0);
        assert_eq!(validate(&request(2, None)).unwrap(), 0.0);
    }
}
