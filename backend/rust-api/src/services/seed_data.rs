use crate::config::Config;
use crate::models::{CredentialType, EventMetadata, NewEvent};
use crate::services::event_store::EventStore;
use crate::services::purchase::LEGACY_UNIT_PRICE;

/// (name, total tickets, price per ticket, description)
pub const SAMPLE_EVENTS: [(&str, u32, f64, &str); 3] = [
    (
        "Web3 Summit 2024",
        500,
        LEGACY_UNIT_PRICE,
        "Annual Web3 conference with top keynote speakers",
    ),
    (
        "NFT Art Showcase",
        200,
        1.0,
        "Exclusive digital art exhibition and auction",
    ),
    (
        "Crypto Music Fest",
        1000,
        0.75,
        "Electronic music festival with blockchain integration",
    ),
];

pub fn sample_events(config: &Config) -> Vec<NewEvent> {
    SAMPLE_EVENTS
        .iter()
        .map(|(name, total_tickets, price, description)| NewEvent {
            name: name.to_string(),
            total_tickets: *total_tickets,
            price_per_ticket: *price,
            description: description.to_string(),
            organizer: config.organizer_address.clone(),
            required_credential: CredentialType::HumanVerified,
            contract_address: config.contract_address.clone(),
            metadata: EventMetadata::default(),
        })
        .collect()
}

/// Create the sample events unless the store already holds events (or `force` is set).
/// Returns how many events were created.
pub async fn seed_sample_events(store: &EventStore, config: &Config, force: bool) -> anyhow::Result<usize> {
    let count = store.count().await?;

    if count > 0 && !force {
        tracing::info!("Event store already has {} events, skipping seed", count);
        return Ok(0);
    }

    tracing::info!("Creating sample events...");
    let mut created = 0;
    for new_event in sample_events(config) {
        let event = store.create_event(new_event).await?;
        tracing::info!("Sample event '{}' created as {}", event.name, event.id);
        created += 1;
    }

    Ok(created)
}
