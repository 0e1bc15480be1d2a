//! Shared types: events, orders, perks, fraud analysis. Timestamps use chrono, never raw strings.

pub mod event;
pub mod fraud;
pub mod ids;
pub mod order;

pub use event::{CredentialType, Event, EventMetadata, EventPatch, NewEvent};
pub use fraud::{FraudAnalysis, RecommendedAction, WalletActivity};
pub use ids::{EventId, OrderId, TicketId};
pub use order::{Order, Perk};
