pub mod event_store;
pub mod fraud;
pub mod perks;
pub mod purchase;
pub mod seed_data;

pub use event_store::{EventStore, ReserveError, StoreError};
pub use purchase::{purchase_tickets, PurchaseError, PurchaseRequest};
