//! File-backed event store.
//!
//! All events live in one pretty-printed JSON array at `<data_dir>/events.json`. Every
//! read-modify-write cycle holds the store's mutex, and writes land in a sibling temp file
//! that is renamed over `events.json`, so a reader never observes a partial file and
//! concurrent writers never drop each other's changes. One process owns a data directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::models::ids::{event_id_millis, next_event_id};
use crate::models::{Event, EventPatch, NewEvent};

pub const EVENTS_FILE_NAME: &str = "events.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("events file {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode events: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("event {0} already exists")]
    DuplicateId(String),
    #[error("invalid event: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum ReserveError {
    #[error("event {0} not found")]
    NotFound(String),
    #[error("only {remaining} tickets left, {requested} requested")]
    SoldOut { requested: u32, remaining: u32 },
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug)]
pub struct EventStore {
    data_dir: PathBuf,
    path: PathBuf,
    lock: Mutex<()>,
}

impl EventStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let path = data_dir.join(EVENTS_FILE_NAME);
        Self {
            data_dir,
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the data directory if it does not exist yet. Idempotent.
    pub async fn ensure_data_dir(&self) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|source| StoreError::Write {
                path: self.data_dir.clone(),
                source,
            })
    }

    /// All stored events in insertion order. A missing file is the first-run case and
    /// yields an empty list; an unparseable file is reported as [`StoreError::Corrupt`].
    pub async fn load_events(&self) -> Result<Vec<Event>, StoreError> {
        self.read_all().await
    }

    pub async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.read_all().await?.len())
    }

    /// Append `event` as given and return it unchanged.
    pub async fn save_event(&self, event: Event) -> Result<Event, StoreError> {
        event.validate().map_err(StoreError::Invalid)?;

        let _guard = self.lock.lock().await;
        let mut events = self.read_all().await?;
        if events.iter().any(|e| e.id == event.id) {
            return Err(StoreError::DuplicateId(event.id));
        }
        events.push(event.clone());
        self.write_all(&events).await?;

        tracing::info!(event_id = %event.id, total = events.len(), "Event saved");
        Ok(event)
    }

    /// Assign the next event id and creation time, then append.
    pub async fn create_event(&self, new_event: NewEvent) -> Result<Event, StoreError> {
        let _guard = self.lock.lock().await;
        let mut events = self.read_all().await?;

        let last_issued = events.iter().filter_map(|e| event_id_millis(&e.id)).max();
        let now = Utc::now();
        let id = next_event_id(now.timestamp_millis(), last_issued)
            .ok_or_else(|| StoreError::Invalid("no event id left after the newest stored id".to_string()))?;
        if events.iter().any(|e| e.id == id) {
            return Err(StoreError::DuplicateId(id));
        }
        let event = new_event.into_event(id, now);
        event.validate().map_err(StoreError::Invalid)?;

        events.push(event.clone());
        self.write_all(&events).await?;

        tracing::info!(event_id = %event.id, name = %event.name, "Event created");
        Ok(event)
    }

    pub async fn get_event(&self, id: &str) -> Result<Option<Event>, StoreError> {
        let events = self.read_all().await?;
        Ok(events.into_iter().find(|e| e.id == id))
    }

    /// Shallow-merge `patch` into the event with `id`. Returns `Ok(None)` when no such
    /// event exists; the file is left untouched in that case, for an empty patch, and when
    /// the merged record would be invalid.
    pub async fn update_event(&self, id: &str, patch: &EventPatch) -> Result<Option<Event>, StoreError> {
        let _guard = self.lock.lock().await;
        let mut events = self.read_all().await?;

        let Some(event) = events.iter_mut().find(|e| e.id == id) else {
            tracing::debug!(event_id = %id, "Update skipped, event not found");
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(event.clone()));
        }

        let mut updated = event.clone();
        patch.apply_to(&mut updated);
        updated.validate().map_err(StoreError::Invalid)?;
        *event = updated.clone();

        self.write_all(&events).await?;
        tracing::info!(event_id = %id, "Event updated");
        Ok(Some(updated))
    }

    /// Take `quantity` tickets from the event's remaining capacity in a single locked
    /// cycle and return the updated event.
    pub async fn reserve_tickets(&self, id: &str, quantity: u32) -> Result<Event, ReserveError> {
        let _guard = self.lock.lock().await;
        let mut events = self.read_all().await?;

        let event = events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| ReserveError::NotFound(id.to_string()))?;

        let remaining = event.remaining_tickets();
        if quantity > remaining {
            return Err(ReserveError::SoldOut {
                requested: quantity,
                remaining,
            });
        }
        event.sold_tickets += quantity;
        let updated = event.clone();

        self.write_all(&events).await?;
        tracing::info!(
            event_id = %id,
            quantity,
            sold = updated.sold_tickets,
            total = updated.total_tickets,
            "Tickets reserved"
        );
        Ok(updated)
    }

    async fn read_all(&self) -> Result<Vec<Event>, StoreError> {
        self.ensure_data_dir().await?;

        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| {
            tracing::error!(path = %self.path.display(), error = %source, "Events file is corrupt");
            StoreError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })
    }

    async fn write_all(&self, events: &[Event]) -> Result<(), StoreError> {
        let body = serde_json::to_vec_pretty(events).map_err(StoreError::Encode)?;
        let tmp_path = self.path.with_extension("json.tmp");

        let result = async {
            tokio::fs::write(&tmp_path, &body).await?;
            tokio::fs::rename(&tmp_path, &self.path).await
        }
        .await;

        result.map_err(|source| {
            tracing::error!(path = %self.path.display(), error = %source, "Error writing events file");
            StoreError::Write {
                path: self.path.clone(),
                source,
            }
        })
    }
}
