//! Identifier types. Events keep the time-based `event_<unix millis>` token stored in the
//! events file; orders and tickets are UUID v4.

use uuid::Uuid;

pub type EventId = String;
pub type OrderId = Uuid;
pub type TicketId = Uuid;

const EVENT_ID_PREFIX: &str = "event_";

/// Build the event id token for a millisecond timestamp.
pub fn event_id_from_millis(millis: i64) -> EventId {
    format!("{}{}", EVENT_ID_PREFIX, millis)
}

/// Millisecond component of an event id, if it has the generated shape.
pub fn event_id_millis(id: &str) -> Option<i64> {
    id.strip_prefix(EVENT_ID_PREFIX)?.parse().ok()
}

/// Next event id given the clock and the newest id already issued.
/// Never returns a token at or below `last_issued`, so ids stay unique and increasing
/// even when the clock stalls or steps backwards. `None` once `last_issued` is `i64::MAX`.
pub fn next_event_id(now_millis: i64, last_issued: Option<i64>) -> Option<EventId> {
    let millis = match last_issued {
        Some(last) if last >= now_millis => last.checked_add(1)?,
        _ => now_millis,
    };
    Some(event_id_from_millis(millis))
}
