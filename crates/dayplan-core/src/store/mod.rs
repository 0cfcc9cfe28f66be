//! Event storage: the engine's store contract plus the in-memory and
//! SQLite implementations.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::EventDb;

use chrono::{DateTime, Utc};
use std::path::PathBuf;

use crate::error::StoreError;
use crate::event::{Event, EventPatch};

/// Returns `~/.config/dayplan[-dev]/` based on DAYPLAN_ENV.
///
/// Set DAYPLAN_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DAYPLAN_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("dayplan-dev")
    } else {
        base_dir.join("dayplan")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Contract between the scheduling engine and whatever holds the events.
///
/// Range queries use inclusive-overlap semantics
/// (`event.start <= range_end && event.end >= range_start`) and return
/// events sorted by start time. `insert_events` is atomic: either every
/// event in the batch becomes visible or none do, so a recurrence root is
/// never stored without its instances.
pub trait EventStore {
    /// Insert a batch of events atomically.
    fn insert_events(&mut self, events: Vec<Event>) -> Result<(), StoreError>;

    /// Insert a single event.
    fn insert_event(&mut self, event: Event) -> Result<(), StoreError> {
        self.insert_events(vec![event])
    }

    /// Fetch a single event by id.
    fn event(&self, id: &str) -> Result<Option<Event>, StoreError>;

    /// All events of one owner, sorted by start time.
    fn all_events(&self, owner_id: &str) -> Result<Vec<Event>, StoreError>;

    /// Events of one owner overlapping the range, sorted by start time.
    fn events_in_range(
        &self,
        owner_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Event>, StoreError>;

    /// Generated instances of a recurrence root, sorted by start time.
    fn events_by_parent(&self, parent_id: &str) -> Result<Vec<Event>, StoreError>;

    /// Apply a partial update to one event and refresh its `updated_at`.
    /// Returns the updated event, or `None` when the id is unknown.
    fn apply_patch(&mut self, id: &str, patch: &EventPatch) -> Result<Option<Event>, StoreError>;

    /// Delete one event. Returns whether a row was removed.
    fn delete_event(&mut self, id: &str) -> Result<bool, StoreError>;

    /// Delete every instance generated from `parent_id`. Returns the count.
    fn delete_by_parent(&mut self, parent_id: &str) -> Result<usize, StoreError>;
}

pub(crate) fn patch_event(event: &mut Event, patch: &EventPatch) {
    if let Some(title) = &patch.title {
        event.title = title.clone();
    }
    if let Some(start_time) = patch.start_time {
        event.start_time = start_time;
    }
    if let Some(end_time) = patch.end_time {
        event.end_time = end_time;
    }
    if let Some(description) = &patch.description {
        event.description = Some(description.clone());
    }
    if let Some(location) = &patch.location {
        event.location = Some(location.clone());
    }
    event.updated_at = Utc::now();
}
