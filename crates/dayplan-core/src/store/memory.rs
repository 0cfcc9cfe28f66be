//! In-memory event store for tests and embedded use.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::{patch_event, EventStore};
use crate::error::StoreError;
use crate::event::{Event, EventPatch};

/// HashMap-backed store. Everything is lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    events: HashMap<String, Event>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored events, across all owners.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn sorted(mut events: Vec<Event>) -> Vec<Event> {
        events.sort_by_key(|e| e.start_time);
        events
    }
}

impl EventStore for MemoryStore {
    fn insert_events(&mut self, events: Vec<Event>) -> Result<(), StoreError> {
        // Reject the whole batch on a duplicate id so a partial family is
        // never left visible.
        for event in &events {
            if self.events.contains_key(&event.id) {
                return Err(StoreError::QueryFailed(format!(
                    "duplicate event id: {}",
                    event.id
                )));
            }
        }
        for event in events {
            self.events.insert(event.id.clone(), event);
        }
        Ok(())
    }

    fn event(&self, id: &str) -> Result<Option<Event>, StoreError> {
        Ok(self.events.get(id).cloned())
    }

    fn all_events(&self, owner_id: &str) -> Result<Vec<Event>, StoreError> {
        Ok(Self::sorted(
            self.events
                .values()
                .filter(|e| e.owner_id == owner_id)
                .cloned()
                .collect(),
        ))
    }

    fn events_in_range(
        &self,
        owner_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Event>, StoreError> {
        Ok(Self::sorted(
            self.events
                .values()
                .filter(|e| e.owner_id == owner_id && e.overlaps(start, end))
                .cloned()
                .collect(),
        ))
    }

    fn events_by_parent(&self, parent_id: &str) -> Result<Vec<Event>, StoreError> {
        Ok(Self::sorted(
            self.events
                .values()
                .filter(|e| e.parent_event_id.as_deref() == Some(parent_id))
                .cloned()
                .collect(),
        ))
    }

    fn apply_patch(&mut self, id: &str, patch: &EventPatch) -> Result<Option<Event>, StoreError> {
        match self.events.get_mut(id) {
            Some(event) => {
                patch_event(event, patch);
                Ok(Some(event.clone()))
            }
            None => Ok(None),
        }
    }

    fn delete_event(&mut self, id: &str) -> Result<bool, StoreError> {
        Ok(self.events.remove(id).is_some())
    }

    fn delete_by_parent(&mut self, parent_id: &str) -> Result<usize, StoreError> {
        let ids: Vec<String> = self
            .events
            .values()
            .filter(|e| e.parent_event_id.as_deref() == Some(parent_id))
            .map(|e| e.id.clone())
            .collect();
        for id in &ids {
            self.events.remove(id);
        }
        Ok(ids.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventDraft;

    fn draft(title: &str, start: &str, end: &str) -> EventDraft {
        EventDraft {
            title: title.to_string(),
            start_time: start.parse().unwrap(),
            end_time: end.parse().unwrap(),
            description: None,
            location: None,
            recurrence_rule: None,
        }
    }

    #[test]
    fn range_query_uses_inclusive_overlap() {
        let mut store = MemoryStore::new();
        let event = draft("Edge", "2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z")
            .into_event("user-1");
        store.insert_events(vec![event]).unwrap();

        // Range ending exactly at the event's start still matches.
        let hits = store
            .events_in_range(
                "user-1",
                "2026-03-02T08:00:00Z".parse().unwrap(),
                "2026-03-02T10:00:00Z".parse().unwrap(),
            )
            .unwrap();
        assert_eq!(hits.len(), 1);

        let misses = store
            .events_in_range(
                "user-1",
                "2026-03-02T11:30:00Z".parse().unwrap(),
                "2026-03-02T12:00:00Z".parse().unwrap(),
            )
            .unwrap();
        assert!(misses.is_empty());
    }

    #[test]
    fn owners_are_isolated() {
        let mut store = MemoryStore::new();
        store
            .insert_events(vec![
                draft("Mine", "2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z").into_event("user-1"),
                draft("Theirs", "2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z")
                    .into_event("user-2"),
            ])
            .unwrap();

        let mine = store.all_events("user-1").unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].title, "Mine");
    }

    #[test]
    fn duplicate_batch_leaves_store_untouched() {
        let mut store = MemoryStore::new();
        let first = draft("A", "2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z")
            .into_event("user-1");
        store.insert_events(vec![first.clone()]).unwrap();

        let fresh = draft("B", "2026-03-02T12:00:00Z", "2026-03-02T13:00:00Z")
            .into_event("user-1");
        let result = store.insert_events(vec![fresh, first]);
        assert!(result.is_err());
        assert_eq!(store.len(), 1);
    }
}
