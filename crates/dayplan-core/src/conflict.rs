//! Pairwise overlap detection between calendar events.
//!
//! The scan sorts by start time and compares adjacent pairs only. This has
//! a known blind spot: a long event that fully contains a later event is
//! not reported against it unless the two end up adjacent in sort order.
//! That behavior is preserved for compatibility; [`detect_conflicts_exhaustive`]
//! is the stricter opt-in variant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::Event;

/// One side of a reported conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictParty {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ConflictParty {
    fn from_event(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            start: event.start_time,
            end: event.end_time,
        }
    }
}

/// A pair of events whose time ranges overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    #[serde(rename = "event1")]
    pub first: ConflictParty,
    #[serde(rename = "event2")]
    pub second: ConflictParty,
    pub overlap_minutes: i64,
}

fn overlap_minutes(a: &Event, b: &Event) -> i64 {
    let overlap_start = a.start_time.max(b.start_time);
    let overlap_end = a.end_time.min(b.end_time);
    (overlap_end - overlap_start).num_minutes()
}

/// Report overlaps between adjacent events in start order.
///
/// Pure and deterministic: the same input list always produces the same
/// conflicts in the same order. An empty result is a valid outcome.
pub fn detect_conflicts(events: &[Event]) -> Vec<Conflict> {
    let mut sorted: Vec<&Event> = events.iter().collect();
    sorted.sort_by_key(|e| e.start_time);

    let mut conflicts = Vec::new();
    for pair in sorted.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        if current.end_time > next.start_time {
            conflicts.push(Conflict {
                first: ConflictParty::from_event(current),
                second: ConflictParty::from_event(next),
                overlap_minutes: overlap_minutes(current, next),
            });
        }
    }
    conflicts
}

/// Report every overlapping pair, not just adjacent ones.
///
/// Covers the adjacent-scan blind spot at the cost of comparing each event
/// against all later-starting events until one starts at or after its end.
pub fn detect_conflicts_exhaustive(events: &[Event]) -> Vec<Conflict> {
    let mut sorted: Vec<&Event> = events.iter().collect();
    sorted.sort_by_key(|e| e.start_time);

    let mut conflicts = Vec::new();
    for (i, current) in sorted.iter().enumerate() {
        for next in &sorted[i + 1..] {
            if next.start_time >= current.end_time {
                break;
            }
            conflicts.push(Conflict {
                first: ConflictParty::from_event(current),
                second: ConflictParty::from_event(next),
                overlap_minutes: overlap_minutes(current, next),
            });
        }
    }
    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventDraft;

    fn event(title: &str, start: &str, end: &str) -> Event {
        EventDraft {
            title: title.to_string(),
            start_time: start.parse().unwrap(),
            end_time: end.parse().unwrap(),
            description: None,
            location: None,
            recurrence_rule: None,
        }
        .into_event("user-1")
    }

    #[test]
    fn reports_single_adjacent_overlap() {
        let events = vec![
            event("A", "2026-03-02T09:00:00Z", "2026-03-02T10:00:00Z"),
            event("B", "2026-03-02T09:30:00Z", "2026-03-02T10:30:00Z"),
            event("C", "2026-03-02T11:00:00Z", "2026-03-02T12:00:00Z"),
        ];

        let conflicts = detect_conflicts(&events);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].first.title, "A");
        assert_eq!(conflicts[0].second.title, "B");
        assert_eq!(conflicts[0].overlap_minutes, 30);
    }

    #[test]
    fn adjacent_scan_misses_contained_event() {
        // The all-day event contains the afternoon one, but the midday event
        // sits between them in sort order and overlaps neither boundary pair
        // on the right.
        let events = vec![
            event("all-day", "2026-03-02T08:00:00Z", "2026-03-02T18:00:00Z"),
            event("midday", "2026-03-02T12:00:00Z", "2026-03-02T13:00:00Z"),
            event("afternoon", "2026-03-02T14:00:00Z", "2026-03-02T15:00:00Z"),
        ];

        let adjacent = detect_conflicts(&events);
        // all-day/midday reported, all-day/afternoon missed by design.
        assert_eq!(adjacent.len(), 1);
        assert_eq!(adjacent[0].second.title, "midday");

        let exhaustive = detect_conflicts_exhaustive(&events);
        assert_eq!(exhaustive.len(), 2);
    }

    #[test]
    fn no_events_no_conflicts() {
        assert!(detect_conflicts(&[]).is_empty());
    }

    #[test]
    fn back_to_back_events_do_not_conflict() {
        let events = vec![
            event("A", "2026-03-02T09:00:00Z", "2026-03-02T10:00:00Z"),
            event("B", "2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z"),
        ];
        assert!(detect_conflicts(&events).is_empty());
    }
}
