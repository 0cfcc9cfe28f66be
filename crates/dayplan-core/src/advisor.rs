//! Heuristic review of an existing day's schedule.
//!
//! Produces human-readable suggestions rather than schedule mutations:
//! missing buffers between back-to-back meetings, a skipped lunch, no
//! focus block, too many meetings. All heuristics are title-based and
//! deliberately cheap.

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::event::Event;

/// Minimum comfortable gap between consecutive events (minutes).
const MIN_BUFFER_MINUTES: i64 = 10;

/// Kind of suggestion raised by the review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    BufferTime,
    LunchBreak,
    FocusTime,
    MeetingLoad,
}

/// How strongly the suggestion should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

/// A single review finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSuggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub event_ids: Vec<String>,
}

fn title_contains_any(event: &Event, needles: &[&str]) -> bool {
    let title = event.title.to_lowercase();
    needles.iter().any(|n| title.contains(n))
}

/// Review a day's events and list possible improvements.
pub fn review_day(events: &[Event]) -> Vec<ScheduleSuggestion> {
    let mut sorted: Vec<&Event> = events.iter().collect();
    sorted.sort_by_key(|e| e.start_time);

    let mut suggestions = Vec::new();

    // Back-to-back events without breathing room.
    for pair in sorted.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        let gap_minutes = (next.start_time - current.end_time).num_minutes();
        if gap_minutes < MIN_BUFFER_MINUTES {
            suggestions.push(ScheduleSuggestion {
                kind: SuggestionKind::BufferTime,
                severity: Severity::Medium,
                message: format!(
                    "Consider adding buffer time between '{}' and '{}'",
                    current.title, next.title
                ),
                event_ids: vec![current.id.clone(), next.id.clone()],
            });
        }
    }

    // Lunch break around midday.
    let has_lunch = sorted.iter().any(|e| {
        (12..=13).contains(&e.start_time.hour()) && title_contains_any(e, &["lunch", "break"])
    });
    if !has_lunch && sorted.len() > 3 {
        suggestions.push(ScheduleSuggestion {
            kind: SuggestionKind::LunchBreak,
            severity: Severity::High,
            message: "Consider scheduling a lunch break to maintain energy".to_string(),
            event_ids: Vec::new(),
        });
    }

    // A block for uninterrupted work.
    let has_focus = sorted
        .iter()
        .any(|e| title_contains_any(e, &["focus", "deep work"]));
    if !has_focus && sorted.len() > 2 {
        suggestions.push(ScheduleSuggestion {
            kind: SuggestionKind::FocusTime,
            severity: Severity::Medium,
            message: "Schedule a focus block for uninterrupted work".to_string(),
            event_ids: Vec::new(),
        });
    }

    // Meeting overload.
    let meetings: Vec<&&Event> = sorted
        .iter()
        .filter(|e| title_contains_any(e, &["meeting", "call", "sync", "standup"]))
        .collect();
    if meetings.len() > 4 {
        suggestions.push(ScheduleSuggestion {
            kind: SuggestionKind::MeetingLoad,
            severity: Severity::High,
            message: format!(
                "You have {} meetings. Consider if some could be async.",
                meetings.len()
            ),
            event_ids: meetings.iter().map(|e| e.id.clone()).collect(),
        });
    }

    suggestions
}
