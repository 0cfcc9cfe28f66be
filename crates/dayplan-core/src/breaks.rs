//! Rest-break suggestions for days with long uninterrupted work stretches.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::event::Event;
use crate::slots::{hhmm, Workday};

/// Maximum continuous work before a break is suggested (minutes).
pub const DEFAULT_WORK_DURATION_MINUTES: i64 = 90;

/// Length of every suggested break (minutes).
pub const BREAK_MINUTES: i64 = 15;

/// A proposed rest break.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakSuggestion {
    #[serde(serialize_with = "hhmm::serialize")]
    pub suggested_time: chrono::DateTime<chrono::Utc>,
    pub duration_minutes: i64,
    pub reason: String,
}

/// Suggest 15-minute breaks wherever continuous work on `date` would
/// exceed `work_duration_minutes`.
///
/// The sweep starts at the working window's opening hour; each suggestion
/// lands exactly `work_duration_minutes` after the stretch began. One
/// final suggestion covers the open stretch after the last event when it
/// is long enough.
pub fn suggest_breaks(
    events: &[Event],
    date: NaiveDate,
    work_duration_minutes: i64,
    workday: &Workday,
) -> Vec<BreakSuggestion> {
    let day_start = workday.start_on(date);
    let day_end = workday.end_on(date);

    let mut relevant: Vec<&Event> = events
        .iter()
        .filter(|e| e.overlaps(day_start, day_end))
        .collect();
    relevant.sort_by_key(|e| e.start_time);

    let mut breaks = Vec::new();
    let mut cursor = day_start;

    for event in &relevant {
        if (event.start_time - cursor).num_minutes() >= work_duration_minutes {
            let suggested = cursor + Duration::minutes(work_duration_minutes);
            if suggested < event.start_time {
                breaks.push(BreakSuggestion {
                    suggested_time: suggested,
                    duration_minutes: BREAK_MINUTES,
                    reason: format!("Work session exceeded {work_duration_minutes} minutes"),
                });
            }
        }
        cursor = cursor.max(event.end_time);
    }

    if (day_end - cursor).num_minutes() >= work_duration_minutes {
        breaks.push(BreakSuggestion {
            suggested_time: cursor + Duration::minutes(work_duration_minutes),
            duration_minutes: BREAK_MINUTES,
            reason: "Long work session detected".to_string(),
        });
    }

    breaks
}
