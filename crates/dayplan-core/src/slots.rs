//! Free-slot discovery within a working day.
//!
//! A cursor sweeps the sorted events of the queried date from the start of
//! the working window; every gap at least as long as the requested duration
//! becomes a slot. Slots are ephemeral query results, recomputed per call.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::Event;

/// Serialize an instant as a 24-hour `HH:MM` string scoped to the queried
/// date, the format the tool-calling layer expects for slot output.
pub(crate) mod hhmm {
    use chrono::{DateTime, Utc};
    use serde::Serializer;

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format("%H:%M").to_string())
    }
}

/// Working-hours window of a day, whole hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workday {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for Workday {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 17,
        }
    }
}

impl Workday {
    /// Start of the working window on `date`.
    pub fn start_on(&self, date: NaiveDate) -> DateTime<Utc> {
        at_hour(date, self.start_hour)
    }

    /// End of the working window on `date`.
    pub fn end_on(&self, date: NaiveDate) -> DateTime<Utc> {
        at_hour(date, self.end_hour)
    }
}

fn at_hour(date: NaiveDate, hour: u32) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN);
    date.and_time(time).and_utc()
}

/// Full-day query bounds, `00:00` through `23:59`.
pub(crate) fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let end = NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN);
    (
        date.and_time(NaiveTime::MIN).and_utc(),
        date.and_time(end).and_utc(),
    )
}

/// A contiguous idle interval long enough for a requested duration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FreeSlot {
    #[serde(serialize_with = "hhmm::serialize")]
    pub start: DateTime<Utc>,
    #[serde(serialize_with = "hhmm::serialize")]
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

/// Find the gaps of at least `duration_minutes` between `events` on `date`.
///
/// Events outside the queried date are ignored; an event starting before
/// the cursor contributes no gap but still pushes the cursor forward.
/// Slots come out in chronological order. An empty result is a valid
/// outcome, not an error.
pub fn find_free_slots(
    events: &[Event],
    date: NaiveDate,
    duration_minutes: i64,
    workday: &Workday,
) -> Vec<FreeSlot> {
    let (day_start, day_end) = day_bounds(date);
    let mut relevant: Vec<&Event> = events
        .iter()
        .filter(|e| e.overlaps(day_start, day_end))
        .collect();
    relevant.sort_by_key(|e| e.start_time);

    let mut slots = Vec::new();
    let mut cursor = workday.start_on(date);

    for event in &relevant {
        if event.start_time > cursor {
            let length = (event.start_time - cursor).num_minutes();
            if length >= duration_minutes {
                slots.push(FreeSlot {
                    start: cursor,
                    end: event.start_time,
                    duration_minutes: length,
                });
            }
        }
        cursor = cursor.max(event.end_time);
    }

    let work_end = workday.end_on(date);
    if cursor < work_end {
        let length = (work_end - cursor).num_minutes();
        if length >= duration_minutes {
            slots.push(FreeSlot {
                start: cursor,
                end: work_end,
                duration_minutes: length,
            });
        }
    }

    slots
}
