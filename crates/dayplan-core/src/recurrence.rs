//! Expansion of recurrence rules into concrete event instances.
//!
//! Expansion happens once, at creation time: the root event is the first
//! occurrence, and every generated instance lands the day after the root's
//! start date or later. Instances are plain rows linked to the root via
//! `parent_event_id`; they are never recomputed afterwards.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use crate::event::{Event, Frequency, RecurrenceRule};

/// Default generation horizon when the rule has no `end_date`.
pub const DEFAULT_HORIZON_DAYS: i64 = 90;

/// Hard cap on generated instances per family. Bounds the date-stepping
/// loops even when a caller supplies an `end_date` far in the future.
pub const MAX_INSTANCES: usize = 1000;

/// Generate the instances for `template` according to `rule`.
///
/// Every instance preserves the template's duration and inherits its
/// title, description and location. The template itself is not duplicated:
/// generation starts the day after its start date. An `end_date` before
/// the template's start date yields an empty list, not an error.
pub fn expand(template: &Event, rule: &RecurrenceRule) -> Vec<Event> {
    let duration = template.duration();
    let start_date = template.start_time.date_naive();
    let time_of_day = template.start_time.time();
    let end_date = rule
        .end_date
        .unwrap_or(start_date + Duration::days(DEFAULT_HORIZON_DAYS));

    // Generation begins the day after the template's own occurrence.
    let first = start_date + Duration::days(1);

    let mut instances = Vec::new();
    match &rule.frequency {
        Frequency::Daily => {
            let mut current = first;
            while current <= end_date && instances.len() < MAX_INSTANCES {
                instances.push(instance_on(template, current, time_of_day, duration));
                current += Duration::days(1);
            }
        }
        Frequency::Weekly { days } if !days.is_empty() => {
            let targets: Vec<u32> = days.iter().map(|d| d.index()).collect();
            let mut current = first;
            while current <= end_date && instances.len() < MAX_INSTANCES {
                if targets.contains(&current.weekday().num_days_from_monday()) {
                    instances.push(instance_on(template, current, time_of_day, duration));
                }
                current += Duration::days(1);
            }
        }
        Frequency::Weekly { .. } => {
            // No explicit weekdays: one instance per week, stepping seven
            // days at a time from the day after the template.
            let mut current = first;
            while current <= end_date && instances.len() < MAX_INSTANCES {
                instances.push(instance_on(template, current, time_of_day, duration));
                current += Duration::days(7);
            }
        }
        Frequency::Monthly => {
            let day_of_month = template.start_time.day();
            let mut year = first.year();
            let mut month = first.month();

            while instances.len() < MAX_INSTANCES {
                match NaiveDate::from_ymd_opt(year, month, day_of_month) {
                    // Month too short for this day-of-month: skip the whole
                    // month rather than clamping to its last day.
                    None => {
                        (year, month) = next_month(year, month);
                    }
                    Some(candidate) => {
                        if candidate > end_date {
                            break;
                        }
                        if candidate >= first {
                            instances.push(instance_on(
                                template,
                                candidate,
                                time_of_day,
                                duration,
                            ));
                        }
                        (year, month) = next_month(year, month);
                    }
                }
            }
        }
    }

    instances
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

fn instance_on(
    template: &Event,
    date: NaiveDate,
    time_of_day: NaiveTime,
    duration: Duration,
) -> Event {
    let start: DateTime<Utc> = date.and_time(time_of_day).and_utc();
    let now = Utc::now();
    Event {
        id: Uuid::new_v4().to_string(),
        owner_id: template.owner_id.clone(),
        title: template.title.clone(),
        start_time: start,
        end_time: start + duration,
        description: template.description.clone(),
        location: template.location.clone(),
        is_recurring: true,
        parent_event_id: Some(template.id.clone()),
        recurrence_rule: None,
        created_at: now,
        updated_at: now,
    }
}
