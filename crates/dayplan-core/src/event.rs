//! Calendar event model and recurrence rules.
//!
//! An event is one of three things:
//! - a recurrence root (carries a [`RecurrenceRule`]),
//! - a generated instance (carries `parent_event_id`),
//! - a plain one-off event (neither).
//!
//! A root and its instances form a family: they are created together in one
//! atomic batch and deleted together when a cascade is requested.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Day of the week for weekly recurrence, numbered Monday = 0 .. Sunday = 6.
///
/// Serialized as lowercase English names ("monday", .., "sunday").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// Days since Monday, matching `chrono::Weekday::num_days_from_monday`.
    pub fn index(self) -> u32 {
        match self {
            Self::Monday => 0,
            Self::Tuesday => 1,
            Self::Wednesday => 2,
            Self::Thursday => 3,
            Self::Friday => 4,
            Self::Saturday => 5,
            Self::Sunday => 6,
        }
    }
}

/// How often a root event repeats.
///
/// `days` only exists on the weekly variant, so a daily or monthly rule
/// carrying weekday names is unrepresentable. A stray `days` key on those
/// variants is ignored during deserialization rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Frequency {
    /// Every calendar day
    Daily,
    /// On the listed weekdays; an empty list falls back to stepping a week
    /// at a time from the day after the root
    Weekly {
        #[serde(default)]
        days: Vec<DayOfWeek>,
    },
    /// On the root's day-of-month; months too short for that day are
    /// skipped entirely, never clamped to month end
    Monthly,
}

/// Recurrence rule attached to a root event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    #[serde(flatten)]
    pub frequency: Frequency,
    /// Last date (inclusive) to generate instances for.
    /// Defaults to the root's start date + 90 days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// A calendar event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// True on recurrence roots and on every generated instance
    #[serde(default)]
    pub is_recurring: bool,
    /// Present only on generated instances
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_event_id: Option<String>,
    /// Present only on recurrence roots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_rule: Option<RecurrenceRule>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Duration between start and end.
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    /// Duration in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Inclusive-overlap check against a time range.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_time <= end && self.end_time >= start
    }
}

/// Payload for creating an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_rule: Option<RecurrenceRule>,
}

impl EventDraft {
    /// Materialize the draft into a root event with a fresh id.
    pub fn into_event(self, owner_id: &str) -> Event {
        let now = Utc::now();
        let is_recurring = self.recurrence_rule.is_some();
        Event {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            title: self.title,
            start_time: self.start_time,
            end_time: self.end_time,
            description: self.description,
            location: self.location,
            is_recurring,
            parent_event_id: None,
            recurrence_rule: self.recurrence_rule,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a single event row. Absent fields are left untouched;
/// siblings of a recurring family are never affected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl EventPatch {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.description.is_none()
            && self.location.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekly_rule_round_trips_with_lowercase_days() {
        let json = r#"{"type":"weekly","days":["monday","wednesday"],"end_date":"2026-06-30"}"#;
        let rule: RecurrenceRule = serde_json::from_str(json).unwrap();
        match &rule.frequency {
            Frequency::Weekly { days } => {
                assert_eq!(days, &[DayOfWeek::Monday, DayOfWeek::Wednesday]);
            }
            other => panic!("expected weekly, got {other:?}"),
        }
        assert_eq!(
            rule.end_date,
            Some(NaiveDate::from_ymd_opt(2026, 6, 30).unwrap())
        );

        let back = serde_json::to_string(&rule).unwrap();
        assert!(back.contains(r#""type":"weekly""#));
        assert!(back.contains(r#""days":["monday","wednesday"]"#));
    }

    #[test]
    fn days_on_daily_rule_is_ignored_not_rejected() {
        let json = r#"{"type":"daily","days":["friday"]}"#;
        let rule: RecurrenceRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.frequency, Frequency::Daily);
        assert_eq!(rule.end_date, None);
    }

    #[test]
    fn unknown_rule_type_is_rejected() {
        let json = r#"{"type":"yearly"}"#;
        assert!(serde_json::from_str::<RecurrenceRule>(json).is_err());
    }

    #[test]
    fn event_serializes_iso8601_times() {
        let start = "2026-03-02T09:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let draft = EventDraft {
            title: "Standup".to_string(),
            start_time: start,
            end_time: start + Duration::minutes(30),
            description: None,
            location: None,
            recurrence_rule: None,
        };
        let event = draft.into_event("user-1");
        assert!(!event.is_recurring);

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""start_time":"2026-03-02T09:00:00Z""#));
        assert!(!json.contains("recurrence_rule"));
    }
}
