//! Calendar service: event lifecycle plus the read-time scheduling queries.
//!
//! The service owns an [`EventStore`] and composes the pure engine
//! functions over snapshots fetched from it. Query results are recomputed
//! on every call; nothing here caches, so two calls over an unchanged
//! store return identical results.

use chrono::{Datelike, DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::advisor::{review_day, ScheduleSuggestion};
use crate::breaks::{suggest_breaks, BreakSuggestion};
use crate::config::Config;
use crate::conflict::{detect_conflicts, Conflict};
use crate::error::{CoreError, Result, ValidationError};
use crate::event::{Event, EventDraft, EventPatch};
use crate::recurrence::expand;
use crate::scheduler::{schedule_tasks, ScheduleTask, ScheduledSlot, SchedulerConfig};
use crate::slots::{day_bounds, find_free_slots, FreeSlot};
use crate::store::EventStore;

/// Calendar range shapes understood by [`CalendarService::events_for_view`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    Day,
    Week,
    Month,
}

impl std::str::FromStr for CalendarView {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(ValidationError::InvalidValue {
                field: "view".to_string(),
                message: format!("unknown view: {other}"),
            }
            .into()),
        }
    }
}

/// Optional bounds and keyword for [`CalendarService::list_events`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

/// Result of creating an event, recurring or not.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedEvent {
    pub event: Event,
    /// Instances generated and stored alongside a recurrence root
    pub instances_created: usize,
}

/// Result of packing tasks into a day.
#[derive(Debug, Clone, Serialize)]
pub struct DayPlan {
    pub schedule: Vec<ScheduledSlot>,
    pub scheduled_tasks: usize,
    pub total_tasks: usize,
}

/// The engine's front door for the API and tool-calling layers.
pub struct CalendarService<S: EventStore> {
    store: S,
    config: Config,
}

impl<S: EventStore> CalendarService<S> {
    /// Create a service with default configuration.
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: Config::default(),
        }
    }

    /// Create a service with explicit configuration.
    pub fn with_config(store: S, config: Config) -> Self {
        Self { store, config }
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // === Event lifecycle ===

    /// Create an event; a draft carrying a recurrence rule is expanded and
    /// the whole family is written as one atomic batch.
    pub fn create_event(&mut self, owner_id: &str, draft: EventDraft) -> Result<CreatedEvent> {
        validate_time_range(draft.start_time, draft.end_time)?;

        let root = draft.into_event(owner_id);
        let instances = match &root.recurrence_rule {
            Some(rule) => expand(&root, rule),
            None => Vec::new(),
        };
        let instances_created = instances.len();

        let mut batch = Vec::with_capacity(1 + instances.len());
        batch.push(root.clone());
        batch.extend(instances);
        self.store.insert_events(batch)?;

        info!(
            event_id = %root.id,
            instances = instances_created,
            "created event"
        );
        Ok(CreatedEvent {
            event: root,
            instances_created,
        })
    }

    /// Fetch a single event.
    pub fn get_event(&self, id: &str) -> Result<Event> {
        self.store
            .event(id)?
            .ok_or_else(|| CoreError::NotFound { id: id.to_string() })
    }

    /// List an owner's events with optional bounds and keyword filter,
    /// sorted by start time. Bounds are containment filters: `start` keeps
    /// events starting at or after it, `end` keeps events ending at or
    /// before it.
    pub fn list_events(&self, owner_id: &str, filter: &EventFilter) -> Result<Vec<Event>> {
        let mut events = self.store.all_events(owner_id)?;

        if let Some(start) = filter.start {
            events.retain(|e| e.start_time >= start);
        }
        if let Some(end) = filter.end {
            events.retain(|e| e.end_time <= end);
        }
        if let Some(keyword) = &filter.keyword {
            let needle = keyword.to_lowercase();
            events.retain(|e| {
                e.title.to_lowercase().contains(&needle)
                    || e.description
                        .as_ref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            });
        }

        Ok(events)
    }

    /// Events overlapping the day, week (Monday-based) or month containing
    /// `date`.
    pub fn events_for_view(
        &self,
        owner_id: &str,
        date: NaiveDate,
        view: CalendarView,
    ) -> Result<Vec<Event>> {
        let (start, end) = view_bounds(date, view);
        Ok(self.store.events_in_range(owner_id, start, end)?)
    }

    /// Apply a partial update to exactly one event row. Sibling instances
    /// of a recurring family are never touched.
    pub fn update_event(&mut self, id: &str, patch: &EventPatch) -> Result<Event> {
        let current = self.get_event(id)?;
        let start = patch.start_time.unwrap_or(current.start_time);
        let end = patch.end_time.unwrap_or(current.end_time);
        validate_time_range(start, end)?;

        self.store
            .apply_patch(id, patch)?
            .ok_or_else(|| CoreError::NotFound { id: id.to_string() })
    }

    /// Delete an event. With `cascade`, deleting a root removes all of its
    /// instances, and deleting an instance removes the root plus every
    /// sibling. Returns the number of events removed.
    pub fn delete_event(&mut self, id: &str, cascade: bool) -> Result<usize> {
        let event = self.get_event(id)?;

        let removed = match (&event.recurrence_rule, &event.parent_event_id) {
            (Some(_), _) if cascade => {
                let instances = self.store.delete_by_parent(id)?;
                let root = self.store.delete_event(id)?;
                instances + usize::from(root)
            }
            (_, Some(parent_id)) if cascade => {
                let instances = self.store.delete_by_parent(parent_id)?;
                let root = self.store.delete_event(parent_id)?;
                instances + usize::from(root)
            }
            _ => usize::from(self.store.delete_event(id)?),
        };

        info!(event_id = %id, removed, cascade, "deleted event");
        Ok(removed)
    }

    /// Generated instances of a recurrence root.
    pub fn instances_of(&self, parent_id: &str) -> Result<Vec<Event>> {
        Ok(self.store.events_by_parent(parent_id)?)
    }

    // === Scheduling queries ===
    //
    // Each query fetches one snapshot for its range and hands it to the
    // pure engine function, so a single result is internally consistent.

    /// Free slots of at least `duration_minutes` (config default when
    /// `None`) on `date`.
    pub fn free_slots(
        &self,
        owner_id: &str,
        date: NaiveDate,
        duration_minutes: Option<i64>,
    ) -> Result<Vec<FreeSlot>> {
        let duration =
            duration_minutes.unwrap_or(self.config.scheduling.default_slot_minutes);
        let events = self.day_snapshot(owner_id, date)?;
        Ok(find_free_slots(&events, date, duration, &self.config.workday()))
    }

    /// Conflicts among events between now and `days_ahead` days out.
    pub fn conflicts_in_days(&self, owner_id: &str, days_ahead: i64) -> Result<Vec<Conflict>> {
        let now = Utc::now();
        let events = self
            .store
            .events_in_range(owner_id, now, now + Duration::days(days_ahead))?;
        debug!(checked = events.len(), "conflict scan");
        Ok(detect_conflicts(&events))
    }

    /// Conflicts among the events of a single day.
    pub fn conflicts_on(&self, owner_id: &str, date: NaiveDate) -> Result<Vec<Conflict>> {
        let events = self.day_snapshot(owner_id, date)?;
        Ok(detect_conflicts(&events))
    }

    /// Pack `tasks` into the free time of `date` around existing events.
    pub fn plan_day(
        &self,
        owner_id: &str,
        date: NaiveDate,
        tasks: &[ScheduleTask],
    ) -> Result<DayPlan> {
        let events = self.day_snapshot(owner_id, date)?;
        let scheduler_config = SchedulerConfig {
            buffer_minutes: self.config.scheduling.buffer_minutes,
            workday: self.config.workday(),
        };
        let schedule = schedule_tasks(tasks, date, &events, &scheduler_config);
        Ok(DayPlan {
            scheduled_tasks: schedule.len(),
            total_tasks: tasks.len(),
            schedule,
        })
    }

    /// Break suggestions for `date`, with `work_duration_minutes` falling
    /// back to the configured threshold.
    pub fn breaks_for(
        &self,
        owner_id: &str,
        date: NaiveDate,
        work_duration_minutes: Option<i64>,
    ) -> Result<Vec<BreakSuggestion>> {
        let threshold =
            work_duration_minutes.unwrap_or(self.config.breaks.work_duration_minutes);
        let events = self.day_snapshot(owner_id, date)?;
        Ok(suggest_breaks(&events, date, threshold, &self.config.workday()))
    }

    /// Heuristic review of the day's schedule.
    pub fn review_day(&self, owner_id: &str, date: NaiveDate) -> Result<Vec<ScheduleSuggestion>> {
        let events = self.day_snapshot(owner_id, date)?;
        Ok(review_day(&events))
    }

    fn day_snapshot(&self, owner_id: &str, date: NaiveDate) -> Result<Vec<Event>> {
        let (start, end) = day_bounds(date);
        Ok(self.store.events_in_range(owner_id, start, end)?)
    }
}

fn validate_time_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<()> {
    if end <= start {
        return Err(ValidationError::InvalidTimeRange { start, end }.into());
    }
    Ok(())
}

fn view_bounds(date: NaiveDate, view: CalendarView) -> (DateTime<Utc>, DateTime<Utc>) {
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    match view {
        CalendarView::Day => (
            date.and_time(NaiveTime::MIN).and_utc(),
            date.and_time(end_of_day).and_utc(),
        ),
        CalendarView::Week => {
            let monday = date - Duration::days(date.weekday().num_days_from_monday() as i64);
            (
                monday.and_time(NaiveTime::MIN).and_utc(),
                (monday + Duration::days(6)).and_time(end_of_day).and_utc(),
            )
        }
        CalendarView::Month => {
            let first = date.with_day(1).unwrap_or(date);
            let next_month = if first.month() == 12 {
                first.with_year(first.year() + 1).and_then(|d| d.with_month(1))
            } else {
                first.with_month(first.month() + 1)
            }
            .unwrap_or(first);
            (
                first.and_time(NaiveTime::MIN).and_utc(),
                next_month.and_time(NaiveTime::MIN).and_utc() - Duration::seconds(1),
            )
        }
    }
}
