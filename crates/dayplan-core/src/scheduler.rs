//! Greedy packing of tasks into the free time of a day.
//!
//! Tasks are placed in priority order along a cursor that starts at the
//! working window's opening hour. Existing events are obstacles: a task
//! that would collide jumps past the event plus a fixed buffer and retries.
//! Once a task would run past the end of the working window, scheduling
//! stops and the remaining tasks are dropped without error.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::slots::{day_bounds, hhmm, Workday};

/// Task priority; lower rank schedules first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl TaskPriority {
    fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

/// A task to place on the timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleTask {
    pub name: String,
    pub duration_minutes: i64,
    #[serde(default)]
    pub priority: TaskPriority,
}

/// A task committed to a concrete time slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledSlot {
    pub task: String,
    #[serde(serialize_with = "hhmm::serialize")]
    pub start_time: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "hhmm::serialize")]
    pub end_time: chrono::DateTime<chrono::Utc>,
    pub duration_minutes: i64,
    pub priority: TaskPriority,
}

/// Scheduler configuration.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Gap inserted after every committed slot and after every existing
    /// event the cursor jumps past (minutes)
    pub buffer_minutes: i64,
    /// Working window the cursor sweeps
    pub workday: Workday,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            buffer_minutes: 10,
            workday: Workday::default(),
        }
    }
}

/// Place `tasks` into the free time of `date` around `existing` events.
///
/// Sort order is priority (high before medium before low), stable for
/// ties. Tasks that no longer fit before the end of the working window are
/// silently dropped; the caller can compare input and output lengths to
/// see how many were placed.
pub fn schedule_tasks(
    tasks: &[ScheduleTask],
    date: NaiveDate,
    existing: &[Event],
    config: &SchedulerConfig,
) -> Vec<ScheduledSlot> {
    let mut ordered: Vec<&ScheduleTask> = tasks.iter().collect();
    ordered.sort_by_key(|t| t.priority.rank());

    let (day_start, day_end) = day_bounds(date);
    let mut events: Vec<&Event> = existing
        .iter()
        .filter(|e| e.overlaps(day_start, day_end))
        .collect();
    events.sort_by_key(|e| e.start_time);

    let buffer = Duration::minutes(config.buffer_minutes);
    let work_end = config.workday.end_on(date);
    let mut cursor = config.workday.start_on(date);
    let mut event_idx = 0;
    let mut placed = Vec::new();

    for task in ordered {
        let duration = Duration::minutes(task.duration_minutes);

        // Events that ended before the cursor are no longer obstacles.
        while event_idx < events.len() && events[event_idx].end_time <= cursor {
            event_idx += 1;
        }

        // Jump past each event the task would collide with, buffer included,
        // and retry the same task against whatever comes next.
        while event_idx < events.len() && cursor + duration > events[event_idx].start_time {
            cursor = events[event_idx].end_time + buffer;
            event_idx += 1;
            while event_idx < events.len() && events[event_idx].end_time <= cursor {
                event_idx += 1;
            }
        }

        let end = cursor + duration;
        if end > work_end {
            break;
        }

        placed.push(ScheduledSlot {
            task: task.name.clone(),
            start_time: cursor,
            end_time: end,
            duration_minutes: task.duration_minutes,
            priority: task.priority,
        });
        cursor = end + buffer;
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventDraft;

    fn task(name: &str, minutes: i64, priority: TaskPriority) -> ScheduleTask {
        ScheduleTask {
            name: name.to_string(),
            duration_minutes: minutes,
            priority,
        }
    }

    fn event(start: &str, end: &str) -> Event {
        EventDraft {
            title: "Existing".to_string(),
            start_time: start.parse().unwrap(),
            end_time: end.parse().unwrap(),
            description: None,
            location: None,
            recurrence_rule: None,
        }
        .into_event("user-1")
    }

    fn date() -> NaiveDate {
        "2026-03-02".parse().unwrap()
    }

    fn hhmm_of(slot: &ScheduledSlot) -> (String, String) {
        (
            slot.start_time.format("%H:%M").to_string(),
            slot.end_time.format("%H:%M").to_string(),
        )
    }

    #[test]
    fn buffers_around_prior_task_and_existing_event() {
        let tasks = vec![
            task("deep work", 60, TaskPriority::High),
            task("email", 30, TaskPriority::Low),
        ];
        let existing = vec![event("2026-03-02T10:00:00Z", "2026-03-02T10:30:00Z")];

        let placed = schedule_tasks(&tasks, date(), &existing, &SchedulerConfig::default());

        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].task, "deep work");
        assert_eq!(hhmm_of(&placed[0]), ("09:00".to_string(), "10:00".to_string()));
        assert_eq!(placed[1].task, "email");
        assert_eq!(hhmm_of(&placed[1]), ("10:40".to_string(), "11:10".to_string()));
    }

    #[test]
    fn priority_order_beats_input_order() {
        let tasks = vec![
            task("later", 30, TaskPriority::Low),
            task("first", 30, TaskPriority::High),
            task("middle", 30, TaskPriority::Medium),
        ];

        let placed = schedule_tasks(&tasks, date(), &[], &SchedulerConfig::default());
        let names: Vec<&str> = placed.iter().map(|s| s.task.as_str()).collect();
        assert_eq!(names, vec!["first", "middle", "later"]);
    }

    #[test]
    fn equal_priority_keeps_input_order() {
        let tasks = vec![
            task("a", 30, TaskPriority::Medium),
            task("b", 30, TaskPriority::Medium),
            task("c", 30, TaskPriority::Medium),
        ];

        let placed = schedule_tasks(&tasks, date(), &[], &SchedulerConfig::default());
        let names: Vec<&str> = placed.iter().map(|s| s.task.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn overflowing_tasks_are_silently_dropped() {
        // 8h window, 10 min buffer: the third 4-hour task cannot fit.
        let tasks = vec![
            task("one", 240, TaskPriority::High),
            task("two", 180, TaskPriority::Medium),
            task("three", 240, TaskPriority::Low),
        ];

        let placed = schedule_tasks(&tasks, date(), &[], &SchedulerConfig::default());
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[1].task, "two");
    }

    #[test]
    fn consecutive_events_are_all_jumped() {
        let tasks = vec![task("focus", 60, TaskPriority::High)];
        let existing = vec![
            event("2026-03-02T09:00:00Z", "2026-03-02T10:00:00Z"),
            event("2026-03-02T10:05:00Z", "2026-03-02T11:00:00Z"),
        ];

        let placed = schedule_tasks(&tasks, date(), &existing, &SchedulerConfig::default());
        assert_eq!(placed.len(), 1);
        assert_eq!(hhmm_of(&placed[0]), ("11:10".to_string(), "12:10".to_string()));
    }
}
