//! # Dayplan Core Library
//!
//! This library provides the scheduling engine behind the Dayplan calendar
//! backend. The HTTP/chat layers above it are thin: they parse requests,
//! call into this crate, and render the structured results it returns.
//!
//! ## Architecture
//!
//! - **Events**: The calendar data model, including recurrence rules as
//!   exhaustively-cased tagged unions
//! - **Recurrence**: One-shot expansion of a recurring root event into
//!   stored instances, bounded by an end date or a 90-day horizon
//! - **Engine queries**: Conflict detection, free-slot discovery, task
//!   packing and break suggestion -- pure functions over event snapshots
//! - **Storage**: An `EventStore` contract with in-memory and SQLite
//!   implementations, plus TOML-based configuration
//!
//! ## Key Components
//!
//! - [`CalendarService`]: Event lifecycle and scheduling queries over a store
//! - [`expand`]: Recurrence-rule expansion
//! - [`EventDb`]: SQLite event persistence
//! - [`ToolOutcome`]: Structured results for the tool-calling boundary

pub mod advisor;
pub mod breaks;
pub mod config;
pub mod conflict;
pub mod error;
pub mod event;
pub mod outcome;
pub mod recurrence;
pub mod scheduler;
pub mod service;
pub mod slots;
pub mod store;

pub use advisor::{review_day, ScheduleSuggestion, Severity, SuggestionKind};
pub use breaks::{suggest_breaks, BreakSuggestion};
pub use config::Config;
pub use conflict::{detect_conflicts, detect_conflicts_exhaustive, Conflict};
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use event::{DayOfWeek, Event, EventDraft, EventPatch, Frequency, RecurrenceRule};
pub use outcome::{OutcomeError, ToolOutcome};
pub use recurrence::expand;
pub use scheduler::{schedule_tasks, ScheduleTask, ScheduledSlot, SchedulerConfig, TaskPriority};
pub use service::{CalendarService, CalendarView, CreatedEvent, DayPlan, EventFilter};
pub use slots::{find_free_slots, FreeSlot, Workday};
pub use store::{EventDb, EventStore, MemoryStore};
