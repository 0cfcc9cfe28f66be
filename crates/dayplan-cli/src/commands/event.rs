//! Event CRUD commands.

use clap::Subcommand;
use dayplan_core::{CalendarView, EventDraft, EventFilter, EventPatch, RecurrenceRule};

use super::{open_service, parse_date, DEFAULT_OWNER};

#[derive(Subcommand)]
pub enum EventAction {
    /// Create an event, expanding a recurrence rule if one is given
    Add {
        /// Event title
        title: String,
        /// Start time, ISO 8601 (e.g. 2026-03-02T09:00:00Z)
        start: String,
        /// End time, ISO 8601
        end: String,
        /// Event description
        #[arg(long)]
        description: Option<String>,
        /// Event location
        #[arg(long)]
        location: Option<String>,
        /// Recurrence rule as JSON, e.g. '{"type":"weekly","days":["monday"]}'
        #[arg(long)]
        recurrence: Option<String>,
        /// Owner id
        #[arg(long, default_value = DEFAULT_OWNER)]
        owner: String,
    },
    /// Show one event
    Show {
        /// Event ID
        id: String,
    },
    /// List events with optional bounds and keyword
    List {
        /// Only events starting at or after this instant (ISO 8601)
        #[arg(long)]
        start: Option<String>,
        /// Only events ending at or before this instant (ISO 8601)
        #[arg(long)]
        end: Option<String>,
        /// Case-insensitive search over title and description
        #[arg(long)]
        keyword: Option<String>,
        /// Owner id
        #[arg(long, default_value = DEFAULT_OWNER)]
        owner: String,
    },
    /// List events for a day, week or month view
    View {
        /// Date in YYYY-MM-DD format
        date: String,
        /// View type: day, week, or month
        #[arg(long, default_value = "day")]
        view: String,
        /// Owner id
        #[arg(long, default_value = DEFAULT_OWNER)]
        owner: String,
    },
    /// Update fields of one event
    Update {
        /// Event ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New start time, ISO 8601
        #[arg(long)]
        start: Option<String>,
        /// New end time, ISO 8601
        #[arg(long)]
        end: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New location
        #[arg(long)]
        location: Option<String>,
    },
    /// Delete an event (cascades through its recurring family by default)
    Rm {
        /// Event ID
        id: String,
        /// Delete only this event, leaving the rest of the family
        #[arg(long)]
        single: bool,
    },
    /// List the generated instances of a recurrence root
    Instances {
        /// Root event ID
        id: String,
    },
}

pub fn run(action: EventAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut service = open_service()?;

    match action {
        EventAction::Add {
            title,
            start,
            end,
            description,
            location,
            recurrence,
            owner,
        } => {
            let recurrence_rule: Option<RecurrenceRule> = match recurrence {
                Some(json) => Some(serde_json::from_str(&json)?),
                None => None,
            };
            let draft = EventDraft {
                title,
                start_time: start.parse()?,
                end_time: end.parse()?,
                description,
                location,
                recurrence_rule,
            };
            let created = service.create_event(&owner, draft)?;
            println!("Event created: {}", created.event.id);
            if created.instances_created > 0 {
                println!("Generated {} recurring instances", created.instances_created);
            }
            println!("{}", serde_json::to_string_pretty(&created.event)?);
        }
        EventAction::Show { id } => {
            let event = service.get_event(&id)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        EventAction::List {
            start,
            end,
            keyword,
            owner,
        } => {
            let filter = EventFilter {
                start: start.map(|s| s.parse()).transpose()?,
                end: end.map(|s| s.parse()).transpose()?,
                keyword,
            };
            let events = service.list_events(&owner, &filter)?;
            println!("{}", serde_json::to_string_pretty(&events)?);
        }
        EventAction::View { date, view, owner } => {
            let view: CalendarView = view.parse()?;
            let events = service.events_for_view(&owner, parse_date(&date)?, view)?;
            println!("{}", serde_json::to_string_pretty(&events)?);
        }
        EventAction::Update {
            id,
            title,
            start,
            end,
            description,
            location,
        } => {
            let patch = EventPatch {
                title,
                start_time: start.map(|s| s.parse()).transpose()?,
                end_time: end.map(|s| s.parse()).transpose()?,
                description,
                location,
            };
            let updated = service.update_event(&id, &patch)?;
            println!("Event updated:");
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
        EventAction::Rm { id, single } => {
            let removed = service.delete_event(&id, !single)?;
            println!("Deleted {removed} event(s)");
        }
        EventAction::Instances { id } => {
            let instances = service.instances_of(&id)?;
            println!("{}", serde_json::to_string_pretty(&instances)?);
        }
    }
    Ok(())
}
