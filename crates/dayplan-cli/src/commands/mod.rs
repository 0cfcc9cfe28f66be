pub mod breaks;
pub mod config;
pub mod conflicts;
pub mod event;
pub mod plan;
pub mod review;
pub mod slots;

use chrono::NaiveDate;
use dayplan_core::{CalendarService, EventDb};

/// Owner id used when the caller does not pass one; the CLI is a
/// single-user stand-in for the API layer.
pub const DEFAULT_OWNER: &str = "local";

/// Open the service over the on-disk event database.
pub fn open_service() -> Result<CalendarService<EventDb>, Box<dyn std::error::Error>> {
    let db = EventDb::open()?;
    let config = dayplan_core::Config::load_or_default();
    Ok(CalendarService::with_config(db, config))
}

/// Parse a YYYY-MM-DD argument.
pub fn parse_date(raw: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    Ok(raw.parse::<NaiveDate>()?)
}
