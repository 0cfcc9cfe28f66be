//! Free-slot query command.

use clap::Args;
use dayplan_core::ToolOutcome;

use super::{open_service, parse_date, DEFAULT_OWNER};

#[derive(Args)]
pub struct SlotsArgs {
    /// Date to check in YYYY-MM-DD format
    pub date: String,
    /// Required duration in minutes (default from config)
    #[arg(long)]
    pub duration: Option<i64>,
    /// Owner id
    #[arg(long, default_value = DEFAULT_OWNER)]
    pub owner: String,
}

pub fn run(args: SlotsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let service = open_service()?;
    let date = parse_date(&args.date)?;

    let outcome = match service.free_slots(&args.owner, date, args.duration) {
        Ok(slots) => {
            let message = format!("Found {} available time slots", slots.len());
            ToolOutcome::ok(slots, message)
        }
        Err(e) => ToolOutcome::failure(&e),
    };
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
