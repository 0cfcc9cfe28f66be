//! Conflict detection command.

use clap::Args;
use dayplan_core::ToolOutcome;

use super::{open_service, parse_date, DEFAULT_OWNER};

#[derive(Args)]
pub struct ConflictsArgs {
    /// Check a single date (YYYY-MM-DD) instead of the days ahead
    #[arg(long)]
    pub date: Option<String>,
    /// Number of days ahead to check from now
    #[arg(long, default_value = "7")]
    pub days: i64,
    /// Owner id
    #[arg(long, default_value = DEFAULT_OWNER)]
    pub owner: String,
}

pub fn run(args: ConflictsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let service = open_service()?;

    let result = match &args.date {
        Some(date) => service.conflicts_on(&args.owner, parse_date(date)?),
        None => service.conflicts_in_days(&args.owner, args.days),
    };

    let outcome = match result {
        Ok(conflicts) => {
            let message = if conflicts.is_empty() {
                "No conflicts found".to_string()
            } else {
                format!("Found {} scheduling conflicts", conflicts.len())
            };
            ToolOutcome::ok(conflicts, message)
        }
        Err(e) => ToolOutcome::failure(&e),
    };
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
