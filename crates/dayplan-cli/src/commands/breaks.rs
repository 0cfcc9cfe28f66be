//! Break-suggestion command.

use clap::Args;
use dayplan_core::ToolOutcome;

use super::{open_service, parse_date, DEFAULT_OWNER};

#[derive(Args)]
pub struct BreaksArgs {
    /// Date to check in YYYY-MM-DD format
    pub date: String,
    /// Maximum work duration before a break, in minutes (default from config)
    #[arg(long)]
    pub work_duration: Option<i64>,
    /// Owner id
    #[arg(long, default_value = DEFAULT_OWNER)]
    pub owner: String,
}

pub fn run(args: BreaksArgs) -> Result<(), Box<dyn std::error::Error>> {
    let service = open_service()?;
    let date = parse_date(&args.date)?;

    let outcome = match service.breaks_for(&args.owner, date, args.work_duration) {
        Ok(breaks) => {
            let message = format!("Suggested {} break times", breaks.len());
            ToolOutcome::ok(breaks, message)
        }
        Err(e) => ToolOutcome::failure(&e),
    };
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
