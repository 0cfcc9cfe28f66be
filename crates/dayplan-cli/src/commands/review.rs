//! Schedule-review command.

use clap::Args;
use dayplan_core::ToolOutcome;

use super::{open_service, parse_date, DEFAULT_OWNER};

#[derive(Args)]
pub struct ReviewArgs {
    /// Date to review in YYYY-MM-DD format
    pub date: String,
    /// Owner id
    #[arg(long, default_value = DEFAULT_OWNER)]
    pub owner: String,
}

pub fn run(args: ReviewArgs) -> Result<(), Box<dyn std::error::Error>> {
    let service = open_service()?;
    let date = parse_date(&args.date)?;

    let outcome = match service.review_day(&args.owner, date) {
        Ok(suggestions) => {
            let message = format!("Found {} optimization suggestions", suggestions.len());
            ToolOutcome::ok(suggestions, message)
        }
        Err(e) => ToolOutcome::failure(&e),
    };
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
