//! Task-packing command.

use clap::Args;
use dayplan_core::{ScheduleTask, ToolOutcome};

use super::{open_service, parse_date, DEFAULT_OWNER};

#[derive(Args)]
pub struct PlanArgs {
    /// Date to plan in YYYY-MM-DD format
    pub date: String,
    /// Tasks as JSON, e.g. '[{"name":"report","duration_minutes":60,"priority":"high"}]'
    pub tasks: String,
    /// Owner id
    #[arg(long, default_value = DEFAULT_OWNER)]
    pub owner: String,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let service = open_service()?;
    let date = parse_date(&args.date)?;
    let tasks: Vec<ScheduleTask> = serde_json::from_str(&args.tasks)?;

    let outcome = match service.plan_day(&args.owner, date, &tasks) {
        Ok(plan) => {
            let message = format!(
                "Scheduled {} out of {} tasks",
                plan.scheduled_tasks, plan.total_tasks
            );
            ToolOutcome::ok(plan, message)
        }
        Err(e) => ToolOutcome::failure(&e),
    };
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
