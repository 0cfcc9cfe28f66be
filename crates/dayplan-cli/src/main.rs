use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "dayplan-cli", version, about = "Dayplan CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Event management
    Event {
        #[command(subcommand)]
        action: commands::event::EventAction,
    },
    /// Find free time slots for a date
    Slots(commands::slots::SlotsArgs),
    /// Detect scheduling conflicts
    Conflicts(commands::conflicts::ConflictsArgs),
    /// Pack tasks into a day's free time
    Plan(commands::plan::PlanArgs),
    /// Suggest rest breaks for a date
    Breaks(commands::breaks::BreaksArgs),
    /// Review a day's schedule for improvements
    Review(commands::review::ReviewArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate for
        shell: clap_complete::Shell,
    },
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Event { action } => commands::event::run(action),
        Commands::Slots(args) => commands::slots::run(args),
        Commands::Conflicts(args) => commands::conflicts::run(args),
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Breaks(args) => commands::breaks::run(args),
        Commands::Review(args) => commands::review::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
