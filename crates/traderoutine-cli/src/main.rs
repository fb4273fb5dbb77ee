use clap::{Parser, Subcommand};
use traderoutine_core::Config;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "traderoutine-cli", version, about = "TradeRoutine daily check-in CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the checklist for a day
    Today(commands::day::TodayArgs),
    /// Toggle a task option on or off
    Check(commands::day::CheckArgs),
    /// Write the closing recap note and mood
    Recap(commands::day::RecapArgs),
    /// Current check-in streak
    Streak(commands::history::StreakArgs),
    /// Month calendar of completion tiers
    Calendar(commands::history::CalendarArgs),
    /// Completion tiers for the last few days
    Recent(commands::history::RecentArgs),
    /// List modules and their task options
    Catalog {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Reminder, dark mode and weekend settings
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Delete all records and reset settings
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    logging::init(&config.logging.level);

    match cli.command {
        Commands::Today(args) => commands::day::today(args, &config),
        Commands::Check(args) => commands::day::check(args, &config),
        Commands::Recap(args) => commands::day::recap(args, &config),
        Commands::Streak(args) => commands::history::streak(args, &config),
        Commands::Calendar(args) => commands::history::calendar(args, &config),
        Commands::Recent(args) => commands::history::recent(args, &config),
        Commands::Catalog { json } => commands::catalog::run(json, &config),
        Commands::Settings { action } => commands::settings::run(action, &config),
        Commands::Config { action } => commands::config::run(action, config),
        Commands::Clear { yes } => commands::clear(yes, &config),
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
