use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "workbridge-cli", version, about = "Workbridge CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a candidate against the calendar and suggest remediations
    Analyze(commands::analyze::AnalyzeArgs),
    /// List free slots on a day
    Slots(commands::slots::SlotsArgs),
    /// Sum committed hours
    Workload(commands::workload::WorkloadArgs),
    /// Extract a candidate from free text
    Extract(commands::extract::ExtractArgs),
    /// Push accepted items to the task sheet, calendar and messaging
    Sync {
        #[command(subcommand)]
        action: commands::sync::SyncAction,
    },
    /// Summarise a period's meetings and tasks
    Insight(commands::insight::InsightArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("WORKBRIDGE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Slots(args) => commands::slots::run(args),
        Commands::Workload(args) => commands::workload::run(args),
        Commands::Extract(args) => commands::extract::run(args),
        Commands::Sync { action } => commands::sync::run(action),
        Commands::Insight(args) => commands::insight::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
