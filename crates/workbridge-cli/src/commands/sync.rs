//! Sync commands for CLI.
//!
//! Runs against in-memory collaborators seeded from the events file, so the
//! output shows what a real sync would create.

use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;
use workbridge_core::sync::{MemoryCalendar, MemoryNotifier, MemorySheet};
use workbridge_core::{Analyzer, BotTask, Config, SyncOrchestrator, SyncReport};

use super::analyze::print_result;
use super::input::{read_json, CandidateArgs, CmdResult, EventsArg};

#[derive(Subcommand, Debug)]
pub enum SyncAction {
    /// Analyze an item and sync the chosen suggestion
    Item {
        #[command(flatten)]
        candidate: CandidateArgs,
        #[command(flatten)]
        events: EventsArg,
        /// Rank of the suggestion to act on (default: the recommended one)
        #[arg(long)]
        rank: Option<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Sync a task delivered by the chat bot
    Bot {
        /// JSON file with the bot payload (title, priority, dueDate, hours)
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: SyncAction) -> CmdResult {
    let config = Config::load_or_default();
    let sheet = MemorySheet::new();
    let notifier = MemoryNotifier::new();

    match action {
        SyncAction::Item {
            candidate,
            events,
            rank,
            json,
        } => {
            let analyzer = Analyzer::from_config(&config);
            let offset = analyzer.offset();
            let now = Utc::now();

            let events = events.load()?;
            let candidate = candidate.to_candidate(&offset, now)?;
            let result = analyzer.analyze(&candidate, &events);

            let selected = match rank {
                Some(rank) => result
                    .suggestion_by_rank(rank)
                    .ok_or_else(|| format!("no suggestion with rank {rank}"))?,
                None => &result.recommended,
            };

            let calendar = MemoryCalendar::with_events(events);
            let sync = SyncOrchestrator::new(&sheet, &calendar, &notifier, config.sync.clone());
            let report = sync.execute(&candidate, selected, now);

            if json {
                let out = serde_json::json!({
                    "analysis": result,
                    "selected": selected,
                    "report": report,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print_result(&result, &offset);
                println!();
                println!("Acting on #{}: {}", selected.rank, selected.title);
                print_report(&report);
            }
        }
        SyncAction::Bot { file, json } => {
            let bot_task: BotTask = read_json(&file)?;
            bot_task.validate()?;
            let calendar = MemoryCalendar::new();
            let sync = SyncOrchestrator::new(&sheet, &calendar, &notifier, config.sync.clone());
            let report = sync.execute_bot_task(&bot_task, &config.utc_offset());

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
    }
    Ok(())
}

fn print_report(report: &SyncReport) {
    for line in &report.notifications {
        println!("  {line}");
    }
    let status = if report.success { "ok" } else { "incomplete" };
    println!(
        "Sync {status}: {} system(s) updated, {} failed",
        report.synced_systems.len(),
        report.failures.len()
    );
}
