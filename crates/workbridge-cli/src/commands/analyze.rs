use chrono::{FixedOffset, Utc};
use clap::Args;
use workbridge_core::calendar::clock_label;
use workbridge_core::{AnalysisResult, Analyzer, Config};

use super::input::{CandidateArgs, CmdResult, EventsArg};

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub candidate: CandidateArgs,
    #[command(flatten)]
    pub events: EventsArg,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: AnalyzeArgs) -> CmdResult {
    let config = Config::load_or_default();
    let analyzer = Analyzer::from_config(&config);
    let offset = analyzer.offset();

    let events = args.events.load()?;
    let candidate = args.candidate.to_candidate(&offset, Utc::now())?;
    let result = analyzer.analyze(&candidate, &events);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result, &offset);
    }
    Ok(())
}

pub fn print_result(result: &AnalysisResult, offset: &FixedOffset) {
    let candidate = &result.candidate;
    println!(
        "Candidate: {} (priority {}, {}h)",
        candidate.title,
        candidate.priority,
        candidate.effective_hours()
    );

    match result.conflict.event() {
        Some(event) => {
            let risk = result.conflict.risk.map(|r| r.as_str()).unwrap_or("unknown");
            println!(
                "Conflict: \"{}\" on {} (risk {risk})",
                event.title,
                result.conflict.day_label.as_deref().unwrap_or("?")
            );
            if let Some(note) = &result.conflict.note {
                println!("  {note}");
            }
        }
        None => println!("Conflict: none"),
    }

    println!(
        "Workload: {:.1}h -> {:.1}h",
        result.workload_impact.current, result.workload_impact.after
    );

    if !result.available_slots.is_empty() {
        println!("Free slots: {}", result.available_slots.len());
        for slot in result.available_slots.iter().take(5) {
            println!(
                "  {} - {} ({})",
                clock_label(slot.start_time, offset),
                clock_label(slot.end_time, offset),
                slot.availability.as_str()
            );
        }
    }

    println!("Suggestions:");
    for suggestion in &result.suggestions {
        let marker = if suggestion.is_recommended() { " *" } else { "" };
        println!(
            "  {}. [{}] {} (impact {}, +{}%){marker}",
            suggestion.rank,
            suggestion.kind(),
            suggestion.title,
            suggestion.impact,
            suggestion.efficiency_gain.unwrap_or(0)
        );
        println!("     {}", suggestion.description);
    }
}
