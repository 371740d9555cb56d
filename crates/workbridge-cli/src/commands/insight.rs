use std::path::PathBuf;

use clap::Args;
use workbridge_core::productivity_insight;
use workbridge_core::sync::SheetEntry;

use super::input::{read_json, CmdResult, EventsArg};

#[derive(Args, Debug)]
pub struct InsightArgs {
    /// Label for the period
    #[arg(long, default_value = "This Week")]
    pub period: String,
    #[command(flatten)]
    pub events: EventsArg,
    /// JSON file with an array of task-sheet rows
    #[arg(long, value_name = "FILE")]
    pub tasks: Option<PathBuf>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: InsightArgs) -> CmdResult {
    let events = args.events.load()?;
    let tasks: Vec<SheetEntry> = match &args.tasks {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };

    let insight = productivity_insight(args.period, &events, &tasks);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&insight)?);
        return Ok(());
    }

    println!("Period: {}", insight.period);
    println!("Meeting hours: {:.1}", insight.meeting_hours);
    match insight.completion_rate {
        Some(rate) => println!("Completion rate: {rate:.0}%"),
        None => println!("Completion rate: -"),
    }
    println!("Team efficiency: {}%", insight.team_efficiency);

    if !insight.bottlenecks.is_empty() {
        println!("Bottlenecks:");
        for item in &insight.bottlenecks {
            println!("  - {item}");
        }
    }
    println!("Recommendations:");
    for item in &insight.recommendations {
        println!("  - {item}");
    }
    println!("Automation opportunities:");
    for item in &insight.automation_opportunities {
        println!("  - {item}");
    }
    println!("{}", insight.predicted_improvement.description);
    Ok(())
}
