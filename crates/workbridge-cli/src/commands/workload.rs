use clap::Args;
use workbridge_core::compute_workload;

use super::input::{CmdResult, EventsArg};

#[derive(Args, Debug)]
pub struct WorkloadArgs {
    /// Hours the candidate would add
    #[arg(long, default_value = "0")]
    pub hours: f64,
    #[command(flatten)]
    pub events: EventsArg,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: WorkloadArgs) -> CmdResult {
    if args.hours < 0.0 {
        return Err("--hours must not be negative".into());
    }
    let events = args.events.load()?;
    let snapshot = compute_workload(&events, args.hours);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("Events:  {}", events.len());
        println!("Current: {:.2}h", snapshot.current);
        println!("After:   {:.2}h", snapshot.after);
    }
    Ok(())
}
