use clap::Args;
use workbridge_core::calendar::{clock_label, DayWindow};
use workbridge_core::{parse_instant, AvailabilityScanner, AvailabilitySlot, Config};

use super::input::{CmdResult, EventsArg};

#[derive(Args, Debug)]
pub struct SlotsArgs {
    /// Day to scan (YYYY-MM-DD or any accepted date/time)
    #[arg(long)]
    pub date: String,
    /// Slot length in minutes
    #[arg(long, default_value = "60")]
    pub minutes: i64,
    #[command(flatten)]
    pub events: EventsArg,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: SlotsArgs) -> CmdResult {
    let config = Config::load_or_default();
    let offset = config.utc_offset();
    let events = args.events.load()?;
    let target = parse_instant(&args.date, &offset)?;

    let scanner = AvailabilityScanner::new(offset).with_window(config.scan_window());
    let slots: Vec<AvailabilitySlot> = scanner.scan(&events, target, args.minutes).collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&slots)?);
        return Ok(());
    }

    let day = DayWindow::containing(target, &offset).label(&offset);
    if slots.is_empty() {
        println!("No free {}-minute slots on {day}", args.minutes);
        return Ok(());
    }
    println!("Free {}-minute slots on {day}:", args.minutes);
    for slot in &slots {
        println!(
            "  {} - {}  {}",
            clock_label(slot.start_time, &offset),
            clock_label(slot.end_time, &offset),
            slot.availability.as_str()
        );
    }
    Ok(())
}
