use chrono::Utc;
use clap::Args;
use workbridge_core::{parse_instant, Config, Extractor, KeywordExtractor, SourceChannel};

use super::input::CmdResult;

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Free text, e.g. a transcribed voice note
    pub text: String,
    /// Source channel of the text
    #[arg(long, default_value = "whatsapp")]
    pub source: SourceChannel,
    /// Reference time for relative dates (defaults to now)
    #[arg(long)]
    pub now: Option<String>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ExtractArgs) -> CmdResult {
    let config = Config::load_or_default();
    let offset = config.utc_offset();
    let now = match &args.now {
        Some(raw) => parse_instant(raw, &offset)?,
        None => Utc::now(),
    };

    let extractor = KeywordExtractor::new(offset).with_source(args.source);
    let candidate = extractor.extract(&args.text, now);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&candidate)?);
        return Ok(());
    }

    println!("Title:      {}", candidate.title);
    println!("Priority:   {}", candidate.priority);
    match candidate.due_date {
        Some(due) => println!("Due:        {}", due.with_timezone(&offset).format("%Y-%m-%d %H:%M")),
        None => println!("Due:        -"),
    }
    println!("Hours:      {}", candidate.effective_hours());
    println!("Source:     {}", candidate.source);
    println!("Confidence: {:.2}", candidate.confidence);
    Ok(())
}
