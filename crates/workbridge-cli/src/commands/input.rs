//! Argument groups and file loading shared by several commands.

use std::error::Error;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, Utc};
use clap::Args;
use serde::de::DeserializeOwned;
use workbridge_core::calendar::validate_events;
use workbridge_core::{
    parse_instant, CandidateWorkItem, Extractor, KeywordExtractor, Priority, ScheduledEvent,
    SourceChannel,
};

pub type CmdResult = Result<(), Box<dyn Error>>;

/// Read and deserialize a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let value = serde_json::from_str(&raw)
        .map_err(|e| format!("invalid JSON in {}: {e}", path.display()))?;
    Ok(value)
}

/// Events file option.
#[derive(Args, Debug)]
pub struct EventsArg {
    /// JSON file with an array of events (id, title, startTime, endTime)
    #[arg(long, value_name = "FILE")]
    pub events: Option<PathBuf>,
}

impl EventsArg {
    /// Load and validate events; no file means an empty calendar.
    pub fn load(&self) -> Result<Vec<ScheduledEvent>, Box<dyn Error>> {
        let Some(path) = &self.events else {
            return Ok(Vec::new());
        };
        let events: Vec<ScheduledEvent> = read_json(path)?;
        validate_events(&events)?;
        tracing::debug!(count = events.len(), path = %path.display(), "loaded events");
        Ok(events)
    }
}

/// Flags describing a candidate work item.
#[derive(Args, Debug)]
pub struct CandidateArgs {
    /// Candidate title, or free text with --from-text
    pub title: String,
    /// Run the keyword extractor over the title text first
    #[arg(long)]
    pub from_text: bool,
    /// Longer description
    #[arg(long)]
    pub description: Option<String>,
    /// Due date (RFC 3339, YYYY-MM-DDTHH:MM or YYYY-MM-DD, local time)
    #[arg(long)]
    pub due: Option<String>,
    /// Estimated hours
    #[arg(long)]
    pub hours: Option<f64>,
    /// Priority: high, medium or low
    #[arg(long)]
    pub priority: Option<Priority>,
    /// Source channel: whatsapp, slack, email or manual
    #[arg(long)]
    pub source: Option<SourceChannel>,
}

impl CandidateArgs {
    /// Build the candidate. Explicit flags override extracted values.
    pub fn to_candidate(
        &self,
        offset: &FixedOffset,
        now: DateTime<Utc>,
    ) -> Result<CandidateWorkItem, Box<dyn Error>> {
        let mut candidate = if self.from_text {
            let mut extractor = KeywordExtractor::new(*offset);
            if let Some(source) = self.source {
                extractor = extractor.with_source(source);
            }
            extractor.extract(&self.title, now)
        } else {
            CandidateWorkItem::new(self.title.clone()).with_source(self.source.unwrap_or_default())
        };

        if let Some(description) = &self.description {
            candidate = candidate.with_description(description.clone());
        }
        if let Some(due) = &self.due {
            candidate = candidate.with_due_date(parse_instant(due, offset)?);
        }
        if let Some(hours) = self.hours {
            candidate.estimated_hours = Some(hours);
        }
        if let Some(priority) = self.priority {
            candidate = candidate.with_priority(priority);
        }
        candidate.validate()?;
        Ok(candidate)
    }
}
