//! Structured task intake from a chat bot.
//!
//! The bot already did the parsing; it sends a title, a difficulty, a due
//! instant and an hour estimate.

use chrono::{DateTime, FixedOffset, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::DayWindow;
use crate::error::ValidationError;
use crate::task::{CandidateWorkItem, Priority, SourceChannel};

/// Local hour used for the calendar block when the bot sends a bare date.
pub const BOT_DEFAULT_HOUR: u32 = 18;

/// Difficulty label used by the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl From<Difficulty> for Priority {
    fn from(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Priority::Low,
            Difficulty::Medium => Priority::Medium,
            Difficulty::Hard => Priority::High,
        }
    }
}

/// A task as delivered by the bot webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotTask {
    pub title: String,
    #[serde(rename = "priority")]
    pub difficulty: Difficulty,
    pub due_date: DateTime<Utc>,
    pub hours: f64,
    #[serde(default)]
    pub source: Option<SourceChannel>,
}

impl BotTask {
    /// Convert into a candidate for analysis.
    pub fn to_candidate(&self) -> CandidateWorkItem {
        CandidateWorkItem::new(self.title.clone())
            .with_description(format!(
                "Task from bot - difficulty: {:?}, estimated hours: {}",
                self.difficulty, self.hours
            ))
            .with_due_date(self.due_date)
            .with_estimated_hours(self.hours)
            .with_priority(self.difficulty.into())
            .with_source(self.source.unwrap_or(SourceChannel::Whatsapp))
    }

    /// Reject estimates the candidate builder would otherwise clamp away.
    pub fn validate(&self) -> Result<(), ValidationError> {
        CandidateWorkItem {
            estimated_hours: Some(self.hours),
            ..self.to_candidate()
        }
        .validate()
    }

    /// Start of the calendar block: the due hour on the hour, or
    /// [`BOT_DEFAULT_HOUR`] when the due instant sits at local midnight hour.
    pub fn calendar_start(&self, offset: &FixedOffset) -> DateTime<Utc> {
        let hour = match self.due_date.with_timezone(offset).hour() {
            0 => BOT_DEFAULT_HOUR,
            h => h,
        };
        DayWindow::containing(self.due_date, offset).at(hour, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn deserializes_bot_payload() {
        let json = r#"{"title":"Submit assignment","priority":"hard","dueDate":"2025-01-10T00:00:00Z","hours":2}"#;
        let task: BotTask = serde_json::from_str(json).unwrap();
        let candidate = task.to_candidate();

        assert_eq!(candidate.priority, Priority::High);
        assert_eq!(candidate.estimated_hours, Some(2.0));
        assert_eq!(candidate.source, SourceChannel::Whatsapp);
    }

    #[test]
    fn negative_or_infinite_hours_are_rejected() {
        let parse = |hours: &str| {
            let json = format!(r#"{{"title":"t","priority":"easy","dueDate":"2025-01-10T00:00:00Z","hours":{hours}}}"#);
            serde_json::from_str::<BotTask>(&json).unwrap()
        };
        assert!(parse("2").validate().is_ok());
        assert!(parse("-1").validate().is_err());

        let mut endless = parse("1");
        endless.hours = f64::INFINITY;
        assert!(endless.validate().is_err());
    }

    #[test]
    fn bare_date_lands_at_default_hour() {
        let task = BotTask {
            title: "t".into(),
            difficulty: Difficulty::Easy,
            due_date: Utc.with_ymd_and_hms(2025, 1, 10, 0, 45, 0).unwrap(),
            hours: 1.0,
            source: None,
        };
        assert_eq!(
            task.calendar_start(&utc()),
            Utc.with_ymd_and_hms(2025, 1, 10, 18, 0, 0).unwrap()
        );
    }

    #[test]
    fn explicit_hour_is_truncated_to_the_hour() {
        let task = BotTask {
            title: "t".into(),
            difficulty: Difficulty::Medium,
            due_date: Utc.with_ymd_and_hms(2025, 1, 10, 15, 20, 0).unwrap(),
            hours: 1.0,
            source: Some(SourceChannel::Slack),
        };
        assert_eq!(
            task.calendar_start(&utc()),
            Utc.with_ymd_and_hms(2025, 1, 10, 15, 0, 0).unwrap()
        );
        assert_eq!(task.to_candidate().priority, Priority::Medium);
        assert_eq!(task.to_candidate().source, SourceChannel::Slack);
    }
}
