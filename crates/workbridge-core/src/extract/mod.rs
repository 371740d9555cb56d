//! Turning free-form input into candidate work items.
//!
//! Real language understanding lives outside this crate behind the
//! [`Extractor`] trait. [`KeywordExtractor`] is the built-in rule-based
//! fallback used by the CLI and tests.

mod bot;

pub use bot::{BotTask, Difficulty, BOT_DEFAULT_HOUR};

use chrono::{DateTime, Datelike, Duration, FixedOffset, Utc};

use crate::calendar::DayWindow;
use crate::task::{CandidateWorkItem, Priority, SourceChannel, DEFAULT_ESTIMATED_HOURS};

/// Extracts a candidate from transcribed text.
pub trait Extractor: Send + Sync {
    /// Identifier for logs (e.g. "keyword").
    fn name(&self) -> &str;

    /// Build a candidate from `text`, resolving relative dates against `now`.
    fn extract(&self, text: &str, now: DateTime<Utc>) -> CandidateWorkItem;
}

/// Rule-based extractor keyed on a handful of English words.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    offset: FixedOffset,
    source: SourceChannel,
}

impl KeywordExtractor {
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            offset,
            source: SourceChannel::Whatsapp,
        }
    }

    pub fn with_source(mut self, source: SourceChannel) -> Self {
        self.source = source;
        self
    }

    fn detect_priority(lower: &str) -> Priority {
        if ["urgent", "asap", "critical"].iter().any(|w| lower.contains(w)) {
            Priority::High
        } else if ["soon", "important"].iter().any(|w| lower.contains(w)) {
            Priority::Medium
        } else {
            Priority::Low
        }
    }

    fn detect_due_date(&self, lower: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if lower.contains("friday") {
            // Friday of the current Sunday-based week; on Saturday that is yesterday.
            let today = now.with_timezone(&self.offset).date_naive();
            let offset_days = 5 - today.weekday().num_days_from_sunday() as i64;
            let friday = today + Duration::days(offset_days);
            Some(DayWindow::for_date(friday, &self.offset).start)
        } else if lower.contains("tomorrow") {
            Some(now + Duration::days(1))
        } else if lower.contains("today") {
            Some(now)
        } else if lower.contains("next week") {
            Some(now + Duration::days(7))
        } else {
            None
        }
    }

    /// First `<digits><optional whitespace>hour` in the text.
    fn detect_hours(lower: &str) -> Option<f64> {
        for (index, _) in lower.match_indices("hour") {
            let before = lower[..index].trim_end();
            let digits: String = before
                .chars()
                .rev()
                .take_while(|c| c.is_ascii_digit())
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            if digits.is_empty() {
                continue;
            }
            if let Ok(hours) = digits.parse::<u32>() {
                if hours > 0 {
                    return Some(hours as f64);
                }
            }
        }
        None
    }

    fn title_from(text: &str) -> String {
        let head = text.split_whitespace().take(5).collect::<Vec<_>>().join(" ");
        let mut chars = head.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    fn confidence(text: &str) -> f64 {
        let bonus: f64 = if text.split_whitespace().count() > 20 { 0.10 } else { 0.0 };
        (0.85 + bonus).min(0.99)
    }
}

impl Extractor for KeywordExtractor {
    fn name(&self) -> &str {
        "keyword"
    }

    fn extract(&self, text: &str, now: DateTime<Utc>) -> CandidateWorkItem {
        let lower = text.to_lowercase();

        let mut item = CandidateWorkItem::new(Self::title_from(text))
            .with_description(text)
            .with_priority(Self::detect_priority(&lower))
            .with_source(self.source)
            .with_estimated_hours(Self::detect_hours(&lower).unwrap_or(DEFAULT_ESTIMATED_HOURS))
            .with_confidence(Self::confidence(text));
        item.due_date = self.detect_due_date(&lower, now);

        tracing::debug!(
            extractor = self.name(),
            title = %item.title,
            priority = %item.priority,
            due = ?item.due_date,
            "extracted candidate"
        );
        item
    }
}
