//! Committed calendar events.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::window::{duration_hours, slot_overlaps};
use crate::error::ValidationError;

/// An immutable block of committed time supplied by a calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledEvent {
    pub id: String,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub attendees: BTreeSet<String>,
}

impl ScheduledEvent {
    /// Create a new event. Fails unless `start_time < end_time`.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let event = Self {
            id: id.into(),
            title: title.into(),
            start_time,
            end_time,
            attendees: BTreeSet::new(),
        };
        event.validate()?;
        Ok(event)
    }

    pub fn with_attendees<I, S>(mut self, attendees: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attendees = attendees.into_iter().map(Into::into).collect();
        self
    }

    /// Check the `start < end` invariant, e.g. after deserializing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.start_time >= self.end_time {
            return Err(ValidationError::InvalidTimeRange {
                start: self.start_time,
                end: self.end_time,
            });
        }
        Ok(())
    }

    /// Effective duration in hours.
    pub fn duration_hours(&self) -> f64 {
        duration_hours(self.start_time, self.end_time)
    }

    /// Whether `[start, end)` collides with this event under the three-way test.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        slot_overlaps(start, end, self.start_time, self.end_time)
    }
}

/// Validate a whole batch, reporting the first offending event.
pub fn validate_events(events: &[ScheduledEvent]) -> Result<(), ValidationError> {
    events.iter().try_for_each(ScheduledEvent::validate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn rejects_inverted_range() {
        let start = Utc.with_ymd_and_hms(2025, 1, 10, 10, 0, 0).unwrap();
        assert!(ScheduledEvent::new("e", "Bad", start, start).is_err());
        assert!(ScheduledEvent::new("e", "Bad", start, start - Duration::minutes(5)).is_err());
    }

    #[test]
    fn deserializes_camel_case_with_optional_attendees() {
        let json = r#"{
            "id": "cal-1",
            "title": "Team Standup",
            "startTime": "2025-01-10T09:00:00Z",
            "endTime": "2025-01-10T09:30:00Z"
        }"#;
        let event: ScheduledEvent = serde_json::from_str(json).unwrap();
        assert!(event.attendees.is_empty());
        assert_eq!(event.duration_hours(), 0.5);
    }

    #[test]
    fn validate_events_finds_bad_entry() {
        let start = Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap();
        let good = ScheduledEvent::new("a", "A", start, start + Duration::hours(1)).unwrap();
        let mut bad = good.clone();
        bad.end_time = bad.start_time;
        assert!(validate_events(&[good.clone()]).is_ok());
        assert!(validate_events(&[good, bad]).is_err());
    }
}
