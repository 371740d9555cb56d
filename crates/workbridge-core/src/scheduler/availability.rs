//! Business-hours availability scanning.
//!
//! Walks the working window of one local day in fixed steps and yields every
//! slot of the requested length that is free of events. The scan is lazy and
//! the iterator is `Clone`, so callers can restart it cheaply.

use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::{saturating_add, DayWindow, ScheduledEvent};

/// Longest slot the scanner will look for.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Day-level crowding rating attached to every slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    High,
    Medium,
    Low,
}

impl Availability {
    /// Rate a day by how many events start on it: more than 3 is low,
    /// 2-3 is medium, otherwise high.
    pub fn from_day_load(events_on_day: usize) -> Self {
        if events_on_day > 3 {
            Self::Low
        } else if events_on_day > 1 {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// An open interval inside the scanned day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub availability: Availability,
}

impl AvailabilitySlot {
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

/// Working hours walked by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanWindow {
    pub start_hour: u32,
    pub end_hour: u32,
    pub step_minutes: i64,
}

impl Default for ScanWindow {
    fn default() -> Self {
        Self {
            start_hour: 8,
            end_hour: 18,
            step_minutes: 30,
        }
    }
}

/// Finds free slots on a target day.
#[derive(Debug, Clone)]
pub struct AvailabilityScanner {
    window: ScanWindow,
    offset: FixedOffset,
}

impl AvailabilityScanner {
    /// Scanner over 08:00-18:00 in 30-minute steps.
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            window: ScanWindow::default(),
            offset,
        }
    }

    pub fn with_window(mut self, window: ScanWindow) -> Self {
        self.window = window;
        self
    }

    /// Lazily scan the local day of `target_date`.
    ///
    /// Steps start at `start_hour` and continue while the step start is before
    /// `end_hour`; a slot may therefore run past the end of the window.
    /// `duration_minutes` is clamped to `[0, MINUTES_PER_DAY]`.
    pub fn scan<'a>(
        &self,
        events: &'a [ScheduledEvent],
        target_date: DateTime<Utc>,
        duration_minutes: i64,
    ) -> AvailableSlots<'a> {
        let day = DayWindow::containing(target_date, &self.offset);
        let events_on_day = events.iter().filter(|e| day.contains(e.start_time)).count();

        AvailableSlots {
            events,
            cursor: day.at(self.window.start_hour, 0),
            window_end: day.at(self.window.end_hour, 0),
            step: Duration::minutes(self.window.step_minutes.max(1)),
            length: Duration::minutes(duration_minutes.clamp(0, MINUTES_PER_DAY)),
            availability: Availability::from_day_load(events_on_day),
        }
    }
}

/// Lazy sequence of free slots, earliest first.
#[derive(Debug, Clone)]
pub struct AvailableSlots<'a> {
    events: &'a [ScheduledEvent],
    cursor: DateTime<Utc>,
    window_end: DateTime<Utc>,
    step: Duration,
    length: Duration,
    availability: Availability,
}

impl Iterator for AvailableSlots<'_> {
    type Item = AvailabilitySlot;

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor < self.window_end {
            let start = self.cursor;
            let end = saturating_add(start, self.length);
            self.cursor = saturating_add(self.cursor, self.step);

            if !self.events.iter().any(|event| event.overlaps(start, end)) {
                return Some(AvailabilitySlot {
                    start_time: start,
                    end_time: end,
                    availability: self.availability,
                });
            }
        }
        None
    }
}

/// Scan with the default 08:00-18:00 window.
pub fn find_available_slots(
    events: &[ScheduledEvent],
    target_date: DateTime<Utc>,
    duration_minutes: i64,
    offset: FixedOffset,
) -> AvailableSlots<'_> {
    AvailabilityScanner::new(offset).scan(events, target_date, duration_minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, hour, minute, 0).unwrap()
    }

    fn event(id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> ScheduledEvent {
        ScheduledEvent::new(id, id, start, end).unwrap()
    }

    #[test]
    fn empty_day_yields_twenty_slots() {
        let slots: Vec<_> = find_available_slots(&[], at(12, 0), 60, utc()).collect();
        assert_eq!(slots.len(), 20);
        assert_eq!(slots[0].start_time, at(8, 0));
        assert_eq!(slots[19].start_time, at(17, 30));
        assert_eq!(slots[19].end_time, at(18, 30));
        assert!(slots.iter().all(|s| s.availability == Availability::High));
    }

    #[test]
    fn busy_hour_is_skipped() {
        let events = vec![event("a", at(9, 0), at(10, 0))];
        let starts: Vec<_> = find_available_slots(&events, at(0, 0), 60, utc())
            .map(|s| s.start_time)
            .collect();

        assert!(starts.contains(&at(8, 0)));
        assert!(starts.contains(&at(10, 0)));
        assert!(!starts.contains(&at(8, 30)));
        assert!(!starts.contains(&at(9, 0)));
        assert!(!starts.contains(&at(9, 30)));
    }

    #[test]
    fn crowding_rating_is_day_level() {
        let two = vec![event("a", at(6, 0), at(7, 0)), event("b", at(19, 0), at(20, 0))];
        let first = find_available_slots(&two, at(12, 0), 30, utc()).next().unwrap();
        assert_eq!(first.availability, Availability::Medium);

        let four: Vec<_> = (0..4)
            .map(|i| event(&i.to_string(), at(19, i * 10), at(19, i * 10 + 5)))
            .collect();
        let first = find_available_slots(&four, at(12, 0), 30, utc()).next().unwrap();
        assert_eq!(first.availability, Availability::Low);
    }

    #[test]
    fn fully_booked_day_is_empty() {
        let events = vec![event("a", at(7, 0), at(19, 0))];
        assert_eq!(find_available_slots(&events, at(12, 0), 30, utc()).count(), 0);
    }

    #[test]
    fn scan_is_restartable() {
        let events = vec![event("a", at(9, 0), at(10, 0))];
        let slots = find_available_slots(&events, at(12, 0), 60, utc());
        let first_pass: Vec<_> = slots.clone().collect();
        let second_pass: Vec<_> = slots.collect();
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn oversized_duration_is_clamped_to_one_day() {
        let slots: Vec<_> = find_available_slots(&[], at(12, 0), i64::MAX, utc()).collect();
        assert_eq!(slots.len(), 20);
        assert_eq!(slots[0].end_time - slots[0].start_time, Duration::minutes(MINUTES_PER_DAY));

        let events = vec![event("a", at(9, 0), at(10, 0))];
        assert_eq!(find_available_slots(&events, at(12, 0), i64::MAX, utc()).count(), 0);
    }

    #[test]
    fn negative_duration_scans_zero_length_slots() {
        let slot = find_available_slots(&[], at(12, 0), i64::MIN, utc()).next().unwrap();
        assert_eq!(slot.start_time, slot.end_time);
    }

    #[test]
    fn custom_window() {
        let scanner = AvailabilityScanner::new(utc()).with_window(ScanWindow {
            start_hour: 9,
            end_hour: 12,
            step_minutes: 60,
        });
        let starts: Vec<_> = scanner.scan(&[], at(0, 0), 60).map(|s| s.start_time).collect();
        assert_eq!(starts, vec![at(9, 0), at(10, 0), at(11, 0)]);
    }
}
