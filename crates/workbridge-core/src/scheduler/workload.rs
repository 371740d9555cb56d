//! Committed-hours aggregation.

use serde::{Deserialize, Serialize};

use crate::calendar::ScheduledEvent;

/// Current load and load after accepting the candidate, in hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadSnapshot {
    pub current: f64,
    pub after: f64,
    /// 100 when the candidate collides with an event, 0 otherwise.
    pub overlap_percentage: u8,
}

impl WorkloadSnapshot {
    pub fn with_conflict(mut self, has_conflict: bool) -> Self {
        self.overlap_percentage = if has_conflict { 100 } else { 0 };
        self
    }

    /// Hours added by the candidate.
    pub fn delta(&self) -> f64 {
        self.after - self.current
    }
}

/// Sum committed hours across `events` and add `candidate_hours` on top.
///
/// Durations are summed as integer milliseconds so the result does not depend
/// on event order.
pub fn compute_workload(events: &[ScheduledEvent], candidate_hours: f64) -> WorkloadSnapshot {
    let total_millis: i64 = events
        .iter()
        .map(|e| (e.end_time - e.start_time).num_milliseconds().max(0))
        .sum();
    let current = total_millis as f64 / 3_600_000.0;

    WorkloadSnapshot {
        current,
        after: current + candidate_hours,
        overlap_percentage: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn event(id: &str, start_hour: u32, minutes: i64) -> ScheduledEvent {
        let start = Utc.with_ymd_and_hms(2025, 1, 10, start_hour, 0, 0).unwrap();
        ScheduledEvent::new(id, id, start, start + Duration::minutes(minutes)).unwrap()
    }

    #[test]
    fn sums_event_hours() {
        let events = vec![event("a", 9, 120), event("b", 13, 180)];
        let snapshot = compute_workload(&events, 2.0);
        assert_eq!(snapshot.current, 5.0);
        assert_eq!(snapshot.after, 7.0);
        assert_eq!(snapshot.delta(), 2.0);
    }

    #[test]
    fn empty_calendar_is_zero_load() {
        let snapshot = compute_workload(&[], 0.0);
        assert_eq!(snapshot.current, 0.0);
        assert_eq!(snapshot.after, 0.0);
    }

    #[test]
    fn order_does_not_matter() {
        let mut events = vec![event("a", 9, 20), event("b", 10, 35), event("c", 11, 50)];
        let forward = compute_workload(&events, 1.5);
        events.reverse();
        assert_eq!(forward, compute_workload(&events, 1.5));
    }

    #[test]
    fn conflict_flag_sets_overlap() {
        let snapshot = compute_workload(&[], 2.0).with_conflict(true);
        assert_eq!(snapshot.overlap_percentage, 100);
    }
}
