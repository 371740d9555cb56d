//! Conflict detection between a candidate and committed events.

use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::{day_label, hours_span, saturating_add, DayWindow, ScheduledEvent};
use crate::task::CandidateWorkItem;

/// How a candidate's due date is matched against events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Any event starting on the due date's local day collides.
    #[default]
    SameDay,
    /// The candidate occupies `[due, due + estimated hours)` and collides with
    /// events overlapping that interval.
    IntervalOverlap,
}

/// How risky a detected conflict is for the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
        }
    }
}

/// Outcome of matching one candidate against the calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictResult {
    pub has_conflict: bool,
    /// First colliding event in iteration order.
    pub conflicting_event: Option<ScheduledEvent>,
    /// Local day of the colliding event, e.g. `Fri Jan 10 2025`.
    pub day_label: Option<String>,
    /// Advisory next-day placement: `conflicting_event.end + 24h`.
    pub suggested_time: Option<DateTime<Utc>>,
    pub risk: Option<RiskLevel>,
    pub note: Option<String>,
}

impl ConflictResult {
    pub fn none() -> Self {
        Self {
            has_conflict: false,
            conflicting_event: None,
            day_label: None,
            suggested_time: None,
            risk: None,
            note: None,
        }
    }

    fn collided(candidate: &CandidateWorkItem, event: &ScheduledEvent, offset: &FixedOffset) -> Self {
        let next_day = event.start_time + Duration::days(1);
        Self {
            has_conflict: true,
            conflicting_event: Some(event.clone()),
            day_label: Some(day_label(event.start_time, offset)),
            suggested_time: Some(event.end_time + Duration::hours(24)),
            risk: Some(if candidate.is_high_priority() {
                RiskLevel::High
            } else {
                RiskLevel::Medium
            }),
            note: Some(format!(
                "Consider moving \"{}\" to {} or extend work to next day",
                event.title,
                day_label(next_day, offset)
            )),
        }
    }

    pub fn event(&self) -> Option<&ScheduledEvent> {
        self.conflicting_event.as_ref()
    }
}

/// A collision found by [`ConflictDetector::detect_all`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateConflict {
    pub candidate_title: String,
    pub conflict: ConflictResult,
}

/// Matches candidates against committed events.
#[derive(Debug, Clone)]
pub struct ConflictDetector {
    policy: ConflictPolicy,
    offset: FixedOffset,
}

impl ConflictDetector {
    /// Same-day detector in the given local offset.
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            policy: ConflictPolicy::default(),
            offset,
        }
    }

    pub fn with_policy(mut self, policy: ConflictPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    /// Find the first event colliding with `candidate`.
    ///
    /// A candidate without a due date never collides.
    pub fn detect(&self, candidate: &CandidateWorkItem, events: &[ScheduledEvent]) -> ConflictResult {
        let Some(due) = candidate.due_date else {
            return ConflictResult::none();
        };

        events
            .iter()
            .find(|event| self.collides(candidate, due, event))
            .map(|event| ConflictResult::collided(candidate, event, &self.offset))
            .unwrap_or_else(ConflictResult::none)
    }

    /// Every (candidate, event) collision across a batch.
    pub fn detect_all(
        &self,
        candidates: &[CandidateWorkItem],
        events: &[ScheduledEvent],
    ) -> Vec<CandidateConflict> {
        let mut found = Vec::new();
        for candidate in candidates {
            let Some(due) = candidate.due_date else {
                continue;
            };
            for event in events.iter().filter(|e| self.collides(candidate, due, e)) {
                found.push(CandidateConflict {
                    candidate_title: candidate.title.clone(),
                    conflict: ConflictResult::collided(candidate, event, &self.offset),
                });
            }
        }
        found
    }

    fn collides(&self, candidate: &CandidateWorkItem, due: DateTime<Utc>, event: &ScheduledEvent) -> bool {
        match self.policy {
            ConflictPolicy::SameDay => DayWindow::containing(due, &self.offset).contains(event.start_time),
            ConflictPolicy::IntervalOverlap => {
                let end = saturating_add(due, hours_span(candidate.effective_hours()));
                event.overlaps(due, end)
            }
        }
    }
}

/// Same-day conflict detection with the default policy.
pub fn detect_conflict(
    candidate: &CandidateWorkItem,
    events: &[ScheduledEvent],
    offset: FixedOffset,
) -> ConflictResult {
    ConflictDetector::new(offset).detect(candidate, events)
}

/// Every collision across a batch of candidates under `policy`.
pub fn detect_conflicts(
    candidates: &[CandidateWorkItem],
    events: &[ScheduledEvent],
    policy: ConflictPolicy,
    offset: FixedOffset,
) -> Vec<CandidateConflict> {
    ConflictDetector::new(offset).with_policy(policy).detect_all(candidates, events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;
    use chrono::TimeZone;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, day, hour, 0, 0).unwrap()
    }

    fn event(id: &str, title: &str, day: u32, start: u32, end: u32) -> ScheduledEvent {
        ScheduledEvent::new(id, title, at(day, start), at(day, end)).unwrap()
    }

    #[test]
    fn no_due_date_never_conflicts() {
        let events = vec![event("a", "Standup", 10, 9, 10)];
        let result = detect_conflict(&CandidateWorkItem::new("Report"), &events, utc());
        assert_eq!(result, ConflictResult::none());
    }

    #[test]
    fn same_day_event_conflicts_regardless_of_hour() {
        let events = vec![event("a", "Client Call", 10, 14, 15)];
        let candidate = CandidateWorkItem::new("Report").with_due_date(at(10, 9));

        let result = detect_conflict(&candidate, &events, utc());
        assert!(result.has_conflict);
        assert_eq!(result.event().unwrap().title, "Client Call");
        assert_eq!(result.day_label.as_deref(), Some("Fri Jan 10 2025"));
        assert_eq!(result.suggested_time, Some(at(11, 15)));
        assert_eq!(result.risk, Some(RiskLevel::Medium));
    }

    #[test]
    fn first_match_in_iteration_order_wins() {
        let events = vec![
            event("late", "Retro", 10, 16, 17),
            event("early", "Standup", 10, 9, 10),
        ];
        let candidate = CandidateWorkItem::new("Report").with_due_date(at(10, 12));

        let result = detect_conflict(&candidate, &events, utc());
        assert_eq!(result.event().unwrap().id, "late");
    }

    #[test]
    fn other_days_do_not_conflict() {
        let events = vec![event("a", "Standup", 9, 9, 10), event("b", "Review", 11, 0, 1)];
        let candidate = CandidateWorkItem::new("Report").with_due_date(at(10, 23));
        assert!(!detect_conflict(&candidate, &events, utc()).has_conflict);
    }

    #[test]
    fn high_priority_conflict_is_high_risk() {
        let events = vec![event("a", "Standup", 10, 9, 10)];
        let candidate = CandidateWorkItem::new("Report")
            .with_due_date(at(10, 8))
            .with_priority(Priority::High);
        assert_eq!(detect_conflict(&candidate, &events, utc()).risk, Some(RiskLevel::High));
    }

    #[test]
    fn interval_policy_needs_real_overlap() {
        let detector = ConflictDetector::new(utc()).with_policy(ConflictPolicy::IntervalOverlap);
        let events = vec![event("a", "Client Call", 10, 14, 15)];

        let morning = CandidateWorkItem::new("Report")
            .with_due_date(at(10, 9))
            .with_estimated_hours(3.0);
        assert!(!detector.detect(&morning, &events).has_conflict);

        let afternoon = CandidateWorkItem::new("Report")
            .with_due_date(at(10, 13))
            .with_estimated_hours(2.0);
        assert!(detector.detect(&afternoon, &events).has_conflict);
    }

    #[test]
    fn interval_policy_caps_oversized_estimates() {
        let detector = ConflictDetector::new(utc()).with_policy(ConflictPolicy::IntervalOverlap);
        let events = vec![event("a", "Client Call", 14, 14, 15)];

        for hours in [1e13, f64::INFINITY, f64::NAN] {
            let candidate = CandidateWorkItem::new("Report")
                .with_due_date(at(10, 9))
                .with_estimated_hours(hours);
            detector.detect(&candidate, &events);
        }

        let huge = CandidateWorkItem::new("Report")
            .with_due_date(at(10, 9))
            .with_estimated_hours(1e13);
        assert!(detector.detect(&huge, &events).has_conflict);
    }

    #[test]
    fn detect_all_reports_every_pair() {
        let events = vec![event("a", "Standup", 10, 9, 10), event("b", "Retro", 10, 16, 17)];
        let candidates = vec![
            CandidateWorkItem::new("Report").with_due_date(at(10, 12)),
            CandidateWorkItem::new("Inbox"),
            CandidateWorkItem::new("Deck").with_due_date(at(12, 12)),
        ];

        let found = ConflictDetector::new(utc()).detect_all(&candidates, &events);
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|c| c.candidate_title == "Report"));
    }
}
