//! End-to-end analysis scenarios.
//!
//! Exercises the full pipeline from candidate and event snapshot through to
//! ranked suggestions, pinned to UTC so day boundaries are deterministic.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use workbridge_core::{
    compute_workload, detect_conflicts, find_available_slots, AnalyzerConfig, Analyzer,
    CandidateWorkItem, ConflictPolicy, Priority, ScheduledEvent, SuggestionKind,
};

fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, day, hour, 0, 0).unwrap()
}

fn event(id: &str, title: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> ScheduledEvent {
    ScheduledEvent::new(id, title, start, end).unwrap()
}

#[test]
fn test_scenario_a_free_day_schedules_directly() {
    let analyzer = Analyzer::new(AnalyzerConfig::with_offset(utc()));
    let candidate = CandidateWorkItem::new("Write report")
        .with_due_date(at(10, 0))
        .with_estimated_hours(2.0);

    let result = analyzer.analyze(&candidate, &[]);

    assert!(!result.conflict.has_conflict);
    assert!(result.available_slots.is_empty());
    assert_eq!(result.suggestions.len(), 1);

    let only = &result.suggestions[0];
    assert_eq!(only.kind(), SuggestionKind::Schedule);
    assert_eq!(only.efficiency_gain, Some(0));
    assert_eq!(serde_json::to_value(only.impact).unwrap(), "high");
    assert_eq!(result.recommended, *only);
}

#[test]
fn test_scenario_b_client_call_conflict() {
    let analyzer = Analyzer::new(AnalyzerConfig::with_offset(utc()));
    let events = vec![event("call", "Client Call", at(10, 14), at(10, 15))];
    let candidate = CandidateWorkItem::new("Prepare proposal")
        .with_due_date(at(10, 9))
        .with_estimated_hours(3.0)
        .with_priority(Priority::High);

    let result = analyzer.analyze(&candidate, &events);

    assert!(result.conflict.has_conflict);
    assert_eq!(result.conflict.event().unwrap().title, "Client Call");

    let kinds: Vec<_> = result.suggestions.iter().map(|s| s.kind()).collect();
    let position = |kind| kinds.iter().position(|k| *k == kind).unwrap();
    assert!(position(SuggestionKind::Reschedule) < position(SuggestionKind::Split));
    assert!(position(SuggestionKind::Split) < position(SuggestionKind::Automate));

    let gain_of = |kind| {
        result
            .suggestions
            .iter()
            .find(|s| s.kind() == kind)
            .and_then(|s| s.efficiency_gain)
    };
    assert_eq!(gain_of(SuggestionKind::Reschedule), Some(15));
    assert_eq!(gain_of(SuggestionKind::Split), Some(10));
    assert_eq!(gain_of(SuggestionKind::Automate), Some(20));

    let ranks: Vec<u32> = result.suggestions.iter().map(|s| s.rank).collect();
    assert_eq!(ranks, (1..=result.suggestions.len() as u32).collect::<Vec<_>>());
    assert_eq!(result.recommended.kind(), SuggestionKind::Reschedule);
}

#[test]
fn test_scenario_c_slot_scan_skips_busy_hour() {
    let events = vec![event("standup", "Standup", at(10, 9), at(10, 10))];
    let starts: Vec<_> = find_available_slots(&events, at(10, 0), 60, utc())
        .map(|s| s.start_time)
        .collect();

    assert!(!starts.contains(&at(10, 9)));
    assert!(starts.contains(&at(10, 8)));
    assert!(starts.contains(&at(10, 10)));
}

#[test]
fn test_scenario_d_workload_totals() {
    let events = vec![
        event("a", "Planning", at(6, 9), at(6, 11)),
        event("b", "Review", at(7, 13), at(7, 16)),
    ];
    let snapshot = compute_workload(&events, 2.0);
    assert_eq!(snapshot.current, 5.0);
    assert_eq!(snapshot.after, 7.0);
}

#[test]
fn test_interval_policy_ignores_same_day_events_that_do_not_overlap() {
    let events = vec![event("call", "Client Call", at(10, 14), at(10, 15))];
    let morning = CandidateWorkItem::new("Morning work")
        .with_due_date(at(10, 9))
        .with_estimated_hours(2.0);
    let afternoon = CandidateWorkItem::new("Afternoon work")
        .with_due_date(at(10, 13))
        .with_estimated_hours(2.0);
    let candidates = vec![morning.clone(), afternoon];

    let same_day = detect_conflicts(&candidates, &events, ConflictPolicy::SameDay, utc());
    assert_eq!(same_day.len(), 2);

    let overlap = detect_conflicts(&candidates, &events, ConflictPolicy::IntervalOverlap, utc());
    assert_eq!(overlap.len(), 1);
    assert_eq!(overlap[0].candidate_title, "Afternoon work");

    let mut config = AnalyzerConfig::with_offset(utc());
    config.policy = ConflictPolicy::IntervalOverlap;
    let result = Analyzer::new(config).analyze(&morning, &events);
    assert!(!result.conflict.has_conflict);
}

#[test]
fn test_result_serializes_with_camel_case_fields() {
    let analyzer = Analyzer::new(AnalyzerConfig::with_offset(utc()));
    let events = vec![event("call", "Client Call", at(10, 14), at(10, 15))];
    let candidate = CandidateWorkItem::new("Prepare proposal").with_due_date(at(10, 9));

    let json = serde_json::to_value(analyzer.analyze(&candidate, &events)).unwrap();

    assert_eq!(json["conflict"]["hasConflict"], true);
    assert_eq!(json["conflict"]["conflictingEvent"]["title"], "Client Call");
    assert_eq!(json["suggestions"][0]["kind"], "reschedule");
    assert_eq!(json["suggestions"][0]["rank"], 1);
    assert!(json["availableSlots"].as_array().unwrap().len() > 0);
    assert_eq!(json["workloadImpact"]["overlapPercentage"], 100);
}
