//! Single-item analysis pipeline.
//!
//! Runs conflict detection, the availability scan (only when conflicted),
//! workload aggregation and suggestion generation, in that order, and packages
//! the results for display or sync.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::calendar::{hours_span, local_offset, ScheduledEvent};
use crate::scheduler::{
    compute_workload, AvailabilityScanner, AvailabilitySlot, ConflictDetector, ConflictPolicy,
    ConflictResult, ScanWindow, WorkloadSnapshot,
};
use crate::storage::Config;
use crate::suggestion::{Suggestion, SuggestionGenerator};
use crate::task::CandidateWorkItem;

/// Duration used for the slot scan when a candidate has no estimate.
const SCAN_FALLBACK_HOURS: f64 = 1.0;

/// Everything the analyzer needs to know about the environment.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub offset: FixedOffset,
    pub policy: ConflictPolicy,
    pub window: ScanWindow,
    pub capacity_hours: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for AnalyzerConfig {
    fn from(config: &Config) -> Self {
        Self {
            offset: config.utc_offset(),
            policy: config.analysis.conflict_policy,
            window: config.scan_window(),
            capacity_hours: config.analysis.capacity_hours,
        }
    }
}

impl AnalyzerConfig {
    /// Defaults pinned to a specific offset.
    pub fn with_offset(offset: FixedOffset) -> Self {
        Self {
            offset,
            ..Self::from(&Config::default())
        }
    }
}

/// Packaged outcome of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub candidate: CandidateWorkItem,
    pub conflict: ConflictResult,
    /// Slots found on the due date; empty unless a conflict was found.
    pub available_slots: Vec<AvailabilitySlot>,
    /// Ranked suggestions, never empty.
    pub suggestions: Vec<Suggestion>,
    /// The rank-1 suggestion.
    pub recommended: Suggestion,
    pub workload_impact: WorkloadSnapshot,
}

impl AnalysisResult {
    pub fn suggestion_by_rank(&self, rank: u32) -> Option<&Suggestion> {
        self.suggestions.iter().find(|s| s.rank == rank)
    }
}

/// Stateless analyzer; safe to share across threads.
#[derive(Debug, Clone)]
pub struct Analyzer {
    detector: ConflictDetector,
    scanner: AvailabilityScanner,
    generator: SuggestionGenerator,
    offset: FixedOffset,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            detector: ConflictDetector::new(config.offset).with_policy(config.policy),
            scanner: AvailabilityScanner::new(config.offset).with_window(config.window),
            generator: SuggestionGenerator::new(config.offset).with_capacity_hours(config.capacity_hours),
            offset: config.offset,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(AnalyzerConfig::from(config))
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Analyze one candidate against an immutable snapshot of events.
    pub fn analyze(&self, candidate: &CandidateWorkItem, events: &[ScheduledEvent]) -> AnalysisResult {
        let conflict = self.detector.detect(candidate, events);
        tracing::debug!(
            title = %candidate.title,
            has_conflict = conflict.has_conflict,
            event = conflict.event().map(|e| e.title.as_str()),
            "conflict detection finished"
        );

        let available_slots = match candidate.due_date {
            Some(due) if conflict.has_conflict => {
                let hours = candidate.estimated_hours.unwrap_or(SCAN_FALLBACK_HOURS);
                let minutes = hours_span(hours).num_minutes();
                self.scanner.scan(events, due, minutes).collect()
            }
            _ => Vec::new(),
        };
        tracing::debug!(slots = available_slots.len(), "availability scan finished");

        let workload = compute_workload(events, candidate.effective_hours()).with_conflict(conflict.has_conflict);
        tracing::debug!(current = workload.current, after = workload.after, "workload computed");

        let suggestions = self
            .generator
            .generate(candidate, &conflict, &available_slots, workload.current);
        let recommended = suggestions[0].clone();
        tracing::debug!(
            count = suggestions.len(),
            recommended = %recommended.kind(),
            "suggestions generated"
        );

        AnalysisResult {
            candidate: candidate.clone(),
            conflict,
            available_slots,
            suggestions,
            recommended,
            workload_impact: workload,
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

/// Analyze with default configuration in the machine's local offset.
pub fn analyze(candidate: &CandidateWorkItem, events: &[ScheduledEvent]) -> AnalysisResult {
    Analyzer::new(AnalyzerConfig::with_offset(local_offset())).analyze(candidate, events)
}
