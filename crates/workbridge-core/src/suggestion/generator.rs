//! Suggestion generation.
//!
//! Combines the conflict result, the scanned slots and the current workload
//! into an ordered list of suggestions. Order is fixed and ranks are assigned
//! positionally after filtering, so rank 1 is always the first suggestion
//! emitted.

use chrono::{Duration, FixedOffset};

use super::{Impact, Placement, Suggestion, SuggestionDetail};
use crate::calendar::{clock_label, day_label, ScheduledEvent};
use crate::scheduler::{AvailabilitySlot, ConflictResult};
use crate::task::CandidateWorkItem;

/// Weekly capacity above which delegation is suggested.
pub const DEFAULT_CAPACITY_HOURS: f64 = 40.0;

/// Candidates longer than this are worth splitting.
const SPLIT_THRESHOLD_HOURS: f64 = 2.0;

/// Builds ranked suggestions for one analysis.
#[derive(Debug, Clone)]
pub struct SuggestionGenerator {
    capacity_hours: f64,
    offset: FixedOffset,
}

impl SuggestionGenerator {
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            capacity_hours: DEFAULT_CAPACITY_HOURS,
            offset,
        }
    }

    pub fn with_capacity_hours(mut self, hours: f64) -> Self {
        self.capacity_hours = hours;
        self
    }

    /// Generate suggestions; never returns an empty list.
    ///
    /// Without a conflict there is exactly one direct `schedule`. With a
    /// conflict the order is: reschedule, split (estimate > 2h), slot
    /// placement (slots found), delegate (over capacity), automate.
    pub fn generate(
        &self,
        candidate: &CandidateWorkItem,
        conflict: &ConflictResult,
        available_slots: &[AvailabilitySlot],
        current_workload: f64,
    ) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();

        match conflict.event().filter(|_| conflict.has_conflict) {
            None => suggestions.push(self.schedule_directly(candidate)),
            Some(event) => {
                suggestions.push(self.reschedule(candidate, event));

                if let Some(hours) = candidate.estimated_hours.filter(|h| *h > SPLIT_THRESHOLD_HOURS) {
                    suggestions.push(self.split(candidate, hours));
                }

                if let Some(slot) = available_slots.first() {
                    suggestions.push(self.best_slot(slot));
                }

                let projected = current_workload + candidate.effective_hours();
                if projected > self.capacity_hours {
                    suggestions.push(self.delegate(candidate, projected));
                }

                suggestions.push(self.automate(candidate, event));
            }
        }

        for (index, suggestion) in suggestions.iter_mut().enumerate() {
            suggestion.rank = index as u32 + 1;
        }
        suggestions
    }

    fn schedule_directly(&self, candidate: &CandidateWorkItem) -> Suggestion {
        let when = candidate
            .due_date
            .map(|due| day_label(due, &self.offset))
            .unwrap_or_else(|| "the next open day".to_string());

        Suggestion {
            rank: 0,
            title: "Schedule Directly".to_string(),
            description: format!("Add \"{}\" to calendar for {}", candidate.title, when),
            action: "Add to calendar".to_string(),
            impact: Impact::High,
            efficiency_gain: Some(0),
            detail: SuggestionDetail::Schedule {
                placement: Placement::Direct {
                    due_date: candidate.due_date,
                },
            },
        }
    }

    fn reschedule(&self, candidate: &CandidateWorkItem, event: &ScheduledEvent) -> Suggestion {
        let high = candidate.is_high_priority();
        Suggestion {
            rank: 0,
            title: "Reschedule Conflicting Meeting".to_string(),
            description: format!(
                "Move \"{}\" to next day. This gives you time to complete \"{}\" without overlap.",
                event.title, candidate.title
            ),
            action: format!("Suggest reschedule of \"{}\" to attendees", event.title),
            impact: if high { Impact::High } else { Impact::Medium },
            efficiency_gain: Some(if high { 15 } else { 8 }),
            detail: SuggestionDetail::Reschedule {
                event_id: event.id.clone(),
                event_title: event.title.clone(),
                proposed_start: event.start_time + Duration::days(1),
                proposed_end: event.end_time + Duration::days(1),
            },
        }
    }

    fn split(&self, candidate: &CandidateWorkItem, hours: f64) -> Suggestion {
        let parts: u8 = if hours > 4.0 { 3 } else { 2 };
        Suggestion {
            rank: 0,
            title: "Split Work Across Days".to_string(),
            description: format!(
                "Divide \"{}\" into smaller chunks. Complete part before the meeting, part after.",
                candidate.title
            ),
            action: format!("Create {parts} subtasks in the task sheet"),
            impact: Impact::Medium,
            efficiency_gain: Some(10),
            detail: SuggestionDetail::Split {
                parts,
                hours_per_part: hours / parts as f64,
            },
        }
    }

    fn best_slot(&self, slot: &AvailabilitySlot) -> Suggestion {
        Suggestion {
            rank: 0,
            title: "Use Best Available Slot".to_string(),
            description: format!(
                "{} - {} has {} availability.",
                clock_label(slot.start_time, &self.offset),
                clock_label(slot.end_time, &self.offset),
                slot.availability.as_str()
            ),
            action: "Schedule in suggested time slot".to_string(),
            impact: Impact::Medium,
            efficiency_gain: Some(5),
            detail: SuggestionDetail::Schedule {
                placement: Placement::Slot { slot: slot.clone() },
            },
        }
    }

    fn delegate(&self, candidate: &CandidateWorkItem, projected: f64) -> Suggestion {
        Suggestion {
            rank: 0,
            title: "Delegate to a Teammate".to_string(),
            description: format!(
                "Taking on \"{}\" brings your load to {:.1}h, above the {:.1}h capacity. Hand it to someone with room.",
                candidate.title, projected, self.capacity_hours
            ),
            action: "Reassign in the task sheet".to_string(),
            impact: Impact::Medium,
            efficiency_gain: Some(12),
            detail: SuggestionDetail::Delegate {
                projected_hours: projected,
                capacity_hours: self.capacity_hours,
            },
        }
    }

    fn automate(&self, candidate: &CandidateWorkItem, event: &ScheduledEvent) -> Suggestion {
        Suggestion {
            rank: 0,
            title: "Generate Draft During Meeting".to_string(),
            description: format!(
                "An initial draft of \"{}\" can be generated while you're in \"{}\". You review and finalize after.",
                candidate.title, event.title
            ),
            action: "Create draft template".to_string(),
            impact: Impact::High,
            efficiency_gain: Some(20),
            detail: SuggestionDetail::Automate {
                alongside_event: event.title.clone(),
            },
        }
    }
}

/// Generate suggestions with the default capacity.
pub fn generate_suggestions(
    candidate: &CandidateWorkItem,
    conflict: &ConflictResult,
    available_slots: &[AvailabilitySlot],
    current_workload: f64,
    offset: FixedOffset,
) -> Vec<Suggestion> {
    SuggestionGenerator::new(offset).generate(candidate, conflict, available_slots, current_workload)
}
