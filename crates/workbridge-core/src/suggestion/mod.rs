//! Typed remediation suggestions.
//!
//! Each suggestion shares a small envelope (rank, title, description, action,
//! impact, efficiency gain) and carries a [`SuggestionDetail`] with only the
//! data its kind needs. Rank 1 is the recommended action.

mod generator;

pub use generator::{generate_suggestions, SuggestionGenerator};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::scheduler::AvailabilitySlot;

/// Suggestion category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Schedule,
    Reschedule,
    Split,
    Delegate,
    Automate,
}

impl SuggestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Schedule => "schedule",
            Self::Reschedule => "reschedule",
            Self::Split => "split",
            Self::Delegate => "delegate",
            Self::Automate => "automate",
        }
    }
}

impl fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected effect of acting on a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        })
    }
}

/// Where a `schedule` suggestion puts the work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Placement {
    /// On the candidate's own due date.
    Direct { due_date: Option<DateTime<Utc>> },
    /// In a free slot found by the availability scan.
    Slot { slot: AvailabilitySlot },
}

/// Kind-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SuggestionDetail {
    Schedule {
        placement: Placement,
    },
    #[serde(rename_all = "camelCase")]
    Reschedule {
        event_id: String,
        event_title: String,
        proposed_start: DateTime<Utc>,
        proposed_end: DateTime<Utc>,
    },
    #[serde(rename_all = "camelCase")]
    Split {
        parts: u8,
        hours_per_part: f64,
    },
    #[serde(rename_all = "camelCase")]
    Delegate {
        projected_hours: f64,
        capacity_hours: f64,
    },
    #[serde(rename_all = "camelCase")]
    Automate {
        alongside_event: String,
    },
}

impl SuggestionDetail {
    pub fn kind(&self) -> SuggestionKind {
        match self {
            Self::Schedule { .. } => SuggestionKind::Schedule,
            Self::Reschedule { .. } => SuggestionKind::Reschedule,
            Self::Split { .. } => SuggestionKind::Split,
            Self::Delegate { .. } => SuggestionKind::Delegate,
            Self::Automate { .. } => SuggestionKind::Automate,
        }
    }
}

/// A ranked, human-readable remediation option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// 1-based position; rank 1 is the default recommendation.
    pub rank: u32,
    pub title: String,
    pub description: String,
    pub action: String,
    pub impact: Impact,
    pub efficiency_gain: Option<u8>,
    #[serde(flatten)]
    pub detail: SuggestionDetail,
}

impl Suggestion {
    pub fn kind(&self) -> SuggestionKind {
        self.detail.kind()
    }

    pub fn is_recommended(&self) -> bool {
        self.rank == 1
    }

    /// The slot a slot-placement suggestion points at.
    pub fn slot(&self) -> Option<&AvailabilitySlot> {
        match &self.detail {
            SuggestionDetail::Schedule {
                placement: Placement::Slot { slot },
            } => Some(slot),
            _ => None,
        }
    }
}
