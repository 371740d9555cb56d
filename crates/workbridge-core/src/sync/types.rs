//! Core types exchanged with sync collaborators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::{Priority, SourceChannel};

/// Progress state of a task-sheet row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetStatus {
    Pending,
    InProgress,
    Completed,
}

/// A row in the team task sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetEntry {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub task: String,
    pub source: SourceChannel,
    pub status: SheetStatus,
    pub notes: String,
    pub priority: Priority,
    pub deadline: Option<DateTime<Utc>>,
    pub assignee: Option<String>,
}

/// Request to append a task-sheet row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSheetTask {
    pub title: String,
    pub notes: String,
    pub deadline: DateTime<Utc>,
    pub priority: Priority,
    pub source: SourceChannel,
    pub assignee: Option<String>,
}

/// Request to create a calendar event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCalendarEvent {
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub attendees: Vec<String>,
}

/// One collaborator that failed during sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncFailure {
    pub system: String,
    pub message: String,
}

/// Partial-success outcome of pushing an accepted item to collaborators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    /// At least two systems accepted the item.
    pub success: bool,
    pub calendar_event_id: Option<String>,
    pub sheet_entry_id: Option<String>,
    pub synced_systems: Vec<String>,
    pub notifications: Vec<String>,
    pub failures: Vec<SyncFailure>,
}

impl SyncReport {
    pub fn is_partial(&self) -> bool {
        !self.synced_systems.is_empty() && !self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_partiality() {
        let mut report = SyncReport::default();
        assert!(!report.is_partial());

        report.synced_systems.push("Calendar".into());
        report.failures.push(SyncFailure {
            system: "Task Sheet".into(),
            message: "quota exceeded".into(),
        });
        assert!(report.is_partial());
    }

    #[test]
    fn sheet_status_wire_names() {
        assert_eq!(serde_json::to_string(&SheetStatus::InProgress).unwrap(), "\"in_progress\"");
    }
}
