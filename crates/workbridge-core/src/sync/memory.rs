//! In-process collaborators.
//!
//! Back the CLI and tests. Each can be built in a failing mode to exercise
//! partial-success reporting.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use crate::calendar::ScheduledEvent;
use crate::error::CollaboratorError;
use crate::sync::traits::{CalendarSink, Notifier, TaskSheet};
use crate::sync::types::{NewCalendarEvent, NewSheetTask, SheetEntry, SheetStatus};

fn lock<'a, T>(mutex: &'a Mutex<T>, system: &str) -> Result<MutexGuard<'a, T>, CollaboratorError> {
    mutex.lock().map_err(|_| CollaboratorError::Unavailable {
        system: system.to_string(),
    })
}

fn new_id(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4())
}

/// Task sheet kept in memory.
#[derive(Debug, Default)]
pub struct MemorySheet {
    rows: Mutex<Vec<SheetEntry>>,
    failing: bool,
}

impl MemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sheet that rejects every write.
    pub fn failing() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    pub fn rows(&self) -> Vec<SheetEntry> {
        self.rows.lock().map(|rows| rows.clone()).unwrap_or_default()
    }
}

impl TaskSheet for MemorySheet {
    fn name(&self) -> &str {
        "Task Sheet"
    }

    fn create_task(&self, task: &NewSheetTask) -> Result<SheetEntry, CollaboratorError> {
        if self.failing {
            return Err(CollaboratorError::Rejected {
                system: self.name().to_string(),
                message: "sheet is read-only".to_string(),
            });
        }

        let entry = SheetEntry {
            id: new_id("sheet"),
            created_at: Utc::now(),
            task: task.title.clone(),
            source: task.source,
            status: SheetStatus::Pending,
            notes: task.notes.clone(),
            priority: task.priority,
            deadline: Some(task.deadline),
            assignee: task.assignee.clone(),
        };
        lock(&self.rows, self.name())?.push(entry.clone());
        Ok(entry)
    }
}

/// Calendar kept in memory.
#[derive(Debug, Default)]
pub struct MemoryCalendar {
    events: Mutex<Vec<ScheduledEvent>>,
    failing: bool,
}

impl MemoryCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated with existing events.
    pub fn with_events(events: Vec<ScheduledEvent>) -> Self {
        Self {
            events: Mutex::new(events),
            failing: false,
        }
    }

    /// A calendar that is never reachable.
    pub fn failing() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    /// Snapshot of the current events, for analysis.
    pub fn events(&self) -> Vec<ScheduledEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

impl CalendarSink for MemoryCalendar {
    fn name(&self) -> &str {
        "Calendar"
    }

    fn create_event(&self, event: &NewCalendarEvent) -> Result<ScheduledEvent, CollaboratorError> {
        if self.failing {
            return Err(CollaboratorError::Unavailable {
                system: self.name().to_string(),
            });
        }

        let created = ScheduledEvent::new(new_id("cal"), event.title.clone(), event.start_time, event.end_time)
            .map_err(|e| CollaboratorError::Rejected {
                system: self.name().to_string(),
                message: e.to_string(),
            })?
            .with_attendees(event.attendees.iter().cloned());
        lock(&self.events, self.name())?.push(created.clone());
        Ok(created)
    }
}

/// A posted message.
#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub id: String,
    pub channel: String,
    pub text: String,
}

/// Messaging channel kept in memory.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    sent: Mutex<Vec<SentMessage>>,
    failing: bool,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }
}

impl Notifier for MemoryNotifier {
    fn name(&self) -> &str {
        "Messaging"
    }

    fn notify(&self, channel: &str, message: &str) -> Result<String, CollaboratorError> {
        if self.failing {
            return Err(CollaboratorError::Unavailable {
                system: self.name().to_string(),
            });
        }

        let id = new_id("msg");
        lock(&self.sent, self.name())?.push(SentMessage {
            id: id.clone(),
            channel: channel.to_string(),
            text: message.to_string(),
        });
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Priority, SourceChannel};
    use chrono::Duration;

    #[test]
    fn calendar_records_created_events() {
        let calendar = MemoryCalendar::new();
        let start = Utc::now();
        let created = calendar
            .create_event(&NewCalendarEvent {
                title: "Report".into(),
                start_time: start,
                end_time: start + Duration::hours(1),
                attendees: vec!["team@company.com".into()],
            })
            .unwrap();

        assert!(created.id.starts_with("cal-"));
        assert!(created.attendees.contains("team@company.com"));
        assert_eq!(calendar.events(), vec![created]);
    }

    #[test]
    fn calendar_rejects_empty_interval() {
        let calendar = MemoryCalendar::new();
        let start = Utc::now();
        let err = calendar
            .create_event(&NewCalendarEvent {
                title: "Zero".into(),
                start_time: start,
                end_time: start,
                attendees: vec![],
            })
            .unwrap_err();
        assert_eq!(err.system(), "Calendar");
    }

    #[test]
    fn failing_sheet_rejects() {
        let sheet = MemorySheet::failing();
        let result = sheet.create_task(&NewSheetTask {
            title: "x".into(),
            notes: String::new(),
            deadline: Utc::now(),
            priority: Priority::Low,
            source: SourceChannel::Email,
            assignee: None,
        });
        assert!(result.is_err());
        assert!(sheet.rows().is_empty());
    }

    #[test]
    fn notifier_records_messages() {
        let notifier = MemoryNotifier::new();
        let id = notifier.notify("#team", "hello").unwrap();
        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].id, id);
        assert_eq!(sent[0].channel, "#team");
    }
}
