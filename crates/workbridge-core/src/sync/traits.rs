use crate::calendar::ScheduledEvent;
use crate::error::CollaboratorError;
use crate::sync::types::{NewCalendarEvent, NewSheetTask, SheetEntry};

/// Spreadsheet-style task tracker.
/// Implementations own their transport, timeouts and retries.
pub trait TaskSheet: Send + Sync {
    /// Human-readable system name (e.g. "Task Sheet").
    fn name(&self) -> &str;

    /// Append a task row.
    fn create_task(&self, task: &NewSheetTask) -> Result<SheetEntry, CollaboratorError>;
}

/// Calendar that accepted items are written to.
pub trait CalendarSink: Send + Sync {
    /// Human-readable system name (e.g. "Calendar").
    fn name(&self) -> &str;

    /// Create an event.
    fn create_event(&self, event: &NewCalendarEvent) -> Result<ScheduledEvent, CollaboratorError>;
}

/// Team messaging channel.
pub trait Notifier: Send + Sync {
    /// Human-readable system name (e.g. "Messaging").
    fn name(&self) -> &str;

    /// Post `message` to `channel`, returning the message id.
    fn notify(&self, channel: &str, message: &str) -> Result<String, CollaboratorError>;
}
