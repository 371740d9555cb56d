//! Pushing accepted items to external collaborators.
//!
//! The collaborators are traits so that real transports live outside this
//! crate. In-memory versions back the CLI and tests.

mod memory;
mod orchestrator;
mod traits;
pub mod types;

pub use memory::{MemoryCalendar, MemoryNotifier, MemorySheet, SentMessage};
pub use orchestrator::SyncOrchestrator;
pub use traits::{CalendarSink, Notifier, TaskSheet};
pub use types::{NewCalendarEvent, NewSheetTask, SheetEntry, SheetStatus, SyncFailure, SyncReport};
