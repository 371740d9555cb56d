//! Fan-out of an accepted item to the task sheet, calendar and messaging.
//!
//! Every step runs even when an earlier one fails; failures end up in the
//! [`SyncReport`] rather than as an `Err`.

use chrono::{DateTime, FixedOffset, Utc};

use crate::calendar::{clock_label, hours_span, saturating_add};
use crate::error::CollaboratorError;
use crate::extract::{BotTask, Difficulty};
use crate::storage::SyncConfig;
use crate::suggestion::Suggestion;
use crate::sync::traits::{CalendarSink, Notifier, TaskSheet};
use crate::sync::types::{NewCalendarEvent, NewSheetTask, SyncFailure, SyncReport};
use crate::task::CandidateWorkItem;

/// Minimum number of systems that must accept an item for the sync to count.
const MIN_SYNCED_SYSTEMS: usize = 2;

/// Block length when the candidate carries no estimate.
const DEFAULT_BLOCK_HOURS: f64 = 1.0;

/// Drives the three collaborators for one accepted item.
pub struct SyncOrchestrator<'a> {
    sheet: &'a dyn TaskSheet,
    calendar: &'a dyn CalendarSink,
    notifier: &'a dyn Notifier,
    settings: SyncConfig,
}

impl<'a> SyncOrchestrator<'a> {
    pub fn new(
        sheet: &'a dyn TaskSheet,
        calendar: &'a dyn CalendarSink,
        notifier: &'a dyn Notifier,
        settings: SyncConfig,
    ) -> Self {
        Self {
            sheet,
            calendar,
            notifier,
            settings,
        }
    }

    /// Push `candidate` using the placement implied by `selected`.
    pub fn execute(
        &self,
        candidate: &CandidateWorkItem,
        selected: &Suggestion,
        now: DateTime<Utc>,
    ) -> SyncReport {
        let mut report = SyncReport::default();

        let task = NewSheetTask {
            title: candidate.title.clone(),
            notes: format!(
                "{} [Priority: {}] [Source: {}]",
                candidate.description,
                candidate.priority.as_str().to_uppercase(),
                candidate.source
            ),
            deadline: candidate.due_date.unwrap_or(now),
            priority: candidate.priority,
            source: candidate.source,
            assignee: None,
        };
        self.push_task(&task, &mut report);

        let (start, end) = match selected.slot() {
            Some(slot) => (slot.start_time, slot.end_time),
            None => {
                let start = candidate.due_date.unwrap_or(now);
                let hours = candidate.estimated_hours.unwrap_or(DEFAULT_BLOCK_HOURS);
                (start, saturating_add(start, hours_span(hours)))
            }
        };
        let event = NewCalendarEvent {
            title: candidate.title.clone(),
            start_time: start,
            end_time: end,
            attendees: self.settings.attendees.clone(),
        };
        self.push_event(&event, &mut report);

        if candidate.is_high_priority() {
            let message = format!("High-priority task: \"{}\" ({})", candidate.title, selected.title);
            self.push_notification(&message, &mut report);
        }

        self.finish(report, &candidate.title)
    }

    /// Push a bot-delivered task. The calendar block starts at
    /// [`BotTask::calendar_start`] and hard tasks are announced.
    pub fn execute_bot_task(&self, bot_task: &BotTask, offset: &FixedOffset) -> SyncReport {
        let mut report = SyncReport::default();
        let candidate = bot_task.to_candidate();

        let task = NewSheetTask {
            title: candidate.title.clone(),
            notes: candidate.description.clone(),
            deadline: bot_task.due_date,
            priority: candidate.priority,
            source: candidate.source,
            assignee: None,
        };
        self.push_task(&task, &mut report);

        let start = bot_task.calendar_start(offset);
        let event = NewCalendarEvent {
            title: candidate.title.clone(),
            start_time: start,
            end_time: saturating_add(start, hours_span(bot_task.hours)),
            attendees: self.settings.attendees.clone(),
        };
        if self.push_event(&event, &mut report) {
            if let Some(last) = report.notifications.last_mut() {
                last.push_str(&format!(" at {}", clock_label(start, offset)));
            }
        }

        if bot_task.difficulty == Difficulty::Hard {
            let message = format!("Hard task incoming: \"{}\" ({}h)", bot_task.title, bot_task.hours);
            self.push_notification(&message, &mut report);
        }

        self.finish(report, &bot_task.title)
    }

    fn push_task(&self, task: &NewSheetTask, report: &mut SyncReport) -> bool {
        match self.sheet.create_task(task) {
            Ok(entry) => {
                report.sheet_entry_id = Some(entry.id);
                self.record_success(self.sheet.name(), &task.title, report);
                true
            }
            Err(e) => {
                self.record_failure(e, report);
                false
            }
        }
    }

    fn push_event(&self, event: &NewCalendarEvent, report: &mut SyncReport) -> bool {
        match self.calendar.create_event(event) {
            Ok(created) => {
                report.calendar_event_id = Some(created.id);
                self.record_success(self.calendar.name(), &event.title, report);
                true
            }
            Err(e) => {
                self.record_failure(e, report);
                false
            }
        }
    }

    fn push_notification(&self, message: &str, report: &mut SyncReport) -> bool {
        match self.notifier.notify(&self.settings.notify_channel, message) {
            Ok(_) => {
                report.synced_systems.push(self.notifier.name().to_string());
                report
                    .notifications
                    .push(format!("Notification sent to {}", self.settings.notify_channel));
                true
            }
            Err(e) => {
                self.record_failure(e, report);
                false
            }
        }
    }

    fn record_success(&self, system: &str, title: &str, report: &mut SyncReport) {
        report.synced_systems.push(system.to_string());
        report.notifications.push(format!("Added to {system}: {title}"));
    }

    fn record_failure(&self, error: CollaboratorError, report: &mut SyncReport) {
        tracing::warn!(system = error.system(), error = %error, "sync step failed");
        report.notifications.push(format!("Failed to sync to {}", error.system()));
        report.failures.push(SyncFailure {
            system: error.system().to_string(),
            message: error.to_string(),
        });
    }

    fn finish(&self, mut report: SyncReport, title: &str) -> SyncReport {
        report.success = report.synced_systems.len() >= MIN_SYNCED_SYSTEMS;
        tracing::info!(
            title,
            synced = report.synced_systems.len(),
            failed = report.failures.len(),
            success = report.success,
            "sync finished"
        );
        report
    }
}
