//! Period-level productivity insight
//!
//! Summarises a period's calendar and task sheet into:
//! - **Meeting load**: total committed hours
//! - **Completion rate**: share of sheet rows marked completed
//! - **Bottlenecks**: heavy meetings, low completion, chat-driven intake
//! - **Predicted gain**: rough efficiency improvement if the bottlenecks are addressed

use serde::{Deserialize, Serialize};

use crate::calendar::ScheduledEvent;
use crate::scheduler::compute_workload;
use crate::sync::{SheetEntry, SheetStatus};
use crate::task::SourceChannel;

/// Meeting hours above which the period counts as meeting-heavy.
pub const HEAVY_MEETING_HOURS: f64 = 15.0;
/// Completion percentage below which prioritisation is flagged.
pub const LOW_COMPLETION_PERCENT: f64 = 50.0;
/// Share of WhatsApp-sourced tasks above which intake counts as informal.
pub const INFORMAL_INTAKE_SHARE: f64 = 0.6;

const BASELINE_GAIN: u8 = 15;
const MEETING_REDUCTION_GAIN: u8 = 20;
const PRIORITISATION_GAIN: u8 = 10;
const MAX_GAIN: u8 = 45;
const EFFICIENCY_FLOOR: u8 = 45;
const EFFICIENCY_PENALTY: u8 = 15;

/// Expected improvement if recommendations are followed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictedImprovement {
    pub description: String,
    /// Percentage points, capped at 45
    pub percentage_gain: u8,
    pub timeframe: String,
}

/// Productivity summary for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductivityInsight {
    /// Free-form label, e.g. "This Week"
    pub period: String,
    /// Committed meeting hours in the period
    pub meeting_hours: f64,
    /// Completed rows as a percentage; `None` when the sheet is empty
    pub completion_rate: Option<f64>,
    /// 45 to 100, lowered by 15 per bottleneck
    pub team_efficiency: u8,
    pub bottlenecks: Vec<String>,
    pub recommendations: Vec<String>,
    pub predicted_improvement: PredictedImprovement,
    pub automation_opportunities: Vec<String>,
}

/// Build the insight for `period` from its events and sheet rows.
pub fn productivity_insight(
    period: impl Into<String>,
    events: &[ScheduledEvent],
    tasks: &[SheetEntry],
) -> ProductivityInsight {
    let meeting_hours = compute_workload(events, 0.0).current;
    let heavy_meetings = meeting_hours > HEAVY_MEETING_HOURS;

    let completion_rate = if tasks.is_empty() {
        None
    } else {
        let completed = tasks.iter().filter(|t| t.status == SheetStatus::Completed).count();
        Some(completed as f64 / tasks.len() as f64 * 100.0)
    };
    let low_completion = completion_rate.is_some_and(|rate| rate < LOW_COMPLETION_PERCENT);

    let from_chat = tasks.iter().filter(|t| t.source == SourceChannel::Whatsapp).count();
    let informal_intake = !tasks.is_empty() && from_chat as f64 > tasks.len() as f64 * INFORMAL_INTAKE_SHARE;

    let mut bottlenecks = Vec::new();
    if heavy_meetings {
        bottlenecks.push("Too many meetings consuming 40%+ of work time".to_string());
    }
    if low_completion {
        bottlenecks.push("Low task completion rate - priority misalignment".to_string());
    }
    if informal_intake {
        bottlenecks.push(
            "Heavy reliance on informal communication (WhatsApp) over structured planning".to_string(),
        );
    }

    let mut recommendations = Vec::new();
    if heavy_meetings {
        recommendations.push("Consolidate 3-4 meetings into 1 bi-weekly sync (saves 4-5 hours)".to_string());
    }
    recommendations.push("Route ad-hoc requests through task extraction instead of manual entry".to_string());
    recommendations.push("Schedule 2-hour deep work blocks daily".to_string());

    let automation_opportunities = vec![
        "Chat voice notes: auto-extract tasks into the task sheet".to_string(),
        "Calendar conflicts: auto-suggest reschedule with a team notification".to_string(),
        "Daily summary: generated from calendar and completed tasks".to_string(),
        "Status reports: compiled from task-sheet entries".to_string(),
    ];

    let mut gain = BASELINE_GAIN;
    if heavy_meetings {
        gain += MEETING_REDUCTION_GAIN;
    }
    if low_completion {
        gain += PRIORITISATION_GAIN;
    }
    let gain = gain.min(MAX_GAIN);

    let penalty = EFFICIENCY_PENALTY as usize * bottlenecks.len();
    let team_efficiency = 100usize.saturating_sub(penalty).max(EFFICIENCY_FLOOR as usize) as u8;

    tracing::debug!(
        meeting_hours,
        ?completion_rate,
        bottlenecks = bottlenecks.len(),
        gain,
        "computed productivity insight"
    );

    ProductivityInsight {
        period: period.into(),
        meeting_hours,
        completion_rate,
        team_efficiency,
        bottlenecks,
        recommendations,
        predicted_improvement: PredictedImprovement {
            description: format!(
                "Automated intake plus meeting reduction could improve efficiency by {gain}%"
            ),
            percentage_gain: gain,
            timeframe: "2 weeks".to_string(),
        },
        automation_opportunities,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;
    use chrono::{Duration, TimeZone, Utc};

    fn meetings(count: i64, hours: i64) -> Vec<ScheduledEvent> {
        let base = Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap();
        (0..count)
            .map(|i| {
                let start = base + Duration::days(i);
                ScheduledEvent::new(format!("e{i}"), "Meeting", start, start + Duration::hours(hours)).unwrap()
            })
            .collect()
    }

    fn row(status: SheetStatus, source: SourceChannel) -> SheetEntry {
        SheetEntry {
            id: "r".into(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap(),
            task: "t".into(),
            source,
            status,
            notes: String::new(),
            priority: Priority::Medium,
            deadline: None,
            assignee: None,
        }
    }

    #[test]
    fn healthy_period_has_baseline_gain() {
        let tasks = vec![
            row(SheetStatus::Completed, SourceChannel::Slack),
            row(SheetStatus::Pending, SourceChannel::Email),
        ];
        let insight = productivity_insight("This Week", &meetings(2, 2), &tasks);

        assert_eq!(insight.meeting_hours, 4.0);
        assert_eq!(insight.completion_rate, Some(50.0));
        assert!(insight.bottlenecks.is_empty());
        assert_eq!(insight.team_efficiency, 100);
        assert_eq!(insight.predicted_improvement.percentage_gain, 15);
        assert_eq!(insight.recommendations.len(), 2);
        assert_eq!(insight.automation_opportunities.len(), 4);
    }

    #[test]
    fn every_bottleneck_triggers() {
        let tasks = vec![
            row(SheetStatus::Pending, SourceChannel::Whatsapp),
            row(SheetStatus::InProgress, SourceChannel::Whatsapp),
            row(SheetStatus::Completed, SourceChannel::Whatsapp),
        ];
        let insight = productivity_insight("Sprint", &meetings(4, 4), &tasks);

        assert_eq!(insight.meeting_hours, 16.0);
        assert_eq!(insight.bottlenecks.len(), 3);
        assert_eq!(insight.team_efficiency, 55);
        assert_eq!(insight.predicted_improvement.percentage_gain, 45);
        assert_eq!(insight.recommendations.len(), 3);
    }

    #[test]
    fn empty_sheet_has_no_rate() {
        let insight = productivity_insight("Idle", &[], &[]);
        assert_eq!(insight.completion_rate, None);
        assert!(insight.bottlenecks.is_empty());
        assert_eq!(insight.meeting_hours, 0.0);
    }
}
