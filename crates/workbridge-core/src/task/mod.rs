//! Candidate work items.
//!
//! A candidate is a task or meeting inferred from free-form input that has not
//! been committed to any calendar yet. The analyzer reads candidates but never
//! mutates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use std::str::FromStr;

/// Hours assumed when a candidate carries no estimate.
pub const DEFAULT_ESTIMATED_HOURS: f64 = 2.0;

/// Candidate priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(format!("unknown priority '{other}' (expected high, medium or low)")),
        }
    }
}

/// Channel a candidate was captured from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceChannel {
    Whatsapp,
    Slack,
    Email,
    #[default]
    Manual,
}

impl SourceChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Whatsapp => "whatsapp",
            Self::Slack => "slack",
            Self::Email => "email",
            Self::Manual => "manual",
        }
    }
}

impl fmt::Display for SourceChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "whatsapp" | "wa" => Ok(Self::Whatsapp),
            "slack" => Ok(Self::Slack),
            "email" => Ok(Self::Email),
            "manual" => Ok(Self::Manual),
            other => Err(format!("unknown source channel '{other}'")),
        }
    }
}

/// A proposed unit of work extracted from input.
///
/// Wire shape (camelCase): `title`, `description`, `dueDate`,
/// `estimatedHours`, `priority`, `source`, `confidence`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateWorkItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub source: SourceChannel,
    /// Extraction confidence in `[0, 1]`.
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

fn default_confidence() -> f64 {
    1.0
}

impl CandidateWorkItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            due_date: None,
            estimated_hours: None,
            priority: Priority::default(),
            source: SourceChannel::default(),
            confidence: default_confidence(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours.max(0.0));
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_source(mut self, source: SourceChannel) -> Self {
        self.source = source;
        self
    }

    /// Set confidence, clamped into `[0, 1]`.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    /// Estimated hours, falling back to [`DEFAULT_ESTIMATED_HOURS`].
    pub fn effective_hours(&self) -> f64 {
        self.estimated_hours.unwrap_or(DEFAULT_ESTIMATED_HOURS)
    }

    pub fn is_high_priority(&self) -> bool {
        self.priority == Priority::High
    }

    /// Check field ranges the builders enforce, e.g. after deserializing.
    ///
    /// `estimatedHours` must be finite and non-negative; `confidence` must lie
    /// in `[0, 1]`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(hours) = self.estimated_hours {
            if !hours.is_finite() || hours < 0.0 {
                return Err(ValidationError::InvalidValue {
                    field: "estimatedHours".into(),
                    message: format!("expected a finite, non-negative number of hours, got {hours}"),
                });
            }
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(ValidationError::InvalidValue {
                field: "confidence".into(),
                message: format!("expected a value in [0, 1], got {}", self.confidence),
            });
        }
        Ok(())
    }
}
