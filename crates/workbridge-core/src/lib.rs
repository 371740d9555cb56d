//! # Workbridge Core Library
//!
//! This library provides the scheduling analysis behind Workbridge: given a
//! candidate work item and a snapshot of committed calendar events, it decides
//! whether the item collides with existing commitments, finds free slots,
//! measures workload, and proposes ranked remediation options.
//!
//! ## Architecture
//!
//! - **Calendar**: Local-day windows, event model and instant parsing
//! - **Scheduler**: Conflict detection, availability scanning and workload aggregation
//! - **Suggestions**: Ranked, typed remediation options
//! - **Analysis**: The single-item pipeline tying the above together
//! - **Extraction**: Rule-based conversion of free text and bot payloads into candidates
//! - **Sync**: Partial-success fan-out of accepted items to collaborators
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`Analyzer`]: Runs the analysis pipeline
//! - [`ConflictDetector`]: Same-day or interval-overlap collision checks
//! - [`AvailabilityScanner`]: Lazy business-hours slot scan
//! - [`SuggestionGenerator`]: Builds ranked suggestions
//! - [`SyncOrchestrator`]: Pushes an accepted item to sheet, calendar and messaging
//! - [`Config`]: Application configuration management

pub mod analysis;
pub mod calendar;
pub mod error;
pub mod extract;
pub mod insight;
pub mod scheduler;
pub mod storage;
pub mod suggestion;
pub mod sync;
pub mod task;

pub use analysis::{analyze, AnalysisResult, Analyzer, AnalyzerConfig};
pub use calendar::{parse_instant, DayWindow, ScheduledEvent};
pub use error::{CollaboratorError, ConfigError, CoreError, Result, ValidationError};
pub use extract::{BotTask, Difficulty, Extractor, KeywordExtractor};
pub use insight::{productivity_insight, ProductivityInsight};
pub use scheduler::{
    compute_workload, detect_conflict, detect_conflicts, find_available_slots, Availability, AvailabilityScanner,
    AvailabilitySlot, ConflictDetector, ConflictPolicy, ConflictResult, ScanWindow, WorkloadSnapshot,
};
pub use storage::Config;
pub use suggestion::{generate_suggestions, Suggestion, SuggestionDetail, SuggestionGenerator, SuggestionKind};
pub use sync::{SyncOrchestrator, SyncReport};
pub use task::{CandidateWorkItem, Priority, SourceChannel};
