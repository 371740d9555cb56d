//! Core error types for workbridge-core.
//!
//! The analysis pipeline itself has no failure paths; these errors cover the
//! fallible boundaries around it: configuration, input validation and the
//! external collaborators used during sync.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for workbridge-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// External collaborator errors
    #[error("Collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Config directory could not be determined or created
    #[error("Configuration directory unavailable: {0}")]
    DirUnavailable(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid time range
    #[error("Invalid time range: end_time ({end}) must be greater than start_time ({start})")]
    InvalidTimeRange {
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    },

    /// Unparseable date/time input
    #[error("Invalid date/time '{input}': expected RFC 3339, YYYY-MM-DDTHH:MM[:SS] or YYYY-MM-DD")]
    InvalidInstant { input: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Errors raised by calendar, sheet and messaging collaborators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollaboratorError {
    /// The collaborator rejected the request
    #[error("{system} rejected the request: {message}")]
    Rejected { system: String, message: String },

    /// The collaborator could not be reached
    #[error("{system} is unavailable")]
    Unavailable { system: String },
}

impl CollaboratorError {
    /// Name of the system that failed.
    pub fn system(&self) -> &str {
        match self {
            Self::Rejected { system, .. } | Self::Unavailable { system } => system,
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
