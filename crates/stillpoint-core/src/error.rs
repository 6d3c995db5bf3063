//! Core error types for stillpoint-core.
//!
//! Presets are validated once, when they enter a [`PresetCatalog`](crate::PresetCatalog)
//! or a session. Past that point every session command is total, so the
//! engine itself has no error surface.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for stillpoint-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Preset validation or lookup errors
    #[error("Preset error: {0}")]
    Preset(#[from] PresetError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons a preset is rejected at load time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PresetError {
    #[error("preset id must not be empty")]
    EmptyId,

    /// Breathing preset without any phase
    #[error("preset '{id}' has no phases")]
    EmptyPhases { id: String },

    #[error("preset '{id}': {field} must be greater than zero (got {value})")]
    NonPositiveDuration {
        id: String,
        field: String,
        value: f64,
    },

    #[error("preset '{id}': {field} is not a finite number")]
    NonFiniteDuration { id: String, field: String },

    /// Shorter than the phase-switch tolerance; such a phase would be
    /// skipped the moment it became active.
    #[error("preset '{id}': {field} ({value}s) must be longer than {epsilon}s")]
    DurationBelowEpsilon {
        id: String,
        field: String,
        value: f64,
        epsilon: f64,
    },

    #[error("preset '{id}' is not a timer")]
    NotATimer { id: String },

    #[error("progress does not fit preset '{id}': {reason}")]
    InvalidProgress { id: String, reason: String },

    #[error("duplicate preset id: {0}")]
    DuplicateId(String),

    #[error("unknown preset: {0}")]
    UnknownPreset(String),
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

    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
