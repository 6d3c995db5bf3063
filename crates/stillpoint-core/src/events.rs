use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::preset::PhaseKind;

/// Every state change in a session produces an Event.
/// Commands hand theirs back directly; events raised by ticks are queued
/// until the caller drains them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    PresetSelected {
        preset_id: String,
        at: DateTime<Utc>,
    },
    SessionStarted {
        preset_id: String,
        phase_index: usize,
        at: DateTime<Utc>,
    },
    SessionPaused {
        phase_index: usize,
        remaining_seconds: f64,
        total_elapsed: f64,
        at: DateTime<Utc>,
    },
    SessionResumed {
        phase_index: usize,
        remaining_seconds: f64,
        at: DateTime<Utc>,
    },
    SessionReset {
        preset_id: String,
        at: DateTime<Utc>,
    },
    PhaseAdvanced {
        from: usize,
        to: usize,
        kind: PhaseKind,
        label: String,
        duration_seconds: f64,
        at: DateTime<Utc>,
    },
    /// Timer presets only; breathing cycles never complete.
    SessionCompleted {
        preset_id: String,
        total_elapsed: f64,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Snake-case name matching the serialized `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Event::PresetSelected { .. } => "preset_selected",
            Event::SessionStarted { .. } => "session_started",
            Event::SessionPaused { .. } => "session_paused",
            Event::SessionResumed { .. } => "session_resumed",
            Event::SessionReset { .. } => "session_reset",
            Event::PhaseAdvanced { .. } => "phase_advanced",
            Event::SessionCompleted { .. } => "session_completed",
        }
    }
}
