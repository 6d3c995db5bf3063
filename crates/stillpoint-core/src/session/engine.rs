//! Session controller.
//!
//! A wall-clock-driven state machine. It does not spawn threads or timers;
//! an external frame source calls [`Session::on_tick`] with a timestamp each
//! frame, and the UI layer issues commands in between.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Running --pause--> Paused --start--> Running
//! Running --(timer reaches zero)--> Completed
//! any --reset / select_preset--> Idle
//! ```
//!
//! Only `Running` sessions consume ticks. Every transition out of `Running`
//! clears the clock baseline, so resuming never replays the paused interval.
//!
//! ## Usage
//!
//! ```ignore
//! let mut session = Session::new(PresetCatalog::builtin(), "box")?;
//! session.start();
//! // Each frame:
//! let frame = session.on_tick(now_ms);
//! render(frame.scale, frame.display_seconds);
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use super::clock::SessionClock;
use super::scheduler::{PhaseScheduler, SessionProgress, StepOutcome};
use super::visual;
use crate::error::PresetError;
use crate::events::Event;
use crate::preset::{PhaseKind, Preset, PresetCatalog};

/// Label shown for timer presets, which have no phases.
pub const TIMER_LABEL: &str = "Focus";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Idle,
    Running,
    Paused,
    /// Terminal for timer presets only.
    Completed,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub state: RunState,
    pub preset_id: String,
    pub phase_index: usize,
    pub label: String,
    /// `None` for timer presets.
    pub phase_kind: Option<PhaseKind>,
    /// Exact seconds left in the phase (or countdown).
    pub remaining_seconds: f64,
    /// `remaining_seconds` rounded up for display.
    pub display_seconds: u64,
    pub total_elapsed: f64,
    /// 0.0 .. 1.0
    pub progress: f64,
    pub scale: f64,
}

#[derive(Debug, Clone)]
pub struct Session {
    catalog: PresetCatalog,
    state: RunState,
    clock: SessionClock,
    scheduler: PhaseScheduler,
    pending: Vec<Event>,
}

impl Session {
    /// Create an idle session on `preset_id` from `catalog`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownPreset` if the catalog has no such id.
    pub fn new(catalog: PresetCatalog, preset_id: &str) -> Result<Self, PresetError> {
        let preset = catalog.require(preset_id)?.clone();
        let scheduler = PhaseScheduler::new(preset)?;
        Ok(Self {
            catalog,
            state: RunState::Idle,
            clock: SessionClock::new(),
            scheduler,
            pending: Vec::new(),
        })
    }

    /// Session over a single preset, validated here.
    ///
    /// # Errors
    ///
    /// Returns the validation error if the preset is invalid.
    pub fn from_preset(preset: Preset) -> Result<Self, PresetError> {
        let id = preset.id.clone();
        let mut catalog = PresetCatalog::new();
        catalog.insert(preset)?;
        Self::new(catalog, &id)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn preset(&self) -> &Preset {
        self.scheduler.preset()
    }

    pub fn progress(&self) -> &SessionProgress {
        self.scheduler.progress()
    }

    pub fn catalog(&self) -> &PresetCatalog {
        &self.catalog
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    /// Render record for the current state. Recomputed on every call.
    pub fn frame(&self) -> Frame {
        let preset = self.preset();
        let progress = self.progress();
        let (label, phase_kind) = match self.scheduler.current_phase() {
            Some(phase) => (phase.label.clone(), Some(phase.kind)),
            None => (TIMER_LABEL.to_string(), None),
        };
        let remaining = progress
            .timer_remaining
            .unwrap_or(progress.phase_time_left)
            .max(0.0);
        Frame {
            state: self.state,
            preset_id: preset.id.clone(),
            phase_index: progress.current_phase_index,
            label,
            phase_kind,
            remaining_seconds: remaining,
            display_seconds: remaining.ceil() as u64,
            total_elapsed: progress.total_elapsed,
            progress: visual::session_progress(preset, progress),
            scale: visual::visual_scale(self.state, preset, progress),
        }
    }

    /// Events raised by ticks since the last call.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.pending)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start from `Idle`, or resume from `Paused`. No-op otherwise.
    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            RunState::Idle => {
                self.enter_running();
                info!(preset = %self.preset().id, "session started");
                Some(Event::SessionStarted {
                    preset_id: self.preset().id.clone(),
                    phase_index: self.progress().current_phase_index,
                    at: Utc::now(),
                })
            }
            RunState::Paused => {
                self.enter_running();
                info!(preset = %self.preset().id, "session resumed");
                Some(Event::SessionResumed {
                    phase_index: self.progress().current_phase_index,
                    remaining_seconds: self.frame().remaining_seconds,
                    at: Utc::now(),
                })
            }
            RunState::Running | RunState::Completed => None,
        }
    }

    /// Alias for [`start`](Self::start) that reads better from `Paused`.
    pub fn resume(&mut self) -> Option<Event> {
        if self.state != RunState::Paused {
            return None;
        }
        self.start()
    }

    /// Freeze a running session. No-op in any other state.
    pub fn pause(&mut self) -> Option<Event> {
        if self.state != RunState::Running {
            return None;
        }
        self.leave_running(RunState::Paused);
        info!(preset = %self.preset().id, "session paused");
        let progress = *self.progress();
        Some(Event::SessionPaused {
            phase_index: progress.current_phase_index,
            remaining_seconds: self.frame().remaining_seconds,
            total_elapsed: progress.total_elapsed,
            at: Utc::now(),
        })
    }

    /// Back to `Idle` at the first phase of the current preset.
    pub fn reset(&mut self) -> Event {
        self.leave_running(RunState::Idle);
        self.clock.reset();
        self.scheduler.reset();
        self.pending.clear();
        info!(preset = %self.preset().id, "session reset");
        Event::SessionReset {
            preset_id: self.preset().id.clone(),
            at: Utc::now(),
        }
    }

    /// Switch to another catalog preset and reinitialize from scratch.
    ///
    /// # Errors
    ///
    /// Returns `UnknownPreset` if the id is not in the catalog. The current
    /// session is left untouched in that case.
    pub fn select_preset(&mut self, preset_id: &str) -> Result<Event, PresetError> {
        let preset = self.catalog.require(preset_id)?.clone();
        let scheduler = PhaseScheduler::new(preset)?;
        self.leave_running(RunState::Idle);
        self.clock.reset();
        self.scheduler = scheduler;
        self.pending.clear();
        info!(preset = %preset_id, "preset selected");
        Ok(Event::PresetSelected {
            preset_id: preset_id.to_string(),
            at: Utc::now(),
        })
    }

    /// Advance by one frame. Returns the frame to render.
    ///
    /// Ticks outside `Running` change nothing, which keeps a late callback
    /// from mutating a paused or reset session.
    pub fn on_tick(&mut self, now_ms: f64) -> Frame {
        if self.state != RunState::Running {
            return self.frame();
        }
        let delta = self.clock.tick(now_ms);
        match self.scheduler.advance(delta) {
            StepOutcome::Continued => {}
            StepOutcome::PhaseAdvanced { from, to } => {
                if let Some(phase) = self.preset().phase(to) {
                    self.pending.push(Event::PhaseAdvanced {
                        from,
                        to,
                        kind: phase.kind,
                        label: phase.label.clone(),
                        duration_seconds: phase.duration_seconds,
                        at: Utc::now(),
                    });
                }
            }
            StepOutcome::Completed => {
                self.leave_running(RunState::Completed);
                info!(
                    preset = %self.preset().id,
                    total_elapsed = self.progress().total_elapsed,
                    "session completed"
                );
                self.pending.push(Event::SessionCompleted {
                    preset_id: self.preset().id.clone(),
                    total_elapsed: self.progress().total_elapsed,
                    at: Utc::now(),
                });
            }
        }
        let frame = self.frame();
        trace!(
            delta,
            phase = frame.phase_index,
            remaining = frame.remaining_seconds,
            scale = frame.scale,
            "tick"
        );
        frame
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn enter_running(&mut self) {
        self.clock.clear_baseline();
        self.state = RunState::Running;
    }

    fn leave_running(&mut self, next: RunState) {
        self.clock.clear_baseline();
        self.state = next;
    }
}
