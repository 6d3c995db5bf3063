//! Phase scheduler.
//!
//! Sole owner of [`SessionProgress`]. Deltas come in from the session clock;
//! the scheduler decides which phase is active and how long it has left.
//!
//! Phase switching is a separate step from the decrement. When a phase
//! switches, the next one starts at its full nominal duration and any
//! overshoot is dropped. Under heavy frame jitter this lets real time drift
//! slightly from nominal cycle time.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PresetError;
use crate::preset::{Phase, Practice, Preset};

/// Tolerance (seconds) below which a phase counts as finished.
pub const PHASE_EPSILON: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionProgress {
    pub current_phase_index: usize,
    /// Seconds left in the current phase. Can sit a hair below zero until
    /// the switch step runs.
    pub phase_time_left: f64,
    pub total_elapsed: f64,
    /// Countdown for timer presets; `None` for breathing presets.
    pub timer_remaining: Option<f64>,
}

impl SessionProgress {
    fn initial(preset: &Preset) -> Self {
        match &preset.practice {
            Practice::Breathing { phases } => Self {
                current_phase_index: 0,
                phase_time_left: phases.first().map(|p| p.duration_seconds).unwrap_or(0.0),
                total_elapsed: 0.0,
                timer_remaining: None,
            },
            Practice::Timer { .. } => {
                let full = preset.cycle_seconds();
                Self {
                    current_phase_index: 0,
                    phase_time_left: full,
                    total_elapsed: 0.0,
                    timer_remaining: Some(full),
                }
            }
        }
    }
}

/// What a single `advance` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continued,
    PhaseAdvanced { from: usize, to: usize },
    /// Timer reached zero. Reported exactly once per run.
    Completed,
}

/// Restored schedulers go through [`PhaseScheduler::restore`], so the same
/// checks apply as for a fresh one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SchedulerState")]
pub struct PhaseScheduler {
    preset: Preset,
    progress: SessionProgress,
    completed: bool,
}

#[derive(Deserialize)]
struct SchedulerState {
    preset: Preset,
    progress: SessionProgress,
    #[serde(default)]
    completed: bool,
}

impl TryFrom<SchedulerState> for PhaseScheduler {
    type Error = PresetError;

    fn try_from(state: SchedulerState) -> Result<Self, Self::Error> {
        Self::restore(state.preset, state.progress, state.completed)
    }
}

impl PhaseScheduler {
    /// # Errors
    ///
    /// Rejects presets that fail [`Preset::validate`].
    pub fn new(preset: Preset) -> Result<Self, PresetError> {
        preset.validate()?;
        let progress = SessionProgress::initial(&preset);
        Ok(Self {
            preset,
            progress,
            completed: false,
        })
    }

    /// Rebuild a scheduler mid-session.
    ///
    /// # Errors
    ///
    /// Rejects invalid presets, and progress that points past the last phase,
    /// holds non-finite numbers or does not match the preset's practice.
    pub fn restore(
        preset: Preset,
        progress: SessionProgress,
        completed: bool,
    ) -> Result<Self, PresetError> {
        preset.validate()?;
        let invalid = |reason: String| PresetError::InvalidProgress {
            id: preset.id.clone(),
            reason,
        };
        let finite = progress.phase_time_left.is_finite()
            && progress.total_elapsed.is_finite()
            && progress.total_elapsed >= 0.0
            && progress.timer_remaining.map_or(true, f64::is_finite);
        if !finite {
            return Err(invalid("times must be finite".into()));
        }
        if preset.is_breathing() {
            let len = preset.phase_count();
            if progress.current_phase_index >= len {
                return Err(invalid(format!(
                    "phase index {} with {len} phases",
                    progress.current_phase_index
                )));
            }
            if progress.timer_remaining.is_some() || completed {
                return Err(invalid("breathing sessions have no countdown".into()));
            }
        } else {
            let full = preset.cycle_seconds();
            match progress.timer_remaining {
                Some(left) if (0.0..=full).contains(&left) => {}
                _ => return Err(invalid("countdown outside the timer length".into())),
            }
            if progress.current_phase_index != 0 {
                return Err(invalid("timers have a single phase".into()));
            }
        }
        Ok(Self {
            preset,
            progress,
            completed,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn preset(&self) -> &Preset {
        &self.preset
    }

    pub fn progress(&self) -> &SessionProgress {
        &self.progress
    }

    pub fn current_phase(&self) -> Option<&Phase> {
        self.preset.phase(self.progress.current_phase_index)
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    // ── Mutation ─────────────────────────────────────────────────────

    /// Consume `delta_seconds` of running time.
    pub fn advance(&mut self, delta_seconds: f64) -> StepOutcome {
        // NaN and negatives count as no time at all.
        let delta = delta_seconds.max(0.0);
        if self.preset.is_breathing() {
            self.progress.phase_time_left -= delta;
            self.progress.total_elapsed += delta;
            self.settle()
        } else {
            self.advance_timer(delta)
        }
    }

    /// Switch to the next phase if the current one is used up.
    ///
    /// Calling this again without a new `advance` is a no-op, because every
    /// phase is longer than [`PHASE_EPSILON`].
    pub fn settle(&mut self) -> StepOutcome {
        let phases = self.preset.phases();
        if phases.is_empty() || self.progress.phase_time_left > PHASE_EPSILON {
            return StepOutcome::Continued;
        }
        let from = self.progress.current_phase_index;
        let to = (from + 1) % phases.len();
        self.progress.current_phase_index = to;
        self.progress.phase_time_left = phases[to].duration_seconds;
        debug!(
            preset = %self.preset.id,
            from,
            to,
            label = %phases[to].label,
            "phase advanced"
        );
        StepOutcome::PhaseAdvanced { from, to }
    }

    /// Back to the first phase (or the full countdown) with nothing elapsed.
    pub fn reset(&mut self) {
        self.progress = SessionProgress::initial(&self.preset);
        self.completed = false;
    }

    fn advance_timer(&mut self, delta: f64) -> StepOutcome {
        if self.completed {
            return StepOutcome::Continued;
        }
        let remaining = self.progress.timer_remaining.unwrap_or(0.0);
        let consumed = delta.min(remaining);
        let left = remaining - delta;
        self.progress.total_elapsed += consumed;
        if left <= 0.0 {
            self.progress.timer_remaining = Some(0.0);
            self.progress.phase_time_left = 0.0;
            self.completed = true;
            return StepOutcome::Completed;
        }
        self.progress.timer_remaining = Some(left);
        self.progress.phase_time_left = left;
        StepOutcome::Continued
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::Phase;

    fn box_breathing() -> Preset {
        Preset::breathing(
            "box",
            "Box",
            vec![
                Phase::inhale(4.0),
                Phase::hold(4.0),
                Phase::exhale(4.0),
                Phase::hold(4.0),
            ],
        )
    }

    #[test]
    fn starts_at_first_phase() {
        let s = PhaseScheduler::new(box_breathing()).unwrap();
        assert_eq!(s.progress().current_phase_index, 0);
        assert_eq!(s.progress().phase_time_left, 4.0);
        assert_eq!(s.progress().timer_remaining, None);
    }

    #[test]
    fn rejects_invalid_preset() {
        assert!(PhaseScheduler::new(Preset::breathing("x", "X", vec![])).is_err());
    }

    #[test]
    fn restore_rejects_index_past_last_phase() {
        let json = serde_json::json!({
            "preset": {
                "id": "one",
                "name": "One",
                "kind": "breathing",
                "phases": [{"kind": "inhale", "label": "In", "duration_seconds": 4.0}]
            },
            "progress": {
                "current_phase_index": 5,
                "phase_time_left": 1.0,
                "total_elapsed": 0.0,
                "timer_remaining": null
            }
        });
        assert!(serde_json::from_value::<PhaseScheduler>(json).is_err());
    }

    #[test]
    fn restore_rejects_zero_length_phase() {
        let mut preset = box_breathing();
        let progress = SessionProgress::initial(&preset);
        if let Practice::Breathing { phases } = &mut preset.practice {
            phases[1].duration_seconds = 0.0;
        }
        assert!(matches!(
            PhaseScheduler::restore(preset, progress, false),
            Err(PresetError::NonPositiveDuration { .. })
        ));
    }

    #[test]
    fn serialized_scheduler_restores() {
        let mut s = PhaseScheduler::new(box_breathing()).unwrap();
        s.advance(5.0);
        let json = serde_json::to_value(&s).unwrap();
        let back: PhaseScheduler = serde_json::from_value(json).unwrap();
        assert_eq!(back.progress(), s.progress());
    }

    #[test]
    fn switches_at_boundary() {
        let mut s = PhaseScheduler::new(box_breathing()).unwrap();
        assert_eq!(s.advance(3.0), StepOutcome::Continued);
        assert_eq!(
            s.advance(1.0),
            StepOutcome::PhaseAdvanced { from: 0, to: 1 }
        );
        assert_eq!(s.progress().phase_time_left, 4.0);
        assert_eq!(s.progress().total_elapsed, 4.0);
    }

    #[test]
    fn switches_within_epsilon() {
        let mut s = PhaseScheduler::new(box_breathing()).unwrap();
        assert_eq!(
            s.advance(3.96),
            StepOutcome::PhaseAdvanced { from: 0, to: 1 }
        );
    }

    #[test]
    fn settle_is_idempotent() {
        let mut s = PhaseScheduler::new(box_breathing()).unwrap();
        s.advance(4.0);
        assert_eq!(s.settle(), StepOutcome::Continued);
        assert_eq!(s.progress().current_phase_index, 1);
    }

    #[test]
    fn overshoot_drops_remainder() {
        let mut s = PhaseScheduler::new(box_breathing()).unwrap();
        assert_eq!(
            s.advance(9.0),
            StepOutcome::PhaseAdvanced { from: 0, to: 1 }
        );
        assert_eq!(s.progress().current_phase_index, 1);
        assert_eq!(s.progress().phase_time_left, 4.0);
        assert_eq!(s.progress().total_elapsed, 9.0);
    }

    #[test]
    fn wraps_after_last_phase() {
        let mut s = PhaseScheduler::new(box_breathing()).unwrap();
        for _ in 0..3 {
            s.advance(4.0);
        }
        assert_eq!(s.progress().current_phase_index, 3);
        assert_eq!(
            s.advance(4.0),
            StepOutcome::PhaseAdvanced { from: 3, to: 0 }
        );
    }

    #[test]
    fn negative_and_nan_deltas_are_ignored() {
        let mut s = PhaseScheduler::new(box_breathing()).unwrap();
        s.advance(-5.0);
        s.advance(f64::NAN);
        assert_eq!(s.progress().phase_time_left, 4.0);
        assert_eq!(s.progress().total_elapsed, 0.0);
    }

    #[test]
    fn timer_counts_down_and_completes_once() {
        let mut s = PhaseScheduler::new(Preset::timer("t", "T", 1.0)).unwrap();
        assert_eq!(s.progress().timer_remaining, Some(60.0));
        assert_eq!(s.advance(59.5), StepOutcome::Continued);
        assert_eq!(s.progress().timer_remaining, Some(0.5));
        assert_eq!(s.advance(2.0), StepOutcome::Completed);
        assert_eq!(s.progress().timer_remaining, Some(0.0));
        assert_eq!(s.progress().total_elapsed, 60.0);
        assert_eq!(s.advance(1.0), StepOutcome::Continued);
        assert_eq!(s.progress().total_elapsed, 60.0);
        assert!(s.is_completed());
    }

    #[test]
    fn reset_restores_initial_progress() {
        let mut s = PhaseScheduler::new(Preset::timer("t", "T", 1.0)).unwrap();
        s.advance(120.0);
        s.reset();
        assert!(!s.is_completed());
        assert_eq!(s.progress().timer_remaining, Some(60.0));
        assert_eq!(s.progress().total_elapsed, 0.0);
    }
}
