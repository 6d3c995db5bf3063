//! Progress and visual-scale mapping.
//!
//! Pure functions, recomputed every frame. Inhale grows the scale from
//! [`REST_SCALE`] to [`PEAK_SCALE`], exhale shrinks it back, and a hold keeps
//! whatever scale the breath before it ended on.

use super::engine::RunState;
use super::scheduler::SessionProgress;
use crate::preset::{Phase, PhaseKind, Preset};

pub const REST_SCALE: f64 = 1.0;
pub const PEAK_SCALE: f64 = 1.8;
const SCALE_SPAN: f64 = 0.8;

/// 0.0 .. 1.0 progress through a phase of `duration` seconds.
pub fn phase_progress(time_left: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return 0.0;
    }
    let progress = 1.0 - time_left / duration;
    if progress.is_nan() {
        return 0.0;
    }
    progress.clamp(0.0, 1.0)
}

/// Scale held during the Hold phase at `index`.
///
/// Walks backwards through the cycle, wrapping from index 0 to the last
/// phase, past any consecutive holds. An all-hold cycle rests at 1.0.
pub fn hold_scale(phases: &[Phase], index: usize) -> f64 {
    let len = phases.len();
    if len == 0 {
        return REST_SCALE;
    }
    for step in 1..len {
        let prev = (index % len + len - step) % len;
        match phases[prev].kind {
            PhaseKind::Inhale => return PEAK_SCALE,
            PhaseKind::Exhale => return REST_SCALE,
            PhaseKind::Hold => continue,
        }
    }
    REST_SCALE
}

/// Scale for phase `index` with `time_left` seconds remaining.
pub fn phase_scale(phases: &[Phase], index: usize, time_left: f64) -> f64 {
    let Some(phase) = phases.get(index) else {
        return REST_SCALE;
    };
    let progress = phase_progress(time_left, phase.duration_seconds);
    match phase.kind {
        PhaseKind::Inhale => REST_SCALE + progress * SCALE_SPAN,
        PhaseKind::Exhale => PEAK_SCALE - progress * SCALE_SPAN,
        PhaseKind::Hold => hold_scale(phases, index),
    }
}

/// Scale the renderer should draw this frame.
///
/// Anything other than `Running` rests at 1.0 so an idle or paused session
/// never shows a stale mid-breath scale. Timers have no breath and always
/// rest.
pub fn visual_scale(state: RunState, preset: &Preset, progress: &SessionProgress) -> f64 {
    if state != RunState::Running {
        return REST_SCALE;
    }
    phase_scale(
        preset.phases(),
        progress.current_phase_index,
        progress.phase_time_left,
    )
}

/// Normalized progress for the frame: within the phase for breathing
/// presets, across the whole countdown for timers.
pub fn session_progress(preset: &Preset, progress: &SessionProgress) -> f64 {
    match (progress.timer_remaining, preset.timer_seconds()) {
        (Some(remaining), Some(full)) => phase_progress(remaining, full),
        _ => preset
            .phase(progress.current_phase_index)
            .map(|p| phase_progress(progress.phase_time_left, p.duration_seconds))
            .unwrap_or(0.0),
    }
}
