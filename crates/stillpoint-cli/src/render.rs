//! Terminal rendering of session frames.

use stillpoint_core::session::{PEAK_SCALE, REST_SCALE};
use stillpoint_core::{Event, Frame, RunState};

/// `mm:ss`
pub fn clock(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Bar whose filled part tracks the visual scale (breathing) or the
/// countdown progress (timers).
pub fn bar(frame: &Frame, width: usize) -> String {
    let fill = if frame.phase_kind.is_some() {
        (frame.scale - REST_SCALE) / (PEAK_SCALE - REST_SCALE)
    } else {
        frame.progress
    };
    let filled = ((fill.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn status_line(frame: &Frame, bar_width: Option<usize>) -> String {
    let state = match frame.state {
        RunState::Idle => "idle",
        RunState::Running => "",
        RunState::Paused => "paused",
        RunState::Completed => "done",
    };
    let mut line = format!("{:<14} {:>4}s", frame.label, frame.display_seconds);
    if let Some(width) = bar_width {
        line.push_str("  ");
        line.push_str(&bar(frame, width));
    }
    line.push_str(&format!("  {}", clock(frame.total_elapsed)));
    if !state.is_empty() {
        line.push_str(&format!("  ({state})"));
    }
    line
}

/// One-line description of an event for the live view; `None` for events
/// the status line already shows.
pub fn event_line(event: &Event) -> Option<String> {
    match event {
        Event::PhaseAdvanced {
            label,
            duration_seconds,
            ..
        } => Some(format!("-> {label} ({duration_seconds}s)")),
        Event::SessionCompleted { total_elapsed, .. } => {
            Some(format!("Session complete after {}", clock(*total_elapsed)))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stillpoint_core::PhaseKind;

    fn frame(kind: Option<PhaseKind>, scale: f64, progress: f64) -> Frame {
        Frame {
            state: RunState::Running,
            preset_id: "box".into(),
            phase_index: 0,
            label: "Inhale".into(),
            phase_kind: kind,
            remaining_seconds: 2.5,
            display_seconds: 3,
            total_elapsed: 75.0,
            progress,
            scale,
        }
    }

    #[test]
    fn clock_formats_minutes() {
        assert_eq!(clock(0.0), "00:00");
        assert_eq!(clock(75.9), "01:15");
        assert_eq!(clock(-3.0), "00:00");
    }

    #[test]
    fn bar_tracks_scale_for_breathing() {
        assert_eq!(bar(&frame(Some(PhaseKind::Inhale), 1.0, 0.0), 4), "[----]");
        assert_eq!(bar(&frame(Some(PhaseKind::Inhale), 1.4, 0.5), 4), "[##--]");
        assert_eq!(bar(&frame(Some(PhaseKind::Hold), 1.8, 0.2), 4), "[####]");
    }

    #[test]
    fn bar_tracks_progress_for_timers() {
        assert_eq!(bar(&frame(None, 1.0, 0.75), 4), "[###-]");
    }

    #[test]
    fn status_line_shows_label_and_time() {
        let line = status_line(&frame(Some(PhaseKind::Inhale), 1.4, 0.5), None);
        assert!(line.starts_with("Inhale"));
        assert!(line.contains("3s"));
        assert!(line.contains("01:15"));
        assert!(!line.contains('['));
    }
}
