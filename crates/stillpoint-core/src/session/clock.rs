//! Session clock.
//!
//! Turns the timestamps handed in by an external frame source into
//! elapsed-second deltas. The clock knows nothing about phases.
//!
//! The first tick after a (re)start has no baseline and yields a zero delta.
//! Clearing the baseline whenever the session leaves `Running` is what keeps
//! a pause from showing up as one huge delta on resume.

use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct SessionClock {
    /// Timestamp (ms) of the previous tick in the current running period.
    baseline_ms: Option<f64>,
    /// Sum of every delta handed out since the last reset.
    accumulated_seconds: f64,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a frame timestamp (milliseconds) into seconds since the
    /// previous tick.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        if !now_ms.is_finite() {
            warn!(now_ms, "ignoring non-finite frame timestamp");
            return 0.0;
        }
        let delta = match self.baseline_ms {
            None => 0.0,
            // Out-of-order timestamps clamp to zero rather than rewinding.
            Some(prev) => ((now_ms - prev) / 1000.0).max(0.0),
        };
        self.baseline_ms = Some(now_ms);
        self.accumulated_seconds += delta;
        delta
    }

    /// Forget the baseline; the next tick starts a new running period.
    pub fn clear_baseline(&mut self) {
        self.baseline_ms = None;
    }

    pub fn reset(&mut self) {
        self.baseline_ms = None;
        self.accumulated_seconds = 0.0;
    }

    pub fn has_baseline(&self) -> bool {
        self.baseline_ms.is_some()
    }

    pub fn accumulated_seconds(&self) -> f64 {
        self.accumulated_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_zero() {
        let mut clock = SessionClock::new();
        assert_eq!(clock.tick(123_456.0), 0.0);
        assert!(clock.has_baseline());
    }

    #[test]
    fn subsequent_ticks_measure_gap() {
        let mut clock = SessionClock::new();
        clock.tick(1_000.0);
        assert_eq!(clock.tick(1_250.0), 0.25);
        assert_eq!(clock.tick(2_250.0), 1.0);
        assert_eq!(clock.accumulated_seconds(), 1.25);
    }

    #[test]
    fn backwards_timestamp_clamps_and_rebases() {
        let mut clock = SessionClock::new();
        clock.tick(5_000.0);
        assert_eq!(clock.tick(4_000.0), 0.0);
        // Baseline moved to 4000 unconditionally.
        assert_eq!(clock.tick(4_500.0), 0.5);
    }

    #[test]
    fn cleared_baseline_skips_gap() {
        let mut clock = SessionClock::new();
        clock.tick(0.0);
        clock.tick(1_000.0);
        clock.clear_baseline();
        assert_eq!(clock.tick(60_000.0), 0.0);
        assert_eq!(clock.tick(60_500.0), 0.5);
        assert_eq!(clock.accumulated_seconds(), 1.5);
    }

    #[test]
    fn non_finite_timestamp_is_ignored() {
        let mut clock = SessionClock::new();
        clock.tick(1_000.0);
        assert_eq!(clock.tick(f64::NAN), 0.0);
        assert_eq!(clock.tick(f64::INFINITY), 0.0);
        assert_eq!(clock.tick(2_000.0), 1.0);
    }

    #[test]
    fn reset_clears_everything() {
        let mut clock = SessionClock::new();
        clock.tick(0.0);
        clock.tick(3_000.0);
        clock.reset();
        assert!(!clock.has_baseline());
        assert_eq!(clock.accumulated_seconds(), 0.0);
    }
}
