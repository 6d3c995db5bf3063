use serde::{Deserialize, Serialize};

use crate::error::PresetError;
use crate::session::PHASE_EPSILON;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseKind {
    Inhale,
    Hold,
    Exhale,
}

/// One timed segment of a breathing cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub label: String,
    pub kind: PhaseKind,
    /// Duration in seconds.
    pub duration_seconds: f64,
}

impl Phase {
    pub fn new(label: impl Into<String>, kind: PhaseKind, duration_seconds: f64) -> Self {
        Self {
            label: label.into(),
            kind,
            duration_seconds,
        }
    }

    pub fn inhale(duration_seconds: f64) -> Self {
        Self::new("Inhale", PhaseKind::Inhale, duration_seconds)
    }

    pub fn hold(duration_seconds: f64) -> Self {
        Self::new("Hold", PhaseKind::Hold, duration_seconds)
    }

    pub fn exhale(duration_seconds: f64) -> Self {
        Self::new("Exhale", PhaseKind::Exhale, duration_seconds)
    }
}

/// What a preset actually runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Practice {
    /// Phases repeat in order, forever.
    Breathing { phases: Vec<Phase> },
    /// A single countdown that completes.
    Timer { default_duration_minutes: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub practice: Practice,
}

impl Preset {
    pub fn breathing(
        id: impl Into<String>,
        name: impl Into<String>,
        phases: Vec<Phase>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            practice: Practice::Breathing { phases },
        }
    }

    pub fn timer(id: impl Into<String>, name: impl Into<String>, minutes: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            practice: Practice::Timer {
                default_duration_minutes: minutes,
            },
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check the loader contract: non-empty phases and durations that the
    /// scheduler can actually run.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), PresetError> {
        if self.id.trim().is_empty() {
            return Err(PresetError::EmptyId);
        }
        match &self.practice {
            Practice::Breathing { phases } => {
                if phases.is_empty() {
                    return Err(PresetError::EmptyPhases {
                        id: self.id.clone(),
                    });
                }
                for (i, phase) in phases.iter().enumerate() {
                    let field = format!("phases[{i}].duration_seconds");
                    check_duration(&self.id, &field, phase.duration_seconds)?;
                }
                if !self.cycle_seconds().is_finite() {
                    return Err(PresetError::NonFiniteDuration {
                        id: self.id.clone(),
                        field: "phases".to_string(),
                    });
                }
                Ok(())
            }
            Practice::Timer {
                default_duration_minutes,
            } => {
                check_duration(&self.id, "default_duration_minutes", *default_duration_minutes)?;
                // The countdown runs in seconds, which must stay finite too.
                if !(default_duration_minutes * 60.0).is_finite() {
                    return Err(PresetError::NonFiniteDuration {
                        id: self.id.clone(),
                        field: "default_duration_minutes".to_string(),
                    });
                }
                Ok(())
            }
        }
    }

    pub fn is_breathing(&self) -> bool {
        matches!(self.practice, Practice::Breathing { .. })
    }

    /// Phases of a breathing preset; empty for timers.
    pub fn phases(&self) -> &[Phase] {
        match &self.practice {
            Practice::Breathing { phases } => phases,
            Practice::Timer { .. } => &[],
        }
    }

    pub fn phase(&self, index: usize) -> Option<&Phase> {
        self.phases().get(index)
    }

    pub fn phase_count(&self) -> usize {
        self.phases().len()
    }

    /// Full countdown of a timer preset in seconds.
    pub fn timer_seconds(&self) -> Option<f64> {
        match self.practice {
            Practice::Timer {
                default_duration_minutes,
            } => Some(default_duration_minutes * 60.0),
            Practice::Breathing { .. } => None,
        }
    }

    /// Nominal length of one breathing cycle, or of the whole countdown.
    pub fn cycle_seconds(&self) -> f64 {
        match &self.practice {
            Practice::Breathing { phases } => phases.iter().map(|p| p.duration_seconds).sum(),
            Practice::Timer {
                default_duration_minutes,
            } => default_duration_minutes * 60.0,
        }
    }

    /// Copy of a timer preset running for `minutes` instead of its default.
    ///
    /// # Errors
    ///
    /// Fails for breathing presets and for durations that do not validate.
    pub fn with_timer_minutes(&self, minutes: f64) -> Result<Self, PresetError> {
        if self.is_breathing() {
            return Err(PresetError::NotATimer {
                id: self.id.clone(),
            });
        }
        let mut preset = self.clone();
        preset.practice = Practice::Timer {
            default_duration_minutes: minutes,
        };
        preset.validate()?;
        Ok(preset)
    }
}

fn check_duration(id: &str, field: &str, value: f64) -> Result<(), PresetError> {
    if !value.is_finite() {
        return Err(PresetError::NonFiniteDuration {
            id: id.to_string(),
            field: field.to_string(),
        });
    }
    if value <= 0.0 {
        return Err(PresetError::NonPositiveDuration {
            id: id.to_string(),
            field: field.to_string(),
            value,
        });
    }
    // Only phases go through the switch step that needs the tolerance.
    if field.starts_with("phases") && value <= PHASE_EPSILON {
        return Err(PresetError::DurationBelowEpsilon {
            id: id.to_string(),
            field: field.to_string(),
            value,
            epsilon: PHASE_EPSILON,
        });
    }
    Ok(())
}
