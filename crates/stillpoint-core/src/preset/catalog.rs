//! Built-in presets and the validated catalog the session selects from.
//!
//! Every preset goes through [`Preset::validate`] on the way in, so the
//! session never has to handle an empty cycle or a zero-length phase.

use tracing::warn;

use super::types::{Phase, PhaseKind, Preset};
use crate::error::PresetError;

/// Preset selected when nothing else is configured.
pub const DEFAULT_PRESET_ID: &str = "box";

/// Ordered, id-indexed set of validated presets.
#[derive(Debug, Clone, Default)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
}

impl PresetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding only the built-in presets.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for preset in builtin_presets() {
            // Built-ins are covered by tests; a failure here is a programming error.
            if let Err(e) = catalog.insert(preset) {
                warn!(error = %e, "skipping invalid built-in preset");
            }
        }
        catalog
    }

    /// Built-ins followed by user presets.
    ///
    /// # Errors
    ///
    /// Returns the first custom preset that fails validation or reuses an id.
    pub fn with_custom(custom: &[Preset]) -> Result<Self, PresetError> {
        let mut catalog = Self::builtin();
        for preset in custom {
            catalog.insert(preset.clone())?;
        }
        Ok(catalog)
    }

    /// Validate and append a preset.
    ///
    /// # Errors
    ///
    /// Returns the validation error, or `DuplicateId` if the id is taken.
    pub fn insert(&mut self, preset: Preset) -> Result<(), PresetError> {
        preset.validate()?;
        if self.get(&preset.id).is_some() {
            return Err(PresetError::DuplicateId(preset.id));
        }
        self.presets.push(preset);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.id == id)
    }

    /// Like [`get`](Self::get) but with an error for unknown ids.
    pub fn require(&self, id: &str) -> Result<&Preset, PresetError> {
        self.get(id)
            .ok_or_else(|| PresetError::UnknownPreset(id.to_string()))
    }

    pub fn ids(&self) -> Vec<&str> {
        self.presets.iter().map(|p| p.id.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

/// Returns all built-in presets.
pub fn builtin_presets() -> Vec<Preset> {
    vec![
        box_breathing(),
        relaxing_breath(),
        coherent_breathing(),
        double_inhale(),
        pomodoro_focus(),
        deep_focus(),
    ]
}

// ============================================================================
// BREATHING
// ============================================================================

fn box_breathing() -> Preset {
    Preset::breathing(
        DEFAULT_PRESET_ID,
        "Box Breathing",
        vec![
            Phase::inhale(4.0),
            Phase::hold(4.0),
            Phase::exhale(4.0),
            Phase::hold(4.0),
        ],
    )
    .with_description(indoc::indoc! {"
        Four equal sides: breathe in, hold, breathe out, hold, four
        seconds each. A steady rhythm for settling before focused work.
    "})
}

/// 4-7-8
fn relaxing_breath() -> Preset {
    Preset::breathing(
        "4-7-8",
        "Relaxing Breath",
        vec![
            Phase::inhale(4.0),
            Phase::hold(7.0),
            Phase::new("Exhale slowly", PhaseKind::Exhale, 8.0),
        ],
    )
    .with_description(indoc::indoc! {"
        Inhale quietly through the nose for four, hold for seven, then
        exhale fully through the mouth for eight. The long exhale makes
        this one suited to winding down.
    "})
}

fn coherent_breathing() -> Preset {
    Preset::breathing(
        "coherent",
        "Coherent Breathing",
        vec![Phase::inhale(5.5), Phase::exhale(5.5)],
    )
    .with_description(indoc::indoc! {"
        Even inhales and exhales of five and a half seconds, around
        five and a half breaths per minute.
    "})
}

fn double_inhale() -> Preset {
    Preset::breathing(
        "sigh",
        "Double Inhale",
        vec![
            Phase::inhale(2.0),
            Phase::new("Top up", PhaseKind::Inhale, 1.0),
            Phase::new("Long exhale", PhaseKind::Exhale, 6.0),
        ],
    )
    .with_description(indoc::indoc! {"
        A full inhale, a short second sip of air, then a long slow
        exhale.
    "})
}

// ============================================================================
// TIMERS
// ============================================================================

fn pomodoro_focus() -> Preset {
    Preset::timer("focus-25", "Focus 25", 25.0).with_description(indoc::indoc! {"
        A single 25 minute focus block.
    "})
}

fn deep_focus() -> Preset {
    Preset::timer("focus-50", "Deep Focus 50", 50.0).with_description(indoc::indoc! {"
        A single 50 minute block for work that needs a longer run-up.
    "})
}
