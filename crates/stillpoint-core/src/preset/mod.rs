mod catalog;
mod types;

pub use catalog::{builtin_presets, PresetCatalog, DEFAULT_PRESET_ID};
pub use types::{Phase, PhaseKind, Practice, Preset};
