//! # Stillpoint Core Library
//!
//! This library provides the core logic for Stillpoint, a guided breathing
//! and focus timer. The CLI binary is a thin front end over it: it supplies
//! frame timestamps and draws whatever the session reports.
//!
//! ## Architecture
//!
//! - **Presets**: breathing cycles (Inhale/Hold/Exhale phases that repeat) and
//!   plain countdown timers, validated before a session can see them
//! - **Session**: a wall-clock-driven state machine that requires the caller
//!   to invoke `on_tick()` once per frame
//! - **Storage**: TOML-based configuration, including custom presets
//!
//! ## Key Components
//!
//! - [`Session`]: run-state controller and per-frame entry point
//! - [`SessionClock`]: timestamps to elapsed deltas
//! - [`PhaseScheduler`]: active phase and time left in it
//! - [`session::visual`]: progress and visual scale for the renderer
//! - [`PresetCatalog`]: validated built-in and custom presets
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod preset;
pub mod session;
pub mod storage;

pub use error::{ConfigError, CoreError, PresetError};
pub use events::Event;
pub use preset::{Phase, PhaseKind, Practice, Preset, PresetCatalog, DEFAULT_PRESET_ID};
pub use session::{
    Frame, PhaseScheduler, RunState, Session, SessionClock, SessionProgress, StepOutcome,
    PHASE_EPSILON,
};
pub use storage::Config;
