pub mod config;
pub mod presets;
pub mod run;
pub mod simulate;

use stillpoint_core::{Config, Session};

/// Build an idle session from the user's config.
///
/// `preset` falls back to the configured default; `minutes` (or the
/// configured `session.timer_minutes`) overrides the length of timer presets.
pub fn open_session(
    config: &Config,
    preset: Option<&str>,
    minutes: Option<f64>,
) -> Result<Session, Box<dyn std::error::Error>> {
    let catalog = config.catalog()?;
    let id = preset.unwrap_or(&config.session.default_preset);
    let selected = catalog.require(id)?;

    let minutes = minutes.or(config.session.timer_minutes);
    match minutes {
        Some(m) if !selected.is_breathing() => {
            let preset = selected.with_timer_minutes(m)?;
            Ok(Session::from_preset(preset)?)
        }
        _ => Ok(Session::new(catalog, id)?),
    }
}
