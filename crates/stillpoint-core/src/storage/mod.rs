mod config;

pub use config::{Config, DisplayConfig, SessionConfig};

use std::path::PathBuf;

/// Returns `~/.config/stillpoint[-dev]/` based on STILLPOINT_ENV.
///
/// Set STILLPOINT_ENV=dev to use the development directory, or
/// STILLPOINT_CONFIG_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn config_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("STILLPOINT_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env =
                std::env::var("STILLPOINT_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("stillpoint-dev")
            } else {
                base_dir.join("stillpoint")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
