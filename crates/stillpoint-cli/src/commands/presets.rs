//! Preset catalog commands.

use clap::Subcommand;
use stillpoint_core::{Config, Practice, Preset};

use crate::render;

#[derive(Subcommand)]
pub enum PresetsAction {
    /// List all available presets
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show details for a specific preset
    Show {
        /// Preset ID (e.g., "box", "4-7-8", "focus-25")
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: PresetsAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let catalog = config.catalog()?;

    match action {
        PresetsAction::List { json } => {
            if json {
                let presets: Vec<&Preset> = catalog.iter().collect();
                println!("{}", serde_json::to_string_pretty(&presets)?);
                return Ok(());
            }
            for preset in catalog.iter() {
                let marker = if preset.id == config.session.default_preset {
                    "*"
                } else {
                    " "
                };
                println!(
                    "{marker} {:<12} {:<20} {}",
                    preset.id,
                    preset.name,
                    summary(preset)
                );
            }
        }
        PresetsAction::Show { id, json } => {
            let preset = catalog.require(&id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(preset)?);
                return Ok(());
            }
            println!("{} ({})", preset.name, preset.id);
            if !preset.description.is_empty() {
                println!();
                println!("{}", preset.description.trim_end());
            }
            println!();
            match &preset.practice {
                Practice::Breathing { phases } => {
                    for (i, phase) in phases.iter().enumerate() {
                        println!(
                            "  {}. {:<14} {:>5}s  {:?}",
                            i + 1,
                            phase.label,
                            phase.duration_seconds,
                            phase.kind
                        );
                    }
                    println!("  cycle: {}s", preset.cycle_seconds());
                }
                Practice::Timer { .. } => {
                    println!("  countdown: {}", render::clock(preset.cycle_seconds()));
                }
            }
        }
    }
    Ok(())
}

fn summary(preset: &Preset) -> String {
    match &preset.practice {
        Practice::Breathing { phases } => phases
            .iter()
            .map(|p| p.duration_seconds.to_string())
            .collect::<Vec<_>>()
            .join("-"),
        Practice::Timer {
            default_duration_minutes,
        } => format!("{default_duration_minutes} min timer"),
    }
}
