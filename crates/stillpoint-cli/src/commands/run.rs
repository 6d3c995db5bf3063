//! Live terminal session.
//!
//! This loop is the frame source: it sleeps one frame interval, reads the
//! monotonic clock and hands the timestamp to the session.

use std::io::Write;
use std::time::{Duration, Instant};

use clap::Args;
use stillpoint_core::{Config, RunState};
use tracing::info;

use super::open_session;
use crate::render;

#[derive(Args)]
pub struct RunArgs {
    /// Preset ID (defaults to session.default_preset)
    pub preset: Option<String>,
    /// Override the length of a timer preset, in minutes
    #[arg(long)]
    pub minutes: Option<f64>,
    /// Frames per second (defaults to display.fps)
    #[arg(long)]
    pub fps: Option<u32>,
    /// Stop a breathing session after this many cycles
    #[arg(long, conflicts_with = "duration")]
    pub cycles: Option<u32>,
    /// Stop after this many seconds of session time
    #[arg(long)]
    pub duration: Option<f64>,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut session = open_session(&config, args.preset.as_deref(), args.minutes)?;

    let fps = args.fps.unwrap_or(config.display.fps).max(1);
    let frame_interval = Duration::from_secs_f64(1.0 / f64::from(fps));
    let bar_width = config
        .display
        .show_scale_bar
        .then_some(config.display.bar_width as usize);
    let stop_after = match (args.cycles, args.duration) {
        (Some(_), _) if !session.preset().is_breathing() => {
            return Err(format!(
                "--cycles needs a breathing preset; '{}' is a timer",
                session.preset().id
            )
            .into());
        }
        (Some(cycles), _) => Some(f64::from(cycles) * session.preset().cycle_seconds()),
        (None, duration) => duration,
    };

    println!("{}", session.preset().name);
    info!(preset = %session.preset().id, fps, ?stop_after, "starting live session");

    let origin = Instant::now();
    session.start();
    let mut stdout = std::io::stdout();
    loop {
        let now_ms = origin.elapsed().as_secs_f64() * 1000.0;
        let frame = session.on_tick(now_ms);

        for event in session.take_events() {
            if let Some(line) = render::event_line(&event) {
                write!(stdout, "\r\x1b[2K{line}\n")?;
            }
        }
        write!(stdout, "\r\x1b[2K{}", render::status_line(&frame, bar_width))?;
        stdout.flush()?;

        if frame.state == RunState::Completed {
            break;
        }
        if stop_after.is_some_and(|limit| frame.total_elapsed >= limit) {
            session.pause();
            break;
        }
        std::thread::sleep(frame_interval);
    }
    writeln!(stdout)?;
    Ok(())
}
