//! Deterministic session replay.
//!
//! Feeds the session synthetic timestamps at a fixed frame interval, with an
//! optional pause window, and prints JSON lines: events as they happen and a
//! frame every `--every` frames plus the final one.

use clap::Args;
use serde::Serialize;
use stillpoint_core::{Config, Event, Frame, RunState};

use super::open_session;

#[derive(Args)]
pub struct SimulateArgs {
    /// Preset ID (defaults to session.default_preset)
    pub preset: Option<String>,
    /// Wall-clock seconds to simulate
    #[arg(long)]
    pub seconds: f64,
    /// Milliseconds between frames
    #[arg(long, default_value_t = 1000.0 / 60.0)]
    pub frame_ms: f64,
    /// Override the length of a timer preset, in minutes
    #[arg(long)]
    pub minutes: Option<f64>,
    /// Pause once this many wall-clock seconds have passed
    #[arg(long)]
    pub pause_at: Option<f64>,
    /// Resume once this many wall-clock seconds have passed
    #[arg(long, requires = "pause_at")]
    pub resume_at: Option<f64>,
    /// Print a frame every N frames (0 prints only the final frame)
    #[arg(long, default_value_t = 0)]
    pub every: u64,
}

#[derive(Serialize)]
struct FrameLine<'a> {
    t_ms: f64,
    frame: &'a Frame,
}

pub fn run(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !(args.frame_ms.is_finite() && args.frame_ms > 0.0) {
        return Err(format!("--frame-ms must be positive (got {})", args.frame_ms).into());
    }
    let config = Config::load()?;
    let mut session = open_session(&config, args.preset.as_deref(), args.minutes)?;

    let end_ms = args.seconds * 1000.0;
    let pause_ms = args.pause_at.map(|s| s * 1000.0);
    let resume_ms = args.resume_at.map(|s| s * 1000.0);
    let mut paused_once = false;

    let mut now = 0.0;
    emit_event(session.start())?;
    let mut frame = session.on_tick(now);
    let mut count: u64 = 0;

    while now < end_ms {
        now += args.frame_ms;
        count += 1;

        if !paused_once && pause_ms.is_some_and(|at| now >= at) {
            paused_once = true;
            emit_event(session.pause())?;
        }
        if session.state() == RunState::Paused && resume_ms.is_some_and(|at| now >= at) {
            emit_event(session.start())?;
        }

        frame = session.on_tick(now);
        for event in session.take_events() {
            emit_event(Some(event))?;
        }
        if args.every > 0 && count % args.every == 0 {
            emit_frame(now, &frame)?;
        }
        if frame.state == RunState::Completed {
            break;
        }
    }

    emit_frame(now, &frame)?;
    Ok(())
}

fn emit_event(event: Option<Event>) -> Result<(), serde_json::Error> {
    if let Some(event) = event {
        println!("{}", serde_json::to_string(&event)?);
    }
    Ok(())
}

fn emit_frame(t_ms: f64, frame: &Frame) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string(&FrameLine { t_ms, frame })?);
    Ok(())
}
