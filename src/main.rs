//! Pipe Drift headless runner
//!
//! Drives a session with the autopilot at a fixed 60 Hz frame clock and logs
//! what a presentation layer would react to.
//!
//! Usage: `pipe-drift [settings.json] [--seed N] [--frames N]`

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pipe_drift::audio::AudioManager;
use pipe_drift::consts::FRAME_MS;
use pipe_drift::hud::Hud;
use pipe_drift::sim::{Autopilot, CommandQueue, GameEvent, GameSession};
use pipe_drift::{ConfigError, Settings};

const DEFAULT_SEED: u64 = 12345;
const DEFAULT_FRAMES: u64 = 60 * 60;

#[derive(Parser, Debug)]
#[command(name = "pipe-drift", about = "Headless pipe dodging run driven by the autopilot")]
struct Cli {
    /// Settings JSON file (defaults are used when omitted)
    settings: Option<PathBuf>,
    /// RNG seed for obstacle placement
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// Frames to simulate at 60 Hz before stopping
    #[arg(long, default_value_t = DEFAULT_FRAMES)]
    frames: u64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::init();
    log::info!("Pipe Drift (headless) starting...");

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ConfigError> {
    let settings = match &cli.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let mut session = GameSession::new(settings, cli.seed)?;
    // Input threads would hold clones of the sender
    let (_input, queue) = CommandQueue::channel();
    let pilot = Autopilot::default();
    let audio = AudioManager::new();
    let mut hud = Hud::new();

    for frame in 1..=cli.frames {
        let now = frame as f64 * FRAME_MS;
        queue.drain_into(&mut session);
        pilot.drive(&mut session, now);

        let events = session.drain_events();
        for sound in audio.plan(&events) {
            log::trace!("Play {:?} at gain {:.2}", sound.effect, sound.gain);
        }
        hud.apply(&events, now);
        for event in &events {
            if let GameEvent::Pass { score, .. } = event {
                log::info!("Frame {}: score {}", frame, score);
            }
        }

        if session.is_over() {
            log::info!("Run ended on frame {}", frame);
            break;
        }
    }

    match serde_json::to_string(&session.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(err) => log::warn!("Snapshot not serializable: {}", err),
    }
    println!(
        "Final score: {} ({})",
        hud.score_label(),
        if session.is_over() { "game over" } else { "still flying" }
    );
    Ok(())
}
