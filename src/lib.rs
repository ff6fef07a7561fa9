//! Pipe Drift - A side-scrolling pipe dodging game
//!
//! Core modules:
//! - `sim`: Simulation engine (physics, obstacles, collisions, session state)
//! - `settings`: Playfield geometry and difficulty tuning
//! - `audio`: Sound cues for engine events
//! - `hud`: Overlay state for engine events

pub mod audio;
pub mod hud;
pub mod settings;
pub mod sim;

pub use settings::{ConfigError, Settings};
pub use sim::{GameEvent, GameSession, GameStatus, Snapshot};

/// Game configuration constants
pub mod consts {
    /// Downward acceleration (units per tick²)
    pub const GRAVITY: f32 = 0.3;
    /// Velocity set by a flap (negative = upward, units per tick)
    pub const FLAP_FORCE: f32 = -6.0;

    /// Nominal frame length for headless runs (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}
