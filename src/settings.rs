//! Playfield geometry and difficulty tuning
//!
//! Supplied by the presentation layer (or a JSON file for headless runs) and
//! treated as constants by the engine. Malformed settings are rejected before
//! a session is built.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::DifficultyCurve;

/// Reasons a configuration cannot produce sensible geometry
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be positive (got {value})")]
    NonPositive { name: &'static str, value: f64 },
    #[error("{name} must not be negative (got {value})")]
    Negative { name: &'static str, value: f64 },
    #[error("body start y {y} lies outside [0, {max}]")]
    BodyOutOfBounds { y: f32, max: f32 },
    #[error("gap {gap} with {margin} edge margin does not fit a playfield {height} tall")]
    GapTooLarge { gap: f32, margin: f32, height: f32 },
    #[error("center range {range} exceeds the {free} units of free space around a {gap} gap")]
    CenterRangeTooLarge { range: f32, free: f32, gap: f32 },
    #[error("spawn x {spawn_x} must be right of the body's trailing edge {body_right}")]
    SpawnBehindBody { spawn_x: f32, body_right: f32 },
    #[error("spawn x {spawn_x} is inside the {width} wide playfield")]
    SpawnOnScreen { spawn_x: f32, width: f32 },
    #[error("{name} {speed} jumps over the {window} unit pass window in one tick")]
    SpeedTooHigh { name: &'static str, speed: f32, window: f32 },
    #[error("invalid settings json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cannot read settings file: {0}")]
    Io(#[from] std::io::Error),
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,

    // === Body ===
    /// Fixed left edge of the body
    pub body_x: f32,
    pub body_width: f32,
    pub body_height: f32,
    /// Top edge at session start
    pub body_start_y: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    /// Spawn position, off the right edge (defaults to the playfield width)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spawn_x: Option<f32>,
    /// How far left of the body's edge an obstacle must travel to count as passed
    pub pass_leeway: f32,
    /// Minimum obstacle height kept at the top and bottom in normal play
    pub edge_margin: f32,
    /// Total vertical spread of gap offsets during onboarding
    pub center_range: f32,

    /// Difficulty ramp
    pub difficulty: DifficultyCurve,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playfield_width: 400.0,
            playfield_height: 600.0,

            body_x: 100.0,
            body_width: 60.0,
            body_height: 60.0,
            body_start_y: 300.0,

            obstacle_width: 60.0,
            spawn_x: None,
            pass_leeway: 10.0,
            edge_margin: 50.0,
            center_range: 100.0,

            difficulty: DifficultyCurve::default(),
        }
    }
}

impl Settings {
    /// Left edge of a freshly spawned obstacle
    pub fn spawn_x(&self) -> f32 {
        self.spawn_x.unwrap_or(self.playfield_width)
    }

    /// Obstacles left of this x are retired
    pub fn retire_x(&self) -> f32 {
        -self.obstacle_width
    }

    /// Obstacles left of this x count as passed
    pub fn pass_x(&self) -> f32 {
        self.body_x - self.pass_leeway
    }

    /// Parse settings from JSON (missing fields use defaults) and validate them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject geometry the engine cannot simulate sensibly
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("playfield_width", self.playfield_width as f64)?;
        positive("playfield_height", self.playfield_height as f64)?;
        positive("body_width", self.body_width as f64)?;
        positive("body_height", self.body_height as f64)?;
        positive("obstacle_width", self.obstacle_width as f64)?;
        non_negative("body_x", self.body_x as f64)?;
        non_negative("pass_leeway", self.pass_leeway as f64)?;
        non_negative("edge_margin", self.edge_margin as f64)?;
        non_negative("center_range", self.center_range as f64)?;

        let curve = &self.difficulty;
        positive("difficulty.ramp_length", curve.ramp_length as f64)?;
        non_negative("difficulty.initial_speed", curve.initial_speed as f64)?;
        non_negative("difficulty.final_speed", curve.final_speed as f64)?;
        positive("difficulty.initial_spawn_interval_ms", curve.initial_spawn_interval_ms)?;
        positive("difficulty.final_spawn_interval_ms", curve.final_spawn_interval_ms)?;
        positive("difficulty.initial_gap", curve.initial_gap as f64)?;
        positive("difficulty.final_gap", curve.final_gap as f64)?;

        let max_y = self.playfield_height - self.body_height;
        // Negated so NaN fails every cross-field check as well
        if !(self.body_start_y >= 0.0 && self.body_start_y <= max_y) {
            return Err(ConfigError::BodyOutOfBounds {
                y: self.body_start_y,
                max: max_y,
            });
        }

        let gap = curve.widest_gap();
        if gap + 2.0 * self.edge_margin > self.playfield_height {
            return Err(ConfigError::GapTooLarge {
                gap,
                margin: self.edge_margin,
                height: self.playfield_height,
            });
        }

        let free = self.playfield_height - gap;
        if self.center_range > free {
            return Err(ConfigError::CenterRangeTooLarge {
                range: self.center_range,
                free,
                gap,
            });
        }

        let spawn_x = self.spawn_x();
        let body_right = self.body_x + self.body_width;
        if !(spawn_x >= body_right) {
            return Err(ConfigError::SpawnBehindBody { spawn_x, body_right });
        }
        if !(spawn_x >= self.playfield_width) {
            return Err(ConfigError::SpawnOnScreen {
                spawn_x,
                width: self.playfield_width,
            });
        }

        // An obstacle must land between the pass line and retirement at least once
        let window = self.pass_x() - self.retire_x();
        for (name, speed) in [
            ("difficulty.initial_speed", curve.initial_speed),
            ("difficulty.final_speed", curve.final_speed),
        ] {
            if !(speed <= window) {
                return Err(ConfigError::SpeedTooHigh { name, speed, window });
            }
        }

        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    // Written this way so NaN is rejected too
    if !(value > 0.0) {
        return Err(ConfigError::NonPositive { name, value });
    }
    Ok(())
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(value >= 0.0) {
        return Err(ConfigError::Negative { name, value });
    }
    Ok(())
}
