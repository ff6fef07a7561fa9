//! Score-driven difficulty curve
//!
//! Difficulty stays flat through an onboarding window, then ramps linearly
//! to its final values. Nothing here is stored on the session; callers
//! evaluate the curve against the current score whenever they need it.

use serde::{Deserialize, Serialize};

/// Difficulty values for a given score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    /// Leftward obstacle speed (units per tick)
    pub pipe_speed: f32,
    /// Minimum time between obstacle spawns (ms)
    pub spawn_interval_ms: f64,
    /// Vertical opening between top and bottom pieces (units)
    pub pipe_gap: f32,
}

/// Linear difficulty ramp between an initial and a final snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyCurve {
    /// Score at which the ramp starts (easy until then)
    pub ramp_start: u32,
    /// Number of points over which the ramp reaches its final values
    pub ramp_length: u32,
    pub initial_speed: f32,
    pub final_speed: f32,
    pub initial_spawn_interval_ms: f64,
    pub final_spawn_interval_ms: f64,
    pub initial_gap: f32,
    pub final_gap: f32,
}

impl Default for DifficultyCurve {
    fn default() -> Self {
        Self {
            ramp_start: 30,
            ramp_length: 20,
            initial_speed: 0.5,
            final_speed: 2.0,
            initial_spawn_interval_ms: 4000.0,
            final_spawn_interval_ms: 2000.0,
            initial_gap: 350.0,
            final_gap: 150.0,
        }
    }
}

impl DifficultyCurve {
    /// Ramp progress in [0, 1] for a score
    pub fn progress(&self, score: u32) -> f32 {
        if self.ramp_length == 0 {
            return if score > self.ramp_start { 1.0 } else { 0.0 };
        }
        let over = score as f32 - self.ramp_start as f32;
        (over / self.ramp_length as f32).clamp(0.0, 1.0)
    }

    /// Difficulty snapshot for the given score
    pub fn evaluate(&self, score: u32) -> Difficulty {
        let t = self.progress(score);
        Difficulty {
            pipe_speed: lerp(self.initial_speed, self.final_speed, t),
            spawn_interval_ms: self.initial_spawn_interval_ms
                + (self.final_spawn_interval_ms - self.initial_spawn_interval_ms) * t as f64,
            pipe_gap: lerp(self.initial_gap, self.final_gap, t),
        }
    }

    /// Whether the score is still in the flat window before the ramp
    ///
    /// Spawn placement and collision forgiveness both key off this.
    pub fn is_onboarding(&self, score: u32) -> bool {
        score < self.ramp_start
    }

    /// Widest gap the curve can ever produce
    pub fn widest_gap(&self) -> f32 {
        self.initial_gap.max(self.final_gap)
    }
}

#[inline]
fn lerp(initial: f32, final_value: f32, t: f32) -> f32 {
    initial + (final_value - initial) * t
}
