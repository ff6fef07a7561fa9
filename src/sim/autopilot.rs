//! Idle/demo controller
//!
//! Aims the body at the gap of the nearest obstacle that is still ahead
//! (or the playfield center when none is) and flaps whenever it sinks
//! below that aim while falling.

use super::state::GameSession;

/// Decides when to flap for attract mode and headless runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Autopilot {
    /// How far below the gap center the body center may sink before flapping
    pub slack: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        // Roughly half of one flap's rise, so the bob straddles the target
        Self { slack: 30.0 }
    }
}

impl Autopilot {
    /// Vertical center the body should track
    pub fn target_center(&self, session: &GameSession) -> f32 {
        let body = session.body();
        let obstacle_width = session.settings().obstacle_width;
        session
            .obstacles()
            .iter()
            .find(|o| o.x + obstacle_width >= body.x)
            .map(|o| o.gap_center())
            .unwrap_or(session.settings().playfield_height / 2.0)
    }

    /// Whether to flap before the next tick
    pub fn wants_flap(&self, session: &GameSession) -> bool {
        if session.is_over() {
            return false;
        }
        let body = session.body();
        body.velocity_y >= 0.0 && body.center_y() > self.target_center(session) + self.slack
    }

    /// Flap if needed, then tick
    pub fn drive(&self, session: &mut GameSession, now_ms: f64) {
        if self.wants_flap(session) {
            session.flap();
        }
        session.tick(now_ms);
    }
}
