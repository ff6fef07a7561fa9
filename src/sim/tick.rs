//! Per-frame simulation step
//!
//! Exactly one tick runs per rendering frame. The whole update completes
//! before returning, so callers never observe a half-applied frame.

use super::collision::{check_collision, forgiveness_margin};
use super::obstacle::SpawnPolicy;
use super::state::{GameEvent, GameOverCause, GameSession, GameStatus};
use crate::consts::GRAVITY;

/// Commands an input collaborator can issue between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Flap,
    Restart,
}

impl GameSession {
    /// Advance the simulation by one frame
    ///
    /// `now_ms` is a monotonically increasing clock in the same units as
    /// the spawn interval.
    pub fn tick(&mut self, now_ms: f64) {
        if self.status == GameStatus::Over {
            return;
        }

        self.body.advance(GRAVITY);
        if self.body.is_out_of_bounds(self.settings.playfield_height) {
            self.game_over(GameOverCause::OutOfBounds);
            return;
        }

        let difficulty = self.difficulty();
        let onboarding = self.settings.difficulty.is_onboarding(self.score);
        let policy = SpawnPolicy::select(self.first_pipe_passed, onboarding);
        if self
            .pipeline
            .maybe_spawn(now_ms, self.last_spawn_ms, &difficulty, policy, &mut self.rng)
            .is_some()
        {
            self.last_spawn_ms = now_ms;
        }

        for pass in self.pipeline.advance(&difficulty) {
            self.score += 1;
            self.first_pipe_passed = true;
            log::debug!("Passed obstacle {} (score {})", pass.obstacle_id, self.score);
            self.events.push(GameEvent::Pass {
                obstacle_id: pass.obstacle_id,
                score: self.score,
            });
        }

        let hit = check_collision(
            &self.body.bounds(),
            self.pipeline.obstacles(),
            self.settings.obstacle_width,
            forgiveness_margin(onboarding),
        );
        if hit {
            self.game_over(GameOverCause::Collision);
        }
    }

    /// Apply a queued input command
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Flap => self.flap(),
            Command::Restart => self.restart(),
        }
    }
}
