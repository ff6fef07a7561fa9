//! HUD model driven by game events
//!
//! Holds what the overlay shows (score label, pass popup, game-over panel)
//! so a renderer only has to draw it. The popup timer belongs here, not to
//! the engine.

use crate::sim::GameEvent;

/// How long the pass popup stays up (ms)
pub const PASS_POPUP_MS: f64 = 1000.0;

/// Overlay state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hud {
    score: u32,
    popup_until_ms: Option<f64>,
    final_score: Option<u32>,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold drained events into the overlay state
    pub fn apply(&mut self, events: &[GameEvent], now_ms: f64) {
        for event in events {
            match *event {
                GameEvent::Flap => {}
                GameEvent::Pass { score, .. } => {
                    self.score = score;
                    // A new pass restarts the popup timer
                    self.popup_until_ms = Some(now_ms + PASS_POPUP_MS);
                }
                GameEvent::GameOver { score, .. } => {
                    self.score = score;
                    self.final_score = Some(score);
                }
            }
        }
    }

    /// Back to the start-of-run overlay
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn score_label(&self) -> String {
        self.score.to_string()
    }

    pub fn popup_visible(&self, now_ms: f64) -> bool {
        self.popup_until_ms.is_some_and(|until| now_ms < until)
    }

    /// Final score when the game-over panel is showing
    pub fn game_over_panel(&self) -> Option<u32> {
        self.final_score
    }
}
