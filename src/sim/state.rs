//! Session state and its read-only views
//!
//! A `GameSession` owns everything a run needs: the body, the obstacle
//! pipeline, the score, the seeded RNG and the pending event queue.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::difficulty::Difficulty;
use super::obstacle::{Obstacle, ObstaclePipeline};
use crate::consts::FLAP_FORCE;
use crate::settings::{ConfigError, Settings};

/// Run status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Active gameplay
    Running,
    /// Run ended (terminal until restart)
    Over,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Body left the playfield
    OutOfBounds,
    /// Body hit an obstacle
    Collision,
}

/// Notifications for audio/visual collaborators (delivered once)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A flap impulse was applied
    Flap,
    /// An obstacle was passed; `score` is the new total
    Pass { obstacle_id: u32, score: u32 },
    /// The run ended with the given final score
    GameOver { score: u32, cause: GameOverCause },
}

/// Body fields exposed to presentation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyView {
    pub y: f32,
    pub velocity_y: f32,
}

/// Obstacle fields exposed to presentation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub gap_top: f32,
    pub gap_height: f32,
    pub x: f32,
}

/// Read-only picture of a session for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub status: GameStatus,
    pub score: u32,
    pub body: BodyView,
    /// Active obstacles, oldest first
    pub obstacles: Vec<ObstacleView>,
}

/// One run of the game
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(crate) settings: Settings,
    pub(crate) status: GameStatus,
    pub(crate) score: u32,
    /// Clock value of the most recent spawn (ms)
    pub(crate) last_spawn_ms: f64,
    pub(crate) first_pipe_passed: bool,
    pub(crate) body: Body,
    pub(crate) pipeline: ObstaclePipeline,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
}

impl GameSession {
    /// Validate the settings and start a fresh run
    pub fn new(settings: Settings, seed: u64) -> Result<Self, ConfigError> {
        if let Err(err) = settings.validate() {
            log::warn!("Rejected settings: {}", err);
            return Err(err);
        }
        log::info!("New session with seed {}", seed);

        Ok(Self {
            body: Body::new(&settings),
            pipeline: ObstaclePipeline::new(&settings),
            rng: Pcg32::seed_from_u64(seed),
            status: GameStatus::Running,
            score: 0,
            last_spawn_ms: 0.0,
            first_pipe_passed: false,
            events: Vec::new(),
            settings,
        })
    }

    /// Apply an upward impulse (ignored once the run is over)
    pub fn flap(&mut self) {
        if self.status == GameStatus::Over {
            return;
        }
        self.body.apply_impulse(FLAP_FORCE);
        self.events.push(GameEvent::Flap);
    }

    /// Reset to a fresh running session (legal from any state)
    pub fn restart(&mut self) {
        self.body = Body::new(&self.settings);
        self.pipeline.clear();
        self.status = GameStatus::Running;
        self.score = 0;
        self.last_spawn_ms = 0.0;
        self.first_pipe_passed = false;
        self.events.clear();
        log::info!("Session restarted");
    }

    /// End the run, clearing the field and recording the final score
    pub(crate) fn game_over(&mut self, cause: GameOverCause) {
        self.status = GameStatus::Over;
        self.pipeline.clear();
        self.events.push(GameEvent::GameOver {
            score: self.score,
            cause,
        });
        log::info!("Game over ({:?}) with score {}", cause, self.score);
    }

    /// Take all pending events; each is delivered exactly once
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn first_pipe_passed(&self) -> bool {
        self.first_pipe_passed
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Active obstacles, oldest first
    pub fn obstacles(&self) -> &[Obstacle] {
        self.pipeline.obstacles()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Difficulty for the current score
    pub fn difficulty(&self) -> Difficulty {
        self.settings.difficulty.evaluate(self.score)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            status: self.status,
            score: self.score,
            body: BodyView {
                y: self.body.y,
                velocity_y: self.body.velocity_y,
            },
            obstacles: self
                .pipeline
                .obstacles()
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    gap_top: o.gap_top,
                    gap_height: o.gap_height,
                    x: o.x,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new(Settings::default(), 12345).unwrap()
    }

    #[test]
    fn test_new_session_running() {
        let s = session();
        assert_eq!(s.status(), GameStatus::Running);
        assert_eq!(s.score(), 0);
        assert!(!s.first_pipe_passed());
        assert!(s.obstacles().is_empty());
        assert_eq!(s.body().y, 300.0);
    }

    #[test]
    fn test_invalid_settings_fail_fast() {
        let settings = Settings {
            playfield_height: 200.0,
            body_start_y: 10.0,
            ..Default::default()
        };
        assert!(matches!(
            GameSession::new(settings, 1),
            Err(ConfigError::GapTooLarge { .. })
        ));

        // A NaN start height would never leave the playfield
        let settings = Settings {
            body_start_y: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            GameSession::new(settings, 1),
            Err(ConfigError::BodyOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_flap_sets_velocity_and_emits() {
        let mut s = session();
        s.body.velocity_y = 12.0;
        s.flap();
        assert_eq!(s.body().velocity_y, -6.0);
        s.flap();
        assert_eq!(s.body().velocity_y, -6.0);
        assert_eq!(s.drain_events(), vec![GameEvent::Flap, GameEvent::Flap]);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_flap_ignored_when_over() {
        let mut s = session();
        s.game_over(GameOverCause::Collision);
        s.drain_events();
        s.body.velocity_y = 4.0;
        s.flap();
        assert_eq!(s.body().velocity_y, 4.0);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_restart_from_running_resets() {
        let mut s = session();
        s.score = 12;
        s.first_pipe_passed = true;
        s.last_spawn_ms = 9000.0;
        s.body.y = 42.0;
        s.flap();
        s.restart();
        assert_eq!(s.status(), GameStatus::Running);
        assert_eq!(s.score(), 0);
        assert!(!s.first_pipe_passed());
        assert_eq!(s.last_spawn_ms, 0.0);
        assert_eq!(s.body().y, 300.0);
        assert_eq!(s.body().velocity_y, 0.0);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_snapshot_serializes() {
        let s = session();
        let json = serde_json::to_string(&s.snapshot()).unwrap();
        assert!(json.contains("\"status\":\"Running\""));
        assert!(json.contains("\"obstacles\":[]"));
    }
}
