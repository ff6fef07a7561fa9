//! Simulation engine
//!
//! All gameplay logic lives here. This module stays free of rendering,
//! audio and input code:
//! - One tick per frame, integrated in whole ticks
//! - Seeded RNG only
//! - Obstacles processed in spawn order
//! - Side effects leave only as `GameEvent`s

pub mod autopilot;
pub mod body;
pub mod collision;
pub mod command;
pub mod difficulty;
pub mod obstacle;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use body::Body;
pub use collision::{Aabb, check_collision, forgiveness_margin};
pub use command::{CommandQueue, CommandSender};
pub use difficulty::{Difficulty, DifficultyCurve};
pub use obstacle::{Obstacle, ObstaclePipeline, PassEvent, SpawnPolicy};
pub use state::{
    BodyView, GameEvent, GameOverCause, GameSession, GameStatus, ObstacleView, Snapshot,
};
pub use tick::Command;
