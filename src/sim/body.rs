//! The falling body the player keeps airborne

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::settings::Settings;

/// Vertical physics state plus the fixed horizontal placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Fixed left edge
    pub x: f32,
    /// Top edge (screen space, grows downward)
    pub y: f32,
    /// Vertical velocity (negative = upward)
    pub velocity_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Body {
    /// Body at its start height with zero velocity
    pub fn new(settings: &Settings) -> Self {
        Self {
            x: settings.body_x,
            y: settings.body_start_y,
            velocity_y: 0.0,
            width: settings.body_width,
            height: settings.body_height,
        }
    }

    /// Integrate one tick: velocity first, then position
    pub fn advance(&mut self, gravity: f32) {
        self.velocity_y += gravity;
        self.y += self.velocity_y;
    }

    /// Replace the current vertical velocity with an impulse
    pub fn apply_impulse(&mut self, force: f32) {
        self.velocity_y = force;
    }

    /// True when the body has left the playfield
    pub fn is_out_of_bounds(&self, playfield_height: f32) -> bool {
        self.y < 0.0 || self.y > playfield_height - self.height
    }

    /// Current bounding box
    pub fn bounds(&self) -> Aabb {
        Aabb::from_origin_size(Vec2::new(self.x, self.y), Vec2::new(self.width, self.height))
    }

    /// Vertical center
    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Visual tilt in degrees (nose up when rising, down when falling)
    pub fn tilt_degrees(&self) -> f32 {
        (self.velocity_y * 3.0).clamp(-90.0, 45.0)
    }
}
