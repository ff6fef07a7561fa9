//! Collision detection between the body and obstacle pairs
//!
//! Boxes are axis-aligned in screen space (y grows downward). Every test
//! shrinks the overlap region by a forgiveness margin so grazing contacts
//! don't end the run.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;

/// Margin while the player is still onboarding
pub const ONBOARDING_MARGIN: f32 = 15.0;
/// Margin once the difficulty ramp is reachable
pub const NORMAL_MARGIN: f32 = 10.0;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box from top-left corner and size
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// Horizontal overlap with `[left, right]` after shrinking by `margin`
    #[inline]
    pub fn overlaps_x(&self, left: f32, right: f32, margin: f32) -> bool {
        self.max.x - margin > left && self.min.x + margin < right
    }
}

/// Forgiveness margin, wider while the player is onboarding
pub fn forgiveness_margin(onboarding: bool) -> f32 {
    if onboarding {
        ONBOARDING_MARGIN
    } else {
        NORMAL_MARGIN
    }
}

/// Check whether the body hits a single obstacle pair
///
/// The body collides when it is inside the pair's horizontal span and its
/// (shrunken) vertical extent leaves the gap, either into the top piece or
/// into the bottom piece.
pub fn body_hits_obstacle(body: &Aabb, obstacle: &Obstacle, obstacle_width: f32, margin: f32) -> bool {
    if !body.overlaps_x(obstacle.x, obstacle.x + obstacle_width, margin) {
        return false;
    }
    let top_piece_bottom = obstacle.gap_top;
    let bottom_piece_top = obstacle.gap_bottom();
    body.min.y + margin < top_piece_bottom || body.max.y - margin > bottom_piece_top
}

/// Check the body against every active obstacle (stops at the first hit)
pub fn check_collision(body: &Aabb, obstacles: &[Obstacle], obstacle_width: f32, margin: f32) -> bool {
    obstacles
        .iter()
        .any(|obstacle| body_hits_obstacle(body, obstacle, obstacle_width, margin))
}
