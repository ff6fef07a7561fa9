//! Obstacle pairs and the pipeline that spawns, scrolls and retires them
//!
//! Obstacles live in spawn order (oldest first). Each tick every obstacle
//! moves left by the current speed; those that leave the screen are dropped
//! with a stable retain pass, and each one that crosses the body's pass line
//! reports a single pass event.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use crate::settings::Settings;

/// How the gap of a new obstacle is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnPolicy {
    /// Nothing passed yet: gap exactly centered
    Centered,
    /// Onboarding: gap jittered around the center
    NearCenter,
    /// Normal play: gap anywhere that leaves the edge margin
    Anywhere,
}

impl SpawnPolicy {
    /// Pick the policy from session phase (never from obstacle count)
    pub fn select(first_pipe_passed: bool, onboarding: bool) -> Self {
        if !first_pipe_passed {
            SpawnPolicy::Centered
        } else if onboarding {
            SpawnPolicy::NearCenter
        } else {
            SpawnPolicy::Anywhere
        }
    }
}

/// One top/bottom obstacle pair sharing a horizontal position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Bottom edge of the top piece
    pub gap_top: f32,
    /// Vertical size of the opening
    pub gap_height: f32,
    /// Whether the pass event has been reported
    pub passed: bool,
    /// Placement policy used at spawn
    pub policy: SpawnPolicy,
}

impl Obstacle {
    /// Top edge of the bottom piece
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap_height
    }

    /// Vertical center of the gap
    #[inline]
    pub fn gap_center(&self) -> f32 {
        self.gap_top + self.gap_height / 2.0
    }
}

/// Reported once per obstacle when it crosses the pass line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassEvent {
    pub obstacle_id: u32,
}

/// Geometry the pipeline needs from the settings
#[derive(Debug, Clone, Copy, PartialEq)]
struct Lanes {
    playfield_height: f32,
    spawn_x: f32,
    retire_x: f32,
    pass_x: f32,
    edge_margin: f32,
    center_range: f32,
}

/// Ordered collection of active obstacles
#[derive(Debug, Clone)]
pub struct ObstaclePipeline {
    lanes: Lanes,
    obstacles: Vec<Obstacle>,
    next_id: u32,
}

impl ObstaclePipeline {
    pub fn new(settings: &Settings) -> Self {
        Self {
            lanes: Lanes {
                playfield_height: settings.playfield_height,
                spawn_x: settings.spawn_x(),
                retire_x: settings.retire_x(),
                pass_x: settings.pass_x(),
                edge_margin: settings.edge_margin,
                center_range: settings.center_range,
            },
            obstacles: Vec::new(),
            next_id: 1,
        }
    }

    /// Active obstacles, oldest first
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Drop every obstacle (ids keep counting up)
    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Gap top for a new obstacle under the given policy
    pub fn gap_top_for<R: Rng + ?Sized>(&self, policy: SpawnPolicy, gap: f32, rng: &mut R) -> f32 {
        let lanes = &self.lanes;
        let centered = (lanes.playfield_height - gap) / 2.0;
        let gap_top = match policy {
            SpawnPolicy::Centered => centered,
            SpawnPolicy::NearCenter => {
                let half = lanes.center_range / 2.0;
                centered + rng.random_range(-half..=half)
            }
            SpawnPolicy::Anywhere => {
                let low = lanes.edge_margin;
                let high = lanes.playfield_height - gap - lanes.edge_margin;
                rng.random_range(low..=high.max(low))
            }
        };
        gap_top.clamp(0.0, (lanes.playfield_height - gap).max(0.0))
    }

    /// Spawn a new obstacle if the spawn interval has elapsed
    pub fn maybe_spawn<R: Rng + ?Sized>(
        &mut self,
        now_ms: f64,
        last_spawn_ms: f64,
        difficulty: &Difficulty,
        policy: SpawnPolicy,
        rng: &mut R,
    ) -> Option<&Obstacle> {
        if now_ms - last_spawn_ms <= difficulty.spawn_interval_ms {
            return None;
        }

        let gap_height = difficulty.pipe_gap;
        let gap_top = self.gap_top_for(policy, gap_height, rng);
        let id = self.next_id;
        self.next_id += 1;

        log::debug!(
            "Spawn obstacle {}: gap_top={:.1}, gap={:.1}, policy={:?}",
            id,
            gap_top,
            gap_height,
            policy
        );

        self.obstacles.push(Obstacle {
            id,
            x: self.lanes.spawn_x,
            gap_top,
            gap_height,
            passed: false,
            policy,
        });
        self.obstacles.last()
    }

    /// Scroll every obstacle, retire off-screen ones and report passes
    pub fn advance(&mut self, difficulty: &Difficulty) -> Vec<PassEvent> {
        let lanes = self.lanes;
        let mut passes = Vec::new();

        self.obstacles.retain_mut(|obstacle| {
            obstacle.x -= difficulty.pipe_speed;
            if obstacle.x < lanes.retire_x {
                log::debug!("Retire obstacle {}", obstacle.id);
                return false;
            }
            if !obstacle.passed && obstacle.x < lanes.pass_x {
                obstacle.passed = true;
                passes.push(PassEvent {
                    obstacle_id: obstacle.id,
                });
            }
            true
        });

        passes
    }
}

#[cfg(test)]
impl ObstaclePipeline {
    pub(crate) fn push_for_test(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::DifficultyCurve;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn pipeline() -> ObstaclePipeline {
        ObstaclePipeline::new(&Settings::default())
    }

    fn easy() -> Difficulty {
        DifficultyCurve::default().evaluate(0)
    }

    #[test]
    fn test_policy_selection() {
        assert_eq!(SpawnPolicy::select(false, true), SpawnPolicy::Centered);
        // Nothing passed yet wins even after onboarding
        assert_eq!(SpawnPolicy::select(false, false), SpawnPolicy::Centered);
        assert_eq!(SpawnPolicy::select(true, true), SpawnPolicy::NearCenter);
        assert_eq!(SpawnPolicy::select(true, false), SpawnPolicy::Anywhere);
    }

    #[test]
    fn test_spawn_waits_for_interval() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut pipes = pipeline();
        let d = easy();
        assert!(pipes.maybe_spawn(4000.0, 0.0, &d, SpawnPolicy::Centered, &mut rng).is_none());
        assert!(pipes.maybe_spawn(4000.5, 0.0, &d, SpawnPolicy::Centered, &mut rng).is_some());
        assert_eq!(pipes.len(), 1);
    }

    #[test]
    fn test_first_obstacle_is_centered() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut pipes = pipeline();
        let d = easy();
        let pipe = pipes
            .maybe_spawn(5000.0, 0.0, &d, SpawnPolicy::Centered, &mut rng)
            .unwrap();
        assert_eq!(pipe.gap_top, (600.0 - 350.0) / 2.0);
        assert_eq!(pipe.gap_height, 350.0);
        assert_eq!(pipe.x, 400.0);
        assert!(!pipe.passed);
    }

    #[test]
    fn test_near_center_stays_within_range() {
        let mut rng = Pcg32::seed_from_u64(42);
        let pipes = pipeline();
        for _ in 0..500 {
            let top = pipes.gap_top_for(SpawnPolicy::NearCenter, 350.0, &mut rng);
            assert!((75.0..=175.0).contains(&top), "gap top {top} out of range");
        }
    }

    #[test]
    fn test_anywhere_respects_edge_margin() {
        let mut rng = Pcg32::seed_from_u64(42);
        let pipes = pipeline();
        let mut lowest = f32::MAX;
        let mut highest = f32::MIN;
        for _ in 0..500 {
            let top = pipes.gap_top_for(SpawnPolicy::Anywhere, 150.0, &mut rng);
            assert!((50.0..=400.0).contains(&top), "gap top {top} out of range");
            lowest = lowest.min(top);
            highest = highest.max(top);
        }
        // Uses far more of the playfield than the onboarding jitter
        assert!(highest - lowest > 100.0);
    }

    #[test]
    fn test_advance_moves_by_speed() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut pipes = pipeline();
        let d = easy();
        pipes.maybe_spawn(5000.0, 0.0, &d, SpawnPolicy::Centered, &mut rng);
        let passes = pipes.advance(&d);
        assert!(passes.is_empty());
        assert_eq!(pipes.obstacles()[0].x, 399.5);
    }

    #[test]
    fn test_pass_fires_once_inside_window() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut pipes = pipeline();
        let d = easy();
        pipes.maybe_spawn(5000.0, 0.0, &d, SpawnPolicy::Centered, &mut rng);

        let mut pass_ticks = Vec::new();
        for tick in 0..2000 {
            let passes = pipes.advance(&d);
            if !passes.is_empty() {
                let x = pipes.obstacles()[0].x;
                assert!(x < 90.0 && x >= -60.0);
                pass_ticks.push(tick);
            }
            if pipes.is_empty() {
                break;
            }
        }
        assert_eq!(pass_ticks.len(), 1);
    }

    #[test]
    fn test_retired_exactly_once_below_threshold() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut pipes = pipeline();
        let d = easy();
        pipes.maybe_spawn(5000.0, 0.0, &d, SpawnPolicy::Centered, &mut rng);

        let mut last_x = 400.0;
        while !pipes.is_empty() {
            last_x = pipes.obstacles()[0].x;
            pipes.advance(&d);
        }
        // Last surviving position was still on the legal side
        assert!(last_x >= -60.0);
        assert!(last_x - d.pipe_speed < -60.0);
        for _ in 0..10 {
            pipes.advance(&d);
            assert!(pipes.is_empty());
        }
    }

    #[test]
    fn test_retire_keeps_order_and_skips_nothing() {
        let mut pipes = pipeline();
        for (id, x) in [(1, -59.8), (2, -59.9), (3, 80.0), (4, 300.0)] {
            pipes.obstacles.push(Obstacle {
                id,
                x,
                gap_top: 100.0,
                gap_height: 350.0,
                passed: x < 90.0,
                policy: SpawnPolicy::NearCenter,
            });
        }
        let fast = Difficulty {
            pipe_speed: 1.0,
            ..easy()
        };
        // Two adjacent retirements in one pass: neither survivor is skipped
        let passes = pipes.advance(&fast);
        assert!(passes.is_empty());
        let ids: Vec<u32> = pipes.obstacles().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![3, 4]);
        assert_eq!(pipes.obstacles()[0].x, 79.0);
        assert_eq!(pipes.obstacles()[1].x, 299.0);
    }

    #[test]
    fn test_ids_increase_across_clear() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut pipes = pipeline();
        let d = easy();
        let first = pipes
            .maybe_spawn(5000.0, 0.0, &d, SpawnPolicy::Centered, &mut rng)
            .map(|o| o.id);
        pipes.clear();
        assert!(pipes.is_empty());
        let second = pipes
            .maybe_spawn(5000.0, 0.0, &d, SpawnPolicy::Centered, &mut rng)
            .map(|o| o.id);
        assert_eq!(first, Some(1));
        assert_eq!(second, Some(2));
    }
}
