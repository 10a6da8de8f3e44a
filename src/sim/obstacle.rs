//! Gap obstacles and the stream that recycles them
//!
//! Every obstacle is a top/bottom barrier pair around a gap whose height is
//! fixed and whose position is drawn once, at construction. The stream keeps
//! exactly one unpassed obstacle ahead of the avatar: each pass spawns one
//! replacement at the right edge.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;

/// Geometry and motion shared by every obstacle in a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleTuning {
    pub gap_height: f32,
    pub velocity: f32,
    pub spawn_x: f32,
    pub width: f32,
    pub height: f32,
    /// Gap top edge is drawn from `[gap_top_min, gap_top_max)`
    pub gap_top_min: f32,
    pub gap_top_max: f32,
}

impl From<&SessionConfig> for ObstacleTuning {
    fn from(config: &SessionConfig) -> Self {
        let (gap_top_min, gap_top_max) = config.gap_top_range();
        Self {
            gap_height: config.gap_height,
            velocity: config.obstacle_velocity,
            spawn_x: config.obstacle_spawn_x,
            width: config.obstacle_width as f32,
            height: config.obstacle_height as f32,
            gap_top_min,
            gap_top_max,
        }
    }
}

impl Default for ObstacleTuning {
    fn default() -> Self {
        Self::from(&SessionConfig::default())
    }
}

/// A top/bottom barrier pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge of both barriers
    pub x: f32,
    pub gap_center_y: f32,
    pub passed: bool,
}

impl Obstacle {
    /// New obstacle at `x` with a random gap height
    pub fn new<R: Rng>(id: u32, x: f32, tuning: &ObstacleTuning, rng: &mut R) -> Self {
        let gap_top = rng.random_range(tuning.gap_top_min..tuning.gap_top_max);
        Self::with_gap_top(id, x, gap_top, tuning)
    }

    /// New obstacle with an explicit gap position
    pub fn with_gap_top(id: u32, x: f32, gap_top: f32, tuning: &ObstacleTuning) -> Self {
        Self {
            id,
            x,
            gap_center_y: gap_top + tuning.gap_height / 2.0,
            passed: false,
        }
    }

    pub fn step(&mut self, tuning: &ObstacleTuning) {
        self.x -= tuning.velocity;
    }

    /// Mark as passed; true only on the call that flips the flag
    pub fn mark_passed(&mut self) -> bool {
        let first = !self.passed;
        self.passed = true;
        first
    }

    /// Upper edge of the gap (bottom edge of the top barrier)
    #[inline]
    pub fn gap_top(&self, tuning: &ObstacleTuning) -> f32 {
        self.gap_center_y - tuning.gap_height / 2.0
    }

    /// Lower edge of the gap (top edge of the bottom barrier)
    #[inline]
    pub fn gap_bottom(&self, tuning: &ObstacleTuning) -> f32 {
        self.gap_center_y + tuning.gap_height / 2.0
    }

    /// Screen y of the top barrier's top-left corner
    #[inline]
    pub fn top_barrier_y(&self, tuning: &ObstacleTuning) -> f32 {
        self.gap_top(tuning) - tuning.height
    }

    /// Screen y of the bottom barrier's top-left corner
    #[inline]
    pub fn bottom_barrier_y(&self, tuning: &ObstacleTuning) -> f32 {
        self.gap_bottom(tuning)
    }

    /// Trailing edge has scrolled fully past the left side of the screen
    #[inline]
    pub fn is_off_screen(&self, tuning: &ObstacleTuning) -> bool {
        self.x + tuning.width < 0.0
    }
}

/// Active obstacles in spawn order (left to right on screen)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleStream {
    pub obstacles: Vec<Obstacle>,
    pub tuning: ObstacleTuning,
    next_id: u32,
}

impl ObstacleStream {
    /// Stream holding a single fresh obstacle at the spawn point
    pub fn new<R: Rng>(tuning: ObstacleTuning, rng: &mut R) -> Self {
        let mut stream = Self {
            obstacles: Vec::new(),
            tuning,
            next_id: 1,
        };
        stream.spawn(rng);
        stream
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    fn spawn<R: Rng>(&mut self, rng: &mut R) {
        let id = self.next_id;
        self.next_id += 1;
        let obstacle = Obstacle::new(id, self.tuning.spawn_x, &self.tuning, rng);
        log::debug!(
            "Spawned obstacle {} at x={} (gap centre {:.1})",
            id,
            obstacle.x,
            obstacle.gap_center_y
        );
        self.obstacles.push(obstacle);
    }

    /// Advance one tick and return the number of pass events
    ///
    /// Order: move, detect passes, spawn replacements, retire off-screen.
    pub fn step<R: Rng>(&mut self, avatar_x: f32, rng: &mut R) -> u32 {
        for obstacle in &mut self.obstacles {
            obstacle.step(&self.tuning);
        }

        let mut passes = 0;
        for obstacle in &mut self.obstacles {
            if obstacle.x < avatar_x && obstacle.mark_passed() {
                log::debug!("Passed obstacle {}", obstacle.id);
                passes += 1;
            }
        }

        for _ in 0..passes {
            self.spawn(rng);
        }

        let tuning = self.tuning;
        self.obstacles.retain(|o| {
            let off = o.is_off_screen(&tuning);
            if off {
                log::debug!("Retired obstacle {}", o.id);
            }
            !off
        });

        passes
    }

    /// Nearest obstacle not yet passed
    pub fn next_unpassed(&self) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| !o.passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use crate::consts::*;

    #[test]
    fn test_gap_within_bounds() {
        let tuning = ObstacleTuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for id in 0..500 {
            let o = Obstacle::new(id, OBSTACLE_SPAWN_X, &tuning, &mut rng);
            assert!(o.gap_top(&tuning) >= GAP_MARGIN_TOP);
            assert!(o.gap_bottom(&tuning) <= GROUND_Y - GAP_MARGIN_BOTTOM);
            // Top barrier still reaches onto the screen
            assert!(o.top_barrier_y(&tuning) + tuning.height > 0.0);
        }
    }

    #[test]
    fn test_mark_passed_idempotent() {
        let tuning = ObstacleTuning::default();
        let mut o = Obstacle::with_gap_top(1, 100.0, 200.0, &tuning);
        assert!(o.mark_passed());
        assert!(!o.mark_passed());
        assert!(o.passed);
    }

    #[test]
    fn test_barrier_geometry() {
        let tuning = ObstacleTuning::default();
        let o = Obstacle::with_gap_top(1, 0.0, 200.0, &tuning);
        assert_eq!(o.gap_center_y, 325.0);
        assert_eq!(o.top_barrier_y(&tuning), 200.0 - OBSTACLE_HEIGHT as f32);
        assert_eq!(o.bottom_barrier_y(&tuning), 450.0);
    }

    #[test]
    fn test_reaches_zero_after_120_ticks() {
        let tuning = ObstacleTuning::default();
        let mut o = Obstacle::with_gap_top(1, 600.0, 200.0, &tuning);
        for _ in 0..120 {
            o.step(&tuning);
        }
        assert_eq!(o.x, 0.0);
        assert!(!o.is_off_screen(&tuning));
        // Retired only once x + width < 0
        for _ in 0..20 {
            o.step(&tuning);
        }
        assert_eq!(o.x, -100.0);
        assert!(!o.is_off_screen(&tuning));
        o.step(&tuning);
        assert!(o.is_off_screen(&tuning));
    }

    #[test]
    fn test_pass_spawns_exactly_one() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut stream = ObstacleStream::new(ObstacleTuning::default(), &mut rng);
        let mut total = 0;
        // 600 -> below 230 after 75 ticks
        for _ in 0..80 {
            total += stream.step(AVATAR_SPAWN_X, &mut rng);
        }
        assert_eq!(total, 1);
        assert_eq!(stream.len(), 2);
        assert_eq!(stream.iter().filter(|o| !o.passed).count(), 1);
        assert_eq!(stream.next_unpassed().map(|o| o.id), Some(2));
    }

    #[test]
    fn test_retired_obstacles_removed() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut stream = ObstacleStream::new(ObstacleTuning::default(), &mut rng);
        for _ in 0..400 {
            stream.step(AVATAR_SPAWN_X, &mut rng);
            assert!(!stream.is_empty());
            assert!(stream.iter().all(|o| !o.is_off_screen(&stream.tuning)));
        }
        // Spawn order is left-to-right order
        let xs: Vec<f32> = stream.iter().map(|o| o.x).collect();
        assert!(xs.windows(2).all(|w| w[0] <= w[1]));
    }
}
