//! Collision detection
//!
//! Obstacles are tested at the silhouette level: the avatar's current wing
//! frame, rotated by its tilt, against both barrier masks at their integer
//! screen offsets. Ground and ceiling use the avatar's fixed hitbox height so
//! the bounds do not shift with the animation frame or rotation.

use glam::IVec2;

use super::avatar::Avatar;
use super::obstacle::{Obstacle, ObstacleTuning};
use super::silhouette::{Silhouette, Sprites};

/// An avatar silhouette placed on screen
#[derive(Debug, Clone)]
pub struct PlacedShape {
    /// Screen position of the silhouette's top-left
    pub top_left: IVec2,
    pub shape: Silhouette,
}

impl PlacedShape {
    pub fn of_avatar(avatar: &Avatar, sprites: &Sprites) -> Self {
        let (top_left, shape) = avatar.collision_shape(sprites);
        Self { top_left, shape }
    }

    /// Overlap with a silhouette whose top-left sits at `at` on screen
    pub fn hits(&self, other: &Silhouette, at: IVec2) -> bool {
        self.shape.overlap(other, at - self.top_left).is_some()
    }
}

/// Which barrier of an obstacle was touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrierHit {
    Top,
    Bottom,
}

/// Screen top-left of an obstacle's top and bottom barriers
pub fn barrier_positions(obstacle: &Obstacle, tuning: &ObstacleTuning) -> (IVec2, IVec2) {
    let x = obstacle.x.round() as i32;
    let top = IVec2::new(x, obstacle.top_barrier_y(tuning).round() as i32);
    let bottom = IVec2::new(x, obstacle.bottom_barrier_y(tuning).round() as i32);
    (top, bottom)
}

/// Test an already-placed avatar shape against one obstacle
///
/// Both barriers are always evaluated, so the answer never depends on
/// which one is checked first.
pub fn shape_vs_obstacle(
    avatar: &PlacedShape,
    obstacle: &Obstacle,
    tuning: &ObstacleTuning,
    sprites: &Sprites,
) -> Option<BarrierHit> {
    let (top_at, bottom_at) = barrier_positions(obstacle, tuning);
    let top = avatar.hits(&sprites.barrier_top, top_at);
    let bottom = avatar.hits(&sprites.barrier_bottom, bottom_at);
    match (top, bottom) {
        (true, _) => Some(BarrierHit::Top),
        (false, true) => Some(BarrierHit::Bottom),
        (false, false) => None,
    }
}

/// Silhouette overlap between the avatar and either barrier of an obstacle
pub fn avatar_vs_obstacle(
    avatar: &Avatar,
    obstacle: &Obstacle,
    tuning: &ObstacleTuning,
    sprites: &Sprites,
) -> bool {
    let placed = PlacedShape::of_avatar(avatar, sprites);
    shape_vs_obstacle(&placed, obstacle, tuning, sprites).is_some()
}

/// Avatar's hitbox has reached the ground's top surface
#[inline]
pub fn avatar_vs_ground(avatar: &Avatar, ground_y: f32) -> bool {
    avatar.lower_edge() >= ground_y
}

/// Avatar has risen fully above the top of the screen (beyond `margin`)
#[inline]
pub fn avatar_vs_ceiling(avatar: &Avatar, margin: f32) -> bool {
    avatar.lower_edge() < -margin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::avatar::AvatarTuning;
    use crate::sim::silhouette::WingFrame;
    use glam::Vec2;

    fn avatar_at(x: f32, y: f32) -> Avatar {
        Avatar::new(Vec2::new(x, y), AvatarTuning::default())
    }

    #[test]
    fn test_avatar_in_gap_is_safe() {
        let sprites = Sprites::default();
        let tuning = ObstacleTuning::default();
        // Gap spans y 200..450, avatar 48 tall centred in it
        let obstacle = Obstacle::with_gap_top(1, 200.0, 200.0, &tuning);
        let avatar = avatar_at(AVATAR_SPAWN_X, 300.0);
        assert!(!avatar_vs_obstacle(&avatar, &obstacle, &tuning, &sprites));
    }

    #[test]
    fn test_avatar_inside_top_barrier() {
        let sprites = Sprites::default();
        let tuning = ObstacleTuning::default();
        let obstacle = Obstacle::with_gap_top(1, 200.0, 400.0, &tuning);
        let avatar = avatar_at(AVATAR_SPAWN_X, 300.0);
        let placed = PlacedShape::of_avatar(&avatar, &sprites);
        assert_eq!(
            shape_vs_obstacle(&placed, &obstacle, &tuning, &sprites),
            Some(BarrierHit::Top)
        );
    }

    #[test]
    fn test_avatar_inside_bottom_barrier() {
        let sprites = Sprites::default();
        let tuning = ObstacleTuning::default();
        let obstacle = Obstacle::with_gap_top(1, 200.0, 50.0, &tuning);
        let avatar = avatar_at(AVATAR_SPAWN_X, 400.0);
        let placed = PlacedShape::of_avatar(&avatar, &sprites);
        assert_eq!(
            shape_vs_obstacle(&placed, &obstacle, &tuning, &sprites),
            Some(BarrierHit::Bottom)
        );
    }

    #[test]
    fn test_obstacle_far_right_misses() {
        let sprites = Sprites::default();
        let tuning = ObstacleTuning::default();
        let obstacle = Obstacle::with_gap_top(1, OBSTACLE_SPAWN_X, 400.0, &tuning);
        let avatar = avatar_at(AVATAR_SPAWN_X, 300.0);
        assert!(!avatar_vs_obstacle(&avatar, &obstacle, &tuning, &sprites));
    }

    #[test]
    fn test_transparent_corner_is_fair() {
        // Barrier corner just inside the avatar's bounding box but outside
        // its rounded body: a box test would call this a hit.
        let sprites = Sprites::default();
        let avatar = avatar_at(AVATAR_SPAWN_X, 300.0);
        let placed = PlacedShape::of_avatar(&avatar, &sprites);
        let corner = IVec2::new(AVATAR_SPAWN_X as i32 + 66, 300 + 46);
        let bottom_left = Silhouette::from_fn(10, 10, |_, _| true);
        assert!(!placed.hits(&bottom_left, corner));
    }

    #[test]
    fn test_tilt_changes_obstacle_result() {
        let sprites = Sprites::default();
        let tuning = ObstacleTuning::default();
        // Bottom barrier starts at y = 402, six rows below the level body
        let obstacle = Obstacle::with_gap_top(1, 200.0, 152.0, &tuning);
        let mut avatar = avatar_at(AVATAR_SPAWN_X, AVATAR_SPAWN_Y);

        avatar.tilt = 0.0;
        assert!(!avatar_vs_obstacle(&avatar, &obstacle, &tuning, &sprites));

        // Nose-down, the beak swings down to y = 407
        avatar.tilt = MIN_ROTATION;
        let placed = PlacedShape::of_avatar(&avatar, &sprites);
        assert_eq!(
            shape_vs_obstacle(&placed, &obstacle, &tuning, &sprites),
            Some(BarrierHit::Bottom)
        );
    }

    #[test]
    fn test_wing_frame_changes_silhouette_hit() {
        let sprites = Sprites::default();
        let mut avatar = avatar_at(AVATAR_SPAWN_X, AVATAR_SPAWN_Y);
        // Small block under the tail, where only the lowered wing reaches
        let block = Silhouette::from_fn(6, 4, |_, _| true);
        let at = IVec2::new(AVATAR_SPAWN_X as i32 + 2, AVATAR_SPAWN_Y as i32 + 38);

        avatar.frame = WingFrame::Up;
        assert!(!PlacedShape::of_avatar(&avatar, &sprites).hits(&block, at));

        avatar.frame = WingFrame::Down;
        assert!(PlacedShape::of_avatar(&avatar, &sprites).hits(&block, at));
    }

    #[test]
    fn test_ground_contact() {
        let avatar = avatar_at(AVATAR_SPAWN_X, GROUND_Y - AVATAR_HEIGHT as f32);
        assert!(avatar_vs_ground(&avatar, GROUND_Y));
        let avatar = avatar_at(AVATAR_SPAWN_X, GROUND_Y - AVATAR_HEIGHT as f32 - 1.0);
        assert!(!avatar_vs_ground(&avatar, GROUND_Y));
    }

    #[test]
    fn test_ceiling_exit() {
        let avatar = avatar_at(AVATAR_SPAWN_X, -60.0);
        assert!(avatar_vs_ceiling(&avatar, CEILING_MARGIN));
        let avatar = avatar_at(AVATAR_SPAWN_X, -55.0);
        assert!(!avatar_vs_ceiling(&avatar, CEILING_MARGIN));
    }
}
