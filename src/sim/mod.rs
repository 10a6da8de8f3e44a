//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod avatar;
pub mod collision;
pub mod ground;
pub mod obstacle;
pub mod silhouette;
pub mod state;
pub mod tick;

pub use avatar::{Avatar, AvatarTuning};
pub use collision::{
    BarrierHit, PlacedShape, avatar_vs_ceiling, avatar_vs_ground, avatar_vs_obstacle,
    shape_vs_obstacle,
};
pub use ground::Ground;
pub use obstacle::{Obstacle, ObstacleStream, ObstacleTuning};
pub use silhouette::{Silhouette, Sprites, WingFrame};
pub use state::{
    AvatarPose, EndCause, FrameEvents, GameSession, GroundView, ObstacleView, SessionState,
    Snapshot, new_session,
};
pub use tick::tick;
