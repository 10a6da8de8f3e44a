//! Gap Runner - A side-scrolling gap-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (avatar physics, obstacles, collisions, session state)
//! - `config`: Data-driven tuning, validated before a session is built
//! - `platform`: Input sources and the fixed-tick application driver
//! - `audio`: Sound effect sink consumed by the driver
//! - `renderer`: Snapshot renderers (text grid for headless play)

pub mod audio;
pub mod config;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::SessionConfig;
pub use error::ConfigError;
pub use sim::{FrameEvents, GameSession, SessionState, Snapshot, new_session};

/// Game configuration constants
pub mod consts {
    /// Simulation tick rate (frames per second)
    pub const TICK_RATE: u32 = 40;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 500.0;
    pub const PLAYFIELD_HEIGHT: f32 = 800.0;

    /// Ground strip
    pub const GROUND_Y: f32 = 730.0;
    pub const GROUND_TILE_WIDTH: f32 = 672.0;
    pub const GROUND_VELOCITY: f32 = 5.0;

    /// Obstacle defaults
    pub const GAP_HEIGHT: f32 = 250.0;
    /// Gap top edge never closer than this to the top of the screen
    pub const GAP_MARGIN_TOP: f32 = 50.0;
    /// Gap bottom edge never closer than this to the ground
    pub const GAP_MARGIN_BOTTOM: f32 = 30.0;
    pub const OBSTACLE_VELOCITY: f32 = 5.0;
    pub const OBSTACLE_SPAWN_X: f32 = 600.0;
    pub const OBSTACLE_WIDTH: u32 = 104;
    pub const OBSTACLE_HEIGHT: u32 = 640;
    /// Rows of the full-width cap at the gap end of a barrier
    pub const OBSTACLE_CAP_HEIGHT: u32 = 48;
    /// Horizontal inset of the barrier body below the cap
    pub const OBSTACLE_BODY_INSET: u32 = 4;

    /// Avatar defaults
    pub const AVATAR_SPAWN_X: f32 = 230.0;
    pub const AVATAR_SPAWN_Y: f32 = 350.0;
    pub const AVATAR_WIDTH: u32 = 68;
    pub const AVATAR_HEIGHT: u32 = 48;
    /// Upward velocity set by an impulse (negative = up)
    pub const IMPULSE_VELOCITY: f32 = -10.5;
    /// Coefficient of the squared tick term in the displacement formula
    pub const GRAVITY: f32 = 1.5;
    /// Displacement clamp per tick (prevents tunneling)
    pub const MAX_FALL_SPEED: f32 = 16.0;
    /// Extra upward displacement while rising
    pub const RISE_BIAS: f32 = 2.0;

    /// Tilt (degrees, positive = nose up)
    pub const MAX_ROTATION: f32 = 20.0;
    pub const MIN_ROTATION: f32 = -90.0;
    pub const ROTATION_VELOCITY: f32 = 20.0;
    /// Avatar keeps its nose up until it sinks this far below the impulse height
    pub const TILT_HOLD_DISTANCE: f32 = 50.0;
    /// At or below this tilt the wings stop flapping
    pub const GLIDE_TILT: f32 = -80.0;

    /// Ticks each wing frame is held
    pub const ANIMATION_TICKS: u32 = 5;
    /// Longest hold that still fits a four-phase wing cycle in a u32
    pub const MAX_ANIMATION_TICKS: u32 = u32::MAX / 4;

    /// Largest sprite side a silhouette accepts
    pub const MAX_SPRITE_SIDE: u32 = 4096;

    /// How far above the screen the avatar may rise before it counts as out of bounds
    pub const CEILING_MARGIN: f32 = 10.0;
}
