//! Configuration errors
//!
//! The simulation itself never fails once built; every error the crate can
//! produce is raised while validating or loading a [`SessionConfig`].
//!
//! [`SessionConfig`]: crate::config::SessionConfig

use std::fmt;

/// Reasons a session configuration is rejected
#[derive(Debug)]
pub enum ConfigError {
    /// A velocity, size, rate or coefficient that must be strictly positive
    NonPositive { field: &'static str, value: f32 },
    /// Impulse must push the avatar upward (negative velocity)
    ImpulseNotUpward(f32),
    /// Rise bias must not push against the rise
    NegativeRiseBias(f32),
    /// Gap margins must keep the gap clear of the screen top and the ground
    NegativeMargin { field: &'static str, value: f32 },
    /// Top barrier too short to reach the top of the screen for every gap
    ObstacleTooShort { obstacle_height: u32, required: f32 },
    /// Ground scrolls too far per tick for two tiles to leave no seam
    GroundTooFast { velocity: f32, max: f32 },
    /// Obstacles must spawn ahead of the avatar
    SpawnBehindAvatar { spawn_x: f32, avatar_x: f32 },
    /// Wing frame hold time too long to cycle
    AnimationTooSlow(u32),
    /// Sprite dimensions beyond what a silhouette can hold
    SpriteTooLarge {
        sprite: &'static str,
        width: u32,
        height: u32,
    },
    /// The gap does not fit between the top margin and the ground
    GapTooLarge { gap_height: f32, available: f32 },
    /// Two ground tiles cannot cover the playfield without a seam
    GroundTileTooNarrow { tile_width: f32, playfield_width: f32 },
    /// Avatar spawn point lies outside the playfield
    SpawnOutOfBounds { x: f32, y: f32 },
    /// Maximum nose-up rotation must lie in [-90, 90] degrees
    RotationOutOfRange(f32),
    /// A supplied silhouette does not match the configured dimensions
    SpriteMismatch {
        sprite: &'static str,
        expected: (u32, u32),
        actual: (u32, u32),
    },
    /// Config JSON could not be parsed
    Parse(serde_json::Error),
    /// Config file could not be read
    Io(std::io::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositive { field, value } => {
                write!(f, "{} must be positive (got {})", field, value)
            }
            ConfigError::ImpulseNotUpward(v) => {
                write!(f, "impulse_velocity must be negative (upward), got {}", v)
            }
            ConfigError::NegativeRiseBias(v) => {
                write!(f, "rise_bias must not be negative, got {}", v)
            }
            ConfigError::NegativeMargin { field, value } => {
                write!(f, "{} must not be negative (got {})", field, value)
            }
            ConfigError::ObstacleTooShort {
                obstacle_height,
                required,
            } => write!(
                f,
                "obstacle_height {} cannot reach the top of the screen (needs {})",
                obstacle_height, required
            ),
            ConfigError::GroundTooFast { velocity, max } => write!(
                f,
                "ground_velocity {} leaves a seam between ground tiles (max {})",
                velocity, max
            ),
            ConfigError::SpawnBehindAvatar { spawn_x, avatar_x } => write!(
                f,
                "obstacle_spawn_x {} must be ahead of the avatar at {}",
                spawn_x, avatar_x
            ),
            ConfigError::AnimationTooSlow(ticks) => {
                write!(f, "animation_ticks {} is too large", ticks)
            }
            ConfigError::SpriteTooLarge {
                sprite,
                width,
                height,
            } => write!(f, "{} sprite {}x{} is too large", sprite, width, height),
            ConfigError::GapTooLarge {
                gap_height,
                available,
            } => write!(
                f,
                "gap_height {} leaves no room for the gap (only {} px between margins)",
                gap_height, available
            ),
            ConfigError::GroundTileTooNarrow {
                tile_width,
                playfield_width,
            } => write!(
                f,
                "ground_tile_width {} is narrower than the playfield ({})",
                tile_width, playfield_width
            ),
            ConfigError::SpawnOutOfBounds { x, y } => {
                write!(f, "avatar spawn ({}, {}) is outside the playfield", x, y)
            }
            ConfigError::RotationOutOfRange(deg) => {
                write!(f, "max_rotation {} is outside [-90, 90]", deg)
            }
            ConfigError::SpriteMismatch {
                sprite,
                expected,
                actual,
            } => write!(
                f,
                "{} silhouette is {}x{}, expected {}x{}",
                sprite, actual.0, actual.1, expected.0, expected.1
            ),
            ConfigError::Parse(e) => write!(f, "invalid config JSON: {}", e),
            ConfigError::Io(e) => write!(f, "could not read config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
