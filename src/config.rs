//! Session configuration
//!
//! Every tuning constant of a session lives here. Defaults reproduce the
//! classic arcade game; a JSON file can override any subset of fields.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Tuning for one game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,
    /// Screen y of the ground's top surface
    pub ground_y: f32,
    pub ground_tile_width: f32,
    /// Pixels per tick the ground scrolls left
    pub ground_velocity: f32,

    // === Obstacles ===
    /// Vertical size of the passable gap
    pub gap_height: f32,
    pub gap_margin_top: f32,
    pub gap_margin_bottom: f32,
    /// Pixels per tick obstacles scroll left
    pub obstacle_velocity: f32,
    pub obstacle_spawn_x: f32,
    pub obstacle_width: u32,
    pub obstacle_height: u32,

    // === Avatar ===
    pub avatar_spawn: Vec2,
    pub avatar_width: u32,
    pub avatar_height: u32,
    /// Fixed height used for ground/ceiling tests, independent of the wing frame
    pub hitbox_height: f32,
    pub impulse_velocity: f32,
    pub gravity: f32,
    /// Upper bound on per-tick displacement
    pub max_fall_speed: f32,
    pub rise_bias: f32,
    pub max_rotation: f32,
    pub rotation_velocity: f32,
    pub tilt_hold_distance: f32,
    pub glide_tilt: f32,
    pub animation_ticks: u32,
    pub ceiling_margin: f32,

    // === Loop ===
    /// Fixed ticks per second
    pub tick_rate: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            ground_y: GROUND_Y,
            ground_tile_width: GROUND_TILE_WIDTH,
            ground_velocity: GROUND_VELOCITY,

            gap_height: GAP_HEIGHT,
            gap_margin_top: GAP_MARGIN_TOP,
            gap_margin_bottom: GAP_MARGIN_BOTTOM,
            obstacle_velocity: OBSTACLE_VELOCITY,
            obstacle_spawn_x: OBSTACLE_SPAWN_X,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,

            avatar_spawn: Vec2::new(AVATAR_SPAWN_X, AVATAR_SPAWN_Y),
            avatar_width: AVATAR_WIDTH,
            avatar_height: AVATAR_HEIGHT,
            hitbox_height: AVATAR_HEIGHT as f32,
            impulse_velocity: IMPULSE_VELOCITY,
            gravity: GRAVITY,
            max_fall_speed: MAX_FALL_SPEED,
            rise_bias: RISE_BIAS,
            max_rotation: MAX_ROTATION,
            rotation_velocity: ROTATION_VELOCITY,
            tilt_hold_distance: TILT_HOLD_DISTANCE,
            glide_tilt: GLIDE_TILT,
            animation_ticks: ANIMATION_TICKS,
            ceiling_margin: CEILING_MARGIN,

            tick_rate: TICK_RATE,
        }
    }
}

impl SessionConfig {
    /// Range the gap's top edge is drawn from: `[min, max)`
    pub fn gap_top_range(&self) -> (f32, f32) {
        (
            self.gap_margin_top,
            self.ground_y - self.gap_margin_bottom - self.gap_height,
        )
    }

    /// Fixed timestep in seconds
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    /// Fastest ground scroll two leapfrogging tiles can keep seamless
    pub fn max_ground_velocity(&self) -> f32 {
        2.0 * self.ground_tile_width - self.playfield_width
    }

    /// Reject configurations the simulation cannot run
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("ground_y", self.ground_y),
            ("ground_tile_width", self.ground_tile_width),
            ("ground_velocity", self.ground_velocity),
            ("gap_height", self.gap_height),
            ("obstacle_velocity", self.obstacle_velocity),
            ("obstacle_width", self.obstacle_width as f32),
            ("obstacle_height", self.obstacle_height as f32),
            ("avatar_width", self.avatar_width as f32),
            ("avatar_height", self.avatar_height as f32),
            ("hitbox_height", self.hitbox_height),
            ("gravity", self.gravity),
            ("max_fall_speed", self.max_fall_speed),
            ("rotation_velocity", self.rotation_velocity),
            ("animation_ticks", self.animation_ticks as f32),
            ("tick_rate", self.tick_rate as f32),
        ];
        for (field, value) in positive {
            // NaN fails this comparison too
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if !(self.impulse_velocity < 0.0) {
            return Err(ConfigError::ImpulseNotUpward(self.impulse_velocity));
        }

        if !(self.rise_bias >= 0.0) {
            return Err(ConfigError::NegativeRiseBias(self.rise_bias));
        }

        for (field, value) in [
            ("gap_margin_top", self.gap_margin_top),
            ("gap_margin_bottom", self.gap_margin_bottom),
        ] {
            if !(value >= 0.0) {
                return Err(ConfigError::NegativeMargin { field, value });
            }
        }

        if self.animation_ticks > MAX_ANIMATION_TICKS {
            return Err(ConfigError::AnimationTooSlow(self.animation_ticks));
        }

        for (sprite, width, height) in [
            ("avatar", self.avatar_width, self.avatar_height),
            ("obstacle", self.obstacle_width, self.obstacle_height),
        ] {
            if width > MAX_SPRITE_SIDE || height > MAX_SPRITE_SIDE {
                return Err(ConfigError::SpriteTooLarge {
                    sprite,
                    width,
                    height,
                });
            }
        }

        let (min_top, max_top) = self.gap_top_range();
        if max_top <= min_top {
            return Err(ConfigError::GapTooLarge {
                gap_height: self.gap_height,
                available: self.ground_y - self.gap_margin_bottom - self.gap_margin_top,
            });
        }

        if self.ground_tile_width < self.playfield_width {
            return Err(ConfigError::GroundTileTooNarrow {
                tile_width: self.ground_tile_width,
                playfield_width: self.playfield_width,
            });
        }

        // Top barrier must reach y = 0 even for the lowest gap
        if (self.obstacle_height as f32) < max_top {
            return Err(ConfigError::ObstacleTooShort {
                obstacle_height: self.obstacle_height,
                required: max_top,
            });
        }

        let max_ground_velocity = self.max_ground_velocity();
        if self.ground_velocity > max_ground_velocity {
            return Err(ConfigError::GroundTooFast {
                velocity: self.ground_velocity,
                max: max_ground_velocity,
            });
        }

        let spawn = self.avatar_spawn;
        if !(spawn.x >= 0.0
            && spawn.x < self.playfield_width
            && spawn.y >= 0.0
            && spawn.y + self.hitbox_height < self.ground_y)
        {
            return Err(ConfigError::SpawnOutOfBounds {
                x: spawn.x,
                y: spawn.y,
            });
        }

        if !(self.obstacle_spawn_x > spawn.x) {
            return Err(ConfigError::SpawnBehindAvatar {
                spawn_x: self.obstacle_spawn_x,
                avatar_x: spawn.x,
            });
        }

        if !(-90.0..=90.0).contains(&self.max_rotation) {
            return Err(ConfigError::RotationOutOfRange(self.max_rotation));
        }

        Ok(())
    }

    /// Parse from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded session config from {}", path.display());
        Ok(config)
    }
}
