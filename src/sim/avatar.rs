//! Avatar physics and wing animation
//!
//! The avatar never moves horizontally; the world scrolls past it. Vertical
//! motion follows the closed-form displacement `v*t + g*t²` counted from the
//! last impulse, clamped so a long fall cannot tunnel through a barrier.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::silhouette::{Silhouette, Sprites, WingFrame};
use crate::config::SessionConfig;
use crate::consts::MIN_ROTATION;

/// Physics tuning copied out of the session config
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AvatarTuning {
    pub impulse_velocity: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub rise_bias: f32,
    pub max_rotation: f32,
    pub rotation_velocity: f32,
    pub tilt_hold_distance: f32,
    pub glide_tilt: f32,
    pub animation_ticks: u32,
    pub hitbox_height: f32,
}

impl From<&SessionConfig> for AvatarTuning {
    fn from(config: &SessionConfig) -> Self {
        Self {
            impulse_velocity: config.impulse_velocity,
            gravity: config.gravity,
            max_fall_speed: config.max_fall_speed,
            rise_bias: config.rise_bias,
            max_rotation: config.max_rotation,
            rotation_velocity: config.rotation_velocity,
            tilt_hold_distance: config.tilt_hold_distance,
            glide_tilt: config.glide_tilt,
            animation_ticks: config.animation_ticks,
            hitbox_height: config.hitbox_height,
        }
    }
}

impl Default for AvatarTuning {
    fn default() -> Self {
        Self::from(&SessionConfig::default())
    }
}

/// The player-controlled body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    /// Top-left of the unrotated sprite; x is fixed for the whole session
    pub pos: Vec2,
    /// Vertical velocity set by the last impulse (negative = up)
    pub velocity_y: f32,
    /// Degrees, positive = nose up
    pub tilt: f32,
    /// Ticks since the last impulse (or since spawn)
    pub ticks_since_impulse: u32,
    /// Height at the last impulse, used to decide when to pitch down
    pub reference_y: f32,
    /// Displacement applied by the most recent step
    pub last_disp: f32,
    /// Position in the wing cycle, in ticks
    pub anim_ticks: u32,
    pub frame: WingFrame,
    pub tuning: AvatarTuning,
}

impl Avatar {
    pub fn new(spawn: Vec2, tuning: AvatarTuning) -> Self {
        Self {
            pos: spawn,
            velocity_y: 0.0,
            tilt: 0.0,
            ticks_since_impulse: 0,
            reference_y: spawn.y,
            last_disp: 0.0,
            anim_ticks: 0,
            frame: WingFrame::Up,
            tuning,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos.y
    }

    /// Lower edge of the fixed hitbox
    #[inline]
    pub fn lower_edge(&self) -> f32 {
        self.pos.y + self.tuning.hitbox_height
    }

    /// Jump: restart the impulse clock with upward velocity
    pub fn impulse(&mut self) {
        self.velocity_y = self.tuning.impulse_velocity;
        self.ticks_since_impulse = 0;
        self.reference_y = self.pos.y;
    }

    /// Displacement `t` ticks after the last impulse, before the rise bias
    #[inline]
    pub fn displacement_at(&self, t: u32) -> f32 {
        let t = t as f32;
        let disp = self.velocity_y * t + self.tuning.gravity * t * t;
        disp.min(self.tuning.max_fall_speed)
    }

    /// Advance one tick: move, pitch, then flap
    pub fn step(&mut self) {
        self.ticks_since_impulse += 1;

        let mut disp = self.displacement_at(self.ticks_since_impulse);
        if disp < 0.0 {
            disp -= self.tuning.rise_bias;
        }
        self.pos.y += disp;
        self.last_disp = disp;

        let t = &self.tuning;
        if disp < 0.0 || self.pos.y < self.reference_y + t.tilt_hold_distance {
            self.tilt = self.tilt.max(t.max_rotation);
        } else {
            self.tilt = (self.tilt - t.rotation_velocity).max(MIN_ROTATION);
        }

        self.animate();
    }

    /// Advance the wing cycle: Up, Mid, Down, Mid
    fn animate(&mut self) {
        let hold = self.tuning.animation_ticks.max(1);

        if self.tilt <= self.tuning.glide_tilt {
            // Nose-dive: wings held level, cycle parked on the Mid phase
            self.frame = WingFrame::Mid;
            self.anim_ticks = hold;
            return;
        }

        let cycle = hold.saturating_mul(4);
        self.anim_ticks = self.anim_ticks.saturating_add(1) % cycle;
        self.frame = match self.anim_ticks / hold {
            0 => WingFrame::Up,
            1 | 3 => WingFrame::Mid,
            _ => WingFrame::Down,
        };
    }

    /// Current silhouette rotated by tilt, with its screen top-left
    ///
    /// The rotated frame stays centred on the unrotated frame's centre.
    pub fn collision_shape(&self, sprites: &Sprites) -> (IVec2, Silhouette) {
        let base = sprites.avatar_frame(self.frame);
        let shape = base.rotated(self.tilt);
        let center = self.pos + Vec2::new(base.width() as f32, base.height() as f32) / 2.0;
        let top_left = center - Vec2::new(shape.width() as f32, shape.height() as f32) / 2.0;
        (top_left.round().as_ivec2(), shape)
    }
}
