//! Scrolling ground strip
//!
//! Two tiles of width `W` leapfrog each other: whichever scrolls fully off
//! the left edge jumps to the right of the other, so the pair always covers
//! the playfield as long as `W` is at least the playfield width.

use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ground {
    /// Screen y of the top surface (collision plane)
    pub y: f32,
    pub x1: f32,
    pub x2: f32,
    pub tile_width: f32,
    pub velocity: f32,
}

impl Ground {
    pub fn new(y: f32, tile_width: f32, velocity: f32) -> Self {
        Self {
            y,
            x1: 0.0,
            x2: tile_width,
            tile_width,
            velocity,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(
            config.ground_y,
            config.ground_tile_width,
            config.ground_velocity,
        )
    }

    pub fn step(&mut self) {
        self.x1 -= self.velocity;
        self.x2 -= self.velocity;

        if self.x1 + self.tile_width < 0.0 {
            self.x1 = self.x2 + self.tile_width;
        }
        if self.x2 + self.tile_width < 0.0 {
            self.x2 = self.x1 + self.tile_width;
        }
    }

    /// Whether the two tiles cover `[0, width)` without a seam
    pub fn covers(&self, width: f32) -> bool {
        let (left, right) = if self.x1 <= self.x2 {
            (self.x1, self.x2)
        } else {
            (self.x2, self.x1)
        };
        left <= 0.0 && right <= left + self.tile_width && right + self.tile_width >= width
    }
}
