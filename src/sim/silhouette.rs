//! Opaque-pixel silhouettes for collision
//!
//! A silhouette is a row-major bitmask of a sprite's opaque pixels. Two
//! silhouettes overlap at an integer offset if any opaque pixel of one lands
//! on an opaque pixel of the other. Box tests would reject fair near-misses
//! around the avatar's rounded body and the barrier caps.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Opaque-pixel bitmask of a sprite frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Silhouette {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Silhouette {
    /// Fully transparent silhouette
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width as usize * height as usize],
        }
    }

    /// Build from a predicate evaluated at every pixel
    pub fn from_fn(width: u32, height: u32, mut opaque: impl FnMut(u32, u32) -> bool) -> Self {
        let mut bits = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                bits.push(opaque(x, y));
            }
        }
        Self {
            width,
            height,
            bits,
        }
    }

    /// Build from RGBA8 pixel data; alpha above `alpha_threshold` is opaque
    ///
    /// Returns `None` if `rgba` is not exactly `width * height * 4` bytes.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8], alpha_threshold: u8) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        if rgba.len() != expected {
            return None;
        }
        let bits = rgba.chunks_exact(4).map(|px| px[3] > alpha_threshold).collect();
        Some(Self {
            width,
            height,
            bits,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether the pixel at (x, y) is opaque; out-of-bounds reads as transparent
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.bits[y as usize * self.width as usize + x as usize]
    }

    /// Number of opaque pixels
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// First overlapping pixel when `other`'s top-left sits at `offset` in
    /// this silhouette's space. The point is in this silhouette's space.
    pub fn overlap(&self, other: &Silhouette, offset: IVec2) -> Option<IVec2> {
        // Intersection of both rectangles in self's space
        let x0 = offset.x.max(0);
        let y0 = offset.y.max(0);
        let x1 = (offset.x + other.width as i32).min(self.width as i32);
        let y1 = (offset.y + other.height as i32).min(self.height as i32);

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - offset.x, y - offset.y) {
                    return Some(IVec2::new(x, y));
                }
            }
        }
        None
    }

    /// Mirror top-to-bottom
    pub fn flipped_vertical(&self) -> Self {
        Self::from_fn(self.width, self.height, |x, y| {
            self.get(x as i32, (self.height - 1 - y) as i32)
        })
    }

    /// Rotate counter-clockwise on screen by `degrees` about the centre
    ///
    /// The result's bounds grow to fit the rotated frame; callers keep the
    /// centre fixed when placing it. Nearest-neighbour sampling.
    pub fn rotated(&self, degrees: f32) -> Self {
        if degrees == 0.0 {
            return self.clone();
        }

        let (sin, cos) = degrees.to_radians().sin_cos();
        let (w, h) = (self.width as f32, self.height as f32);
        let new_w = ((w * cos.abs() + h * sin.abs()).round() as u32).max(1);
        let new_h = ((w * sin.abs() + h * cos.abs()).round() as u32).max(1);

        let src_cx = w / 2.0;
        let src_cy = h / 2.0;
        let dst_cx = new_w as f32 / 2.0;
        let dst_cy = new_h as f32 / 2.0;

        Self::from_fn(new_w, new_h, |x, y| {
            // Destination pixel centre relative to destination centre
            let dx = x as f32 + 0.5 - dst_cx;
            let dy = y as f32 + 0.5 - dst_cy;
            // Inverse rotation (y points down on screen)
            let sx = dx * cos - dy * sin + src_cx;
            let sy = dx * sin + dy * cos + src_cy;
            self.get(sx.floor() as i32, sy.floor() as i32)
        })
    }
}

/// Which of the three wing sprites is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WingFrame {
    Up,
    Mid,
    Down,
}

impl WingFrame {
    pub const ALL: [WingFrame; 3] = [WingFrame::Up, WingFrame::Mid, WingFrame::Down];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            WingFrame::Up => 0,
            WingFrame::Mid => 1,
            WingFrame::Down => 2,
        }
    }
}

/// Collision silhouettes for every sprite the simulation tests against
#[derive(Debug, Clone)]
pub struct Sprites {
    /// Avatar wing frames, indexed by [`WingFrame::index`]
    pub avatar: [Silhouette; 3],
    /// Top barrier (cap at the bottom, facing the gap)
    pub barrier_top: Silhouette,
    /// Bottom barrier (cap at the top, facing the gap)
    pub barrier_bottom: Silhouette,
}

impl Sprites {
    /// Procedural stand-ins for the game art
    pub fn procedural(avatar_w: u32, avatar_h: u32, barrier_w: u32, barrier_h: u32) -> Self {
        let avatar = WingFrame::ALL.map(|frame| avatar_silhouette(avatar_w, avatar_h, frame));
        let barrier_bottom = barrier_silhouette(barrier_w, barrier_h);
        let barrier_top = barrier_bottom.flipped_vertical();
        Self {
            avatar,
            barrier_top,
            barrier_bottom,
        }
    }

    /// Build from externally supplied masks (e.g. decoded sprite art)
    ///
    /// The top barrier is derived by flipping the bottom one.
    pub fn from_masks(avatar: [Silhouette; 3], barrier_bottom: Silhouette) -> Self {
        let barrier_top = barrier_bottom.flipped_vertical();
        Self {
            avatar,
            barrier_top,
            barrier_bottom,
        }
    }

    #[inline]
    pub fn avatar_frame(&self, frame: WingFrame) -> &Silhouette {
        &self.avatar[frame.index()]
    }
}

impl Default for Sprites {
    fn default() -> Self {
        Self::procedural(AVATAR_WIDTH, AVATAR_HEIGHT, OBSTACLE_WIDTH, OBSTACLE_HEIGHT)
    }
}

#[inline]
fn in_ellipse(x: f32, y: f32, cx: f32, cy: f32, rx: f32, ry: f32) -> bool {
    let nx = (x - cx) / rx;
    let ny = (y - cy) / ry;
    nx * nx + ny * ny <= 1.0
}

/// Rounded body facing right, beak at the front, wing position per frame
fn avatar_silhouette(w: u32, h: u32, frame: WingFrame) -> Silhouette {
    let (wf, hf) = (w as f32, h as f32);
    let body = (wf * 0.44, hf * 0.54, wf * 0.38, hf * 0.42);
    let beak_x = wf * 0.8;
    let (beak_y0, beak_y1) = (hf * 0.5, hf * 0.7);
    let wing_cy = match frame {
        WingFrame::Up => hf * 0.3,
        WingFrame::Mid => hf * 0.54,
        WingFrame::Down => hf * 0.78,
    };
    let wing = (wf * 0.16, wing_cy, wf * 0.16, hf * 0.14);

    Silhouette::from_fn(w, h, |x, y| {
        let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
        in_ellipse(px, py, body.0, body.1, body.2, body.3)
            || in_ellipse(px, py, wing.0, wing.1, wing.2, wing.3)
            || (px >= beak_x && py >= beak_y0 && py < beak_y1)
    })
}

/// Barrier with its cap at the top; flip for the upper barrier
fn barrier_silhouette(w: u32, h: u32) -> Silhouette {
    let cap = OBSTACLE_CAP_HEIGHT.min(h);
    let inset = OBSTACLE_BODY_INSET.min(w / 4);
    Silhouette::from_fn(w, h, |x, y| y < cap || (x >= inset && x < w - inset))
}
