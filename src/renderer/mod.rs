//! Rendering collaborators
//!
//! Renderers only ever see a [`Snapshot`]; art, windows and fonts stay on
//! their side of the boundary.

pub mod text;

pub use text::TextRenderer;

use crate::sim::Snapshot;

/// Draws one snapshot per tick
pub trait Renderer {
    fn draw(&mut self, snapshot: &Snapshot);
}

/// Renders nothing (headless runs, tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _snapshot: &Snapshot) {}
}
