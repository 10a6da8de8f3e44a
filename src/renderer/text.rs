//! Character-grid renderer
//!
//! Downsamples the playfield into a fixed grid of cells, sampling the world
//! at each cell's centre. Good enough to watch a headless run in a terminal.

use super::Renderer;
use crate::sim::{SessionState, Snapshot, WingFrame};

const SKY: char = ' ';
const BARRIER: char = '#';
const GROUND_A: char = '=';
const GROUND_B: char = '-';

/// Renders snapshots into rows of characters
#[derive(Debug, Clone)]
pub struct TextRenderer {
    cols: usize,
    rows: usize,
    lines: Vec<String>,
}

impl TextRenderer {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
            lines: Vec::new(),
        }
    }

    /// Last rendered frame
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Last rendered frame joined with newlines
    pub fn frame(&self) -> String {
        self.lines.join("\n")
    }

    fn avatar_char(snapshot: &Snapshot) -> char {
        if snapshot.state == SessionState::Terminal {
            return 'X';
        }
        match snapshot.avatar.frame {
            WingFrame::Up => '^',
            WingFrame::Mid => '>',
            WingFrame::Down => 'v',
        }
    }

    fn cell(snapshot: &Snapshot, wx: f32, wy: f32, avatar: char) -> char {
        let a = &snapshot.avatar;
        if wx >= a.x && wx < a.x + a.width && wy >= a.y && wy < a.y + a.height {
            return avatar;
        }

        let g = &snapshot.ground;
        if wy >= g.y {
            // Stripe pattern scrolls with the tiles
            let phase = (wx - g.x1).rem_euclid(40.0);
            return if phase < 20.0 { GROUND_A } else { GROUND_B };
        }

        for o in &snapshot.obstacles {
            if wx >= o.x && wx < o.x + o.width && (wy < o.gap_top || wy >= o.gap_bottom) {
                return BARRIER;
            }
        }

        SKY
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(50, 40)
    }
}

impl Renderer for TextRenderer {
    fn draw(&mut self, snapshot: &Snapshot) {
        let cell_w = snapshot.playfield.x / self.cols as f32;
        let cell_h = snapshot.playfield.y / self.rows as f32;
        let avatar = Self::avatar_char(snapshot);

        let mut grid: Vec<Vec<char>> = (0..self.rows)
            .map(|row| {
                let wy = (row as f32 + 0.5) * cell_h;
                (0..self.cols)
                    .map(|col| {
                        let wx = (col as f32 + 0.5) * cell_w;
                        Self::cell(snapshot, wx, wy, avatar)
                    })
                    .collect()
            })
            .collect();

        // Score readout, top-right corner
        let score: Vec<char> = snapshot.score.to_string().chars().collect();
        if score.len() < self.cols {
            let start = self.cols - 1 - score.len();
            grid[0][start..start + score.len()].copy_from_slice(&score);
        }

        self.lines = grid.into_iter().map(|row| row.into_iter().collect()).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::sim::GameSession;

    #[test]
    fn test_frame_dimensions() {
        let session = GameSession::new(SessionConfig::default(), 1).unwrap();
        let mut renderer = TextRenderer::new(25, 20);
        renderer.draw(&session.snapshot());
        assert_eq!(renderer.lines().len(), 20);
        assert!(renderer.lines().iter().all(|l| l.chars().count() == 25));
    }

    #[test]
    fn test_draws_avatar_ground_and_score() {
        let mut session = GameSession::new(SessionConfig::default(), 1).unwrap();
        session.score = 7;
        let mut renderer = TextRenderer::default();
        renderer.draw(&session.snapshot());
        let frame = renderer.frame();
        assert!(frame.contains('^'));
        assert!(renderer.lines()[39].contains(GROUND_A));
        assert!(renderer.lines()[0].ends_with("7 "));
    }

    #[test]
    fn test_barriers_leave_gap() {
        let mut session = GameSession::new(SessionConfig::default(), 1).unwrap();
        session.obstacles.obstacles[0].x = 100.0;
        let mut renderer = TextRenderer::default();
        renderer.draw(&session.snapshot());
        // Column 12 samples x = 125, inside the barrier
        let column: String = renderer.lines().iter().map(|l| l.chars().nth(12).unwrap()).collect();
        assert!(column.contains(BARRIER));
        assert!(column.contains(SKY));
    }
}
