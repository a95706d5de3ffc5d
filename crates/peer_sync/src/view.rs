//! What the rendering side reads back each tick.

use peer_tictactoe::{Board, Coord, Marker};
use serde::{Deserialize, Serialize};

/// A pointer position as fractions of the board's width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CursorPos {
    /// Horizontal position in [0, 1].
    pub x: f64,
    /// Vertical position in [0, 1].
    pub y: f64,
}

/// Clamps into [0, 1], mapping NaN to 0.
fn unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

impl CursorPos {
    /// Creates a position, clamping both axes into [0, 1].
    pub fn clamped(x: f64, y: f64) -> Self {
        Self {
            x: unit(x),
            y: unit(y),
        }
    }

    /// Normalizes a pixel position against a square board area of `extent`
    /// pixels per side.
    pub fn from_pixels(px: f64, py: f64, extent: f64) -> Self {
        if extent <= 0.0 {
            return Self::default();
        }
        Self::clamped(px / extent, py / extent)
    }

    /// Board cell under this position on a board of `size` cells per side.
    pub fn cell(&self, size: usize) -> Coord {
        let last = size.saturating_sub(1);
        let index = |v: f64| ((v * size as f64) as usize).min(last);
        Coord::new(index(self.y), index(self.x))
    }
}

/// The three things the status line can say.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum StatusText {
    /// Someone completed a line.
    #[display("Winner: {_0}")]
    Winner(Marker),
    /// Full board, no line.
    #[display("Draw")]
    Draw,
    /// Game continues; this marker moves next.
    #[display("Present: {_0}")]
    Turn(Marker),
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameView {
    /// Copy of the board.
    pub board: Board,
    /// End cells of the winning line, if the game is won.
    pub winner_line: Option<[Coord; 2]>,
    /// Status line content.
    pub status: StatusText,
    /// Identities available for peer selection.
    pub known_peers: Vec<String>,
    /// Selected peer's last reported pointer.
    pub peer_cursor: Option<CursorPos>,
}
