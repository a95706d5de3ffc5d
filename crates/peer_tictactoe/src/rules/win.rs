//! Win detection for boards of any size.

use crate::{Board, Coord, Marker};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Outcome of a winner scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinnerResult {
    /// No complete line on the board.
    NoWinner,
    /// A complete line of `marker`, given by its two end cells.
    Winner {
        /// Marker filling the line.
        marker: Marker,
        /// First and last cell of the line.
        line: [Coord; 2],
    },
}

impl WinnerResult {
    /// Winning marker, if any.
    pub fn marker(&self) -> Option<Marker> {
        match self {
            WinnerResult::NoWinner => None,
            WinnerResult::Winner { marker, .. } => Some(*marker),
        }
    }

    /// End cells of the winning line, if any.
    pub fn line(&self) -> Option<[Coord; 2]> {
        match self {
            WinnerResult::NoWinner => None,
            WinnerResult::Winner { line, .. } => Some(*line),
        }
    }

    /// Returns true when a line is complete.
    pub fn is_winner(&self) -> bool {
        matches!(self, WinnerResult::Winner { .. })
    }
}

/// Marker shared by every cell in `cells`, unless one is empty or they differ.
fn uniform(board: &Board, mut cells: impl Iterator<Item = Coord>) -> Option<Marker> {
    let first = board[cells.next()?];
    if first.is_none() {
        return None;
    }
    cells.all(|c| board[c] == first).then_some(first)
}

/// Scans for a complete line.
///
/// Rows are checked top to bottom, then columns left to right, then the main
/// diagonal, then the anti-diagonal. The first complete line is reported.
#[instrument(skip(board), fields(size = board.size()))]
pub fn calc_winner(board: &Board) -> WinnerResult {
    let n = board.size();
    let last = n - 1;

    for row in 0..n {
        if let Some(marker) = uniform(board, (0..n).map(|col| Coord::new(row, col))) {
            return WinnerResult::Winner {
                marker,
                line: [Coord::new(row, 0), Coord::new(row, last)],
            };
        }
    }

    for col in 0..n {
        if let Some(marker) = uniform(board, (0..n).map(|row| Coord::new(row, col))) {
            return WinnerResult::Winner {
                marker,
                line: [Coord::new(0, col), Coord::new(last, col)],
            };
        }
    }

    if let Some(marker) = uniform(board, (0..n).map(|i| Coord::new(i, i))) {
        return WinnerResult::Winner {
            marker,
            line: [Coord::new(0, 0), Coord::new(last, last)],
        };
    }

    if let Some(marker) = uniform(board, (0..n).map(|i| Coord::new(i, last - i))) {
        return WinnerResult::Winner {
            marker,
            line: [Coord::new(0, last), Coord::new(last, 0)],
        };
    }

    WinnerResult::NoWinner
}
