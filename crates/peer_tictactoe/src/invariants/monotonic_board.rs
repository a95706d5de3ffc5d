//! Monotonic board invariant: cells never change once set.

use super::Invariant;
use crate::{Board, GameEngine};

/// Invariant: replaying the history onto an empty board reproduces the board.
///
/// A placement onto a filled cell during replay, or any cell that differs
/// afterwards, means a cell was overwritten or written outside the engine.
pub struct MonotonicBoardInvariant;

impl Invariant<GameEngine> for MonotonicBoardInvariant {
    fn holds(game: &GameEngine) -> bool {
        let mut replayed = Board::new(game.board_size());
        for placement in game.history() {
            if !replayed.is_empty(placement.coord) {
                return false;
            }
            replayed.set(placement.coord, placement.marker);
        }
        replayed == *game.board()
    }

    fn description() -> &'static str {
        "Board cells are monotonic (never overwritten)"
    }
}
