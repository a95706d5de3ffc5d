//! History consistency invariant: history and board agree on size.

use super::Invariant;
use crate::GameEngine;

/// Invariant: one history entry per occupied cell, each on the board.
pub struct HistoryConsistentInvariant;

impl Invariant<GameEngine> for HistoryConsistentInvariant {
    fn holds(game: &GameEngine) -> bool {
        let board = game.board();
        game.history().len() == board.occupied()
            && game.history().iter().all(|p| board.in_bounds(p.coord))
    }

    fn description() -> &'static str {
        "Move history matches occupied cells"
    }
}
