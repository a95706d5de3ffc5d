//! Draw detection.

use super::win::calc_winner;
use crate::Board;
use tracing::instrument;

/// A full board with no complete line.
#[instrument(skip(board))]
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && !calc_winner(board).is_winner()
}
