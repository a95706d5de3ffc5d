//! Authoritative game state and move validation.

use crate::error::{EngineError, EngineErrorKind};
use crate::invariants::{EngineInvariants, InvariantSet};
use crate::rules::{self, WinnerResult};
use crate::{Board, Coord, GameStatus, MAX_BOARD_SIZE, Marker, Placement};
use tracing::{debug, instrument, trace};

/// Board size used by [`GameEngine::default`].
pub const DEFAULT_BOARD_SIZE: usize = 3;

/// Marker rotation used when none is configured.
pub const DEFAULT_MARKER_CYCLE: [Marker; 2] = [Marker::O, Marker::X];

/// One game of tic-tac-toe on an N×N board.
///
/// The engine is the only writer of its board. A failed placement leaves the
/// board, the turn and the history exactly as they were. Starting another game
/// means building a new engine with [`GameEngine::create_new_game`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    board: Board,
    marker_cycle: Vec<Marker>,
    first_marker: Marker,
    current: Marker,
    history: Vec<Placement>,
}

/// Checks a marker cycle and starting marker.
fn validate_cycle(marker_cycle: &[Marker], first_marker: Marker) -> Result<(), EngineError> {
    if marker_cycle.is_empty() {
        return Err(EngineError::new(EngineErrorKind::EmptyMarkerCycle));
    }
    if marker_cycle.contains(&Marker::None) {
        return Err(EngineError::new(EngineErrorKind::NoneInCycle));
    }
    for (i, marker) in marker_cycle.iter().enumerate() {
        if marker_cycle[..i].contains(marker) {
            return Err(EngineError::new(EngineErrorKind::DuplicateMarker(*marker)));
        }
    }
    if !marker_cycle.contains(&first_marker) {
        return Err(EngineError::new(EngineErrorKind::FirstMarkerNotInCycle(
            first_marker,
        )));
    }
    Ok(())
}

impl GameEngine {
    /// Creates a fresh game.
    ///
    /// `board_size` is clamped to at least 2.
    ///
    /// # Errors
    ///
    /// Fails if `board_size` exceeds [`MAX_BOARD_SIZE`], if the cycle is
    /// empty, lists `Marker::None` or a marker twice, or does not contain
    /// `first_marker`.
    #[instrument(skip(marker_cycle))]
    pub fn new(
        board_size: usize,
        marker_cycle: impl Into<Vec<Marker>>,
        first_marker: Marker,
    ) -> Result<Self, EngineError> {
        if board_size > MAX_BOARD_SIZE {
            return Err(EngineError::new(EngineErrorKind::BoardTooLarge(board_size)));
        }
        let marker_cycle = marker_cycle.into();
        validate_cycle(&marker_cycle, first_marker)?;

        let board = Board::new(board_size);
        debug!(size = board.size(), %first_marker, "Created game");
        Ok(Self {
            board,
            marker_cycle,
            first_marker,
            current: first_marker,
            history: Vec::new(),
        })
    }

    /// Creates a game with the default `[O, X]` rotation, O first.
    ///
    /// `board_size` is clamped into the playable range.
    #[instrument]
    pub fn with_defaults(board_size: usize) -> Self {
        Self {
            board: Board::new(board_size),
            marker_cycle: DEFAULT_MARKER_CYCLE.to_vec(),
            first_marker: Marker::O,
            current: Marker::O,
            history: Vec::new(),
        }
    }

    /// Starts another game with the same marker cycle.
    ///
    /// # Errors
    ///
    /// Fails if `first_marker` is not in this engine's cycle.
    #[instrument(skip(self))]
    pub fn create_new_game(
        &self,
        board_size: usize,
        first_marker: Marker,
    ) -> Result<Self, EngineError> {
        Self::new(board_size, self.marker_cycle.clone(), first_marker)
    }

    /// Places the current marker at `(row, col)` and passes the turn on.
    ///
    /// Returns false, changing nothing, if the cell is off the board or
    /// already taken.
    #[instrument(skip(self), fields(marker = %self.current))]
    pub fn place_marker(&mut self, row: usize, col: usize) -> bool {
        let coord = Coord::new(row, col);
        if !self.board.is_empty(coord) {
            trace!(%coord, "Rejected placement");
            return false;
        }

        self.board.set(coord, self.current);
        self.history.push(Placement::new(coord, self.current));
        self.current = self.next_marker();

        debug_assert!(
            EngineInvariants::check_all(self).is_ok(),
            "engine invariants violated after placing at {coord}"
        );
        true
    }

    /// Marker following the current one in the cycle.
    fn next_marker(&self) -> Marker {
        let index = self
            .marker_cycle
            .iter()
            .position(|m| *m == self.current)
            .unwrap_or_default();
        self.marker_cycle[(index + 1) % self.marker_cycle.len()]
    }

    /// Returns true when every cell is taken.
    pub fn board_is_full(&self) -> bool {
        self.board.is_full()
    }

    /// Scans the board for a complete line.
    pub fn calc_winner(&self) -> WinnerResult {
        rules::calc_winner(&self.board)
    }

    /// Derived game phase.
    pub fn status(&self) -> GameStatus {
        match self.calc_winner() {
            WinnerResult::Winner { marker, .. } => GameStatus::Won(marker),
            WinnerResult::NoWinner if self.board_is_full() => GameStatus::Drawn,
            WinnerResult::NoWinner => GameStatus::InProgress,
        }
    }

    /// Marker whose turn it is.
    pub fn current_marker(&self) -> Marker {
        self.current
    }

    /// Edge length of the board after clamping.
    pub fn board_size(&self) -> usize {
        self.board.size()
    }

    /// Owned copy of the board.
    pub fn board_snapshot(&self) -> Board {
        self.board.clone()
    }

    /// Read-only view of the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Configured turn rotation.
    pub fn marker_cycle(&self) -> &[Marker] {
        &self.marker_cycle
    }

    /// Marker that opened this game.
    pub fn first_marker(&self) -> Marker {
        self.first_marker
    }

    /// Successful placements, oldest first.
    pub fn history(&self) -> &[Placement] {
        &self.history
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::with_defaults(DEFAULT_BOARD_SIZE)
    }
}
