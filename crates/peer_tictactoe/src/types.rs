//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};

/// Symbol occupying a board cell.
///
/// `None` is the empty sentinel. The player symbols are ordered, but turn
/// order is defined by the engine's marker cycle, not by this declaration.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
pub enum Marker {
    /// Empty cell.
    #[default]
    None,
    /// Player O.
    O,
    /// Player X.
    X,
}

impl Marker {
    /// Returns true for the empty sentinel.
    pub fn is_none(self) -> bool {
        self == Marker::None
    }

    /// Returns true for a player symbol.
    pub fn is_player(self) -> bool {
        self != Marker::None
    }

    /// Player symbols only, in declaration order.
    pub fn players() -> impl Iterator<Item = Marker> {
        <Marker as strum::IntoEnumIterator>::iter().filter(|m| m.is_player())
    }
}

/// A cell coordinate on the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("({row}, {col})")]
pub struct Coord {
    /// Row index, top to bottom.
    pub row: usize,
    /// Column index, left to right.
    pub col: usize,
}

impl Coord {
    /// Creates a coordinate.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// A successful placement, as recorded in the engine history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Where the marker went.
    pub coord: Coord,
    /// Who placed it.
    pub marker: Marker,
}

impl Placement {
    /// Creates a placement record.
    pub const fn new(coord: Coord, marker: Marker) -> Self {
        Self { coord, marker }
    }
}

/// Derived state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Moves can still be made.
    InProgress,
    /// A line was completed by the given marker.
    Won(Marker),
    /// Board is full with no completed line.
    Drawn,
}

impl GameStatus {
    /// Returns true once the game is won or drawn.
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}
