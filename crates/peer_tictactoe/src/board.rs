//! Square N×N board.

use super::types::{Coord, Marker};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use tracing::instrument;

/// Smallest playable board edge.
pub const MIN_BOARD_SIZE: usize = 2;

/// Largest board edge a game accepts.
pub const MAX_BOARD_SIZE: usize = 64;

/// Square board of markers stored row-major.
///
/// Only the engine can write cells. Everything handed out to callers is
/// either a shared reference or an owned copy, so a cell can never be reset
/// from outside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Marker>,
}

impl Board {
    /// Creates an empty board, clamping the edge into
    /// [`MIN_BOARD_SIZE`]..=[`MAX_BOARD_SIZE`].
    #[instrument]
    pub fn new(size: usize) -> Self {
        let size = size.clamp(MIN_BOARD_SIZE, MAX_BOARD_SIZE);
        Self {
            size,
            cells: vec![Marker::None; size * size],
        }
    }

    /// Builds a board from explicit rows.
    ///
    /// Returns `None` unless `rows` is square with an edge of at least
    /// [`MIN_BOARD_SIZE`].
    pub fn from_rows(rows: &[Vec<Marker>]) -> Option<Self> {
        let size = rows.len();
        if size < MIN_BOARD_SIZE || rows.iter().any(|r| r.len() != size) {
            return None;
        }
        Some(Self {
            size,
            cells: rows.iter().flatten().copied().collect(),
        })
    }

    /// Edge length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true if the coordinate lies on the board.
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    /// Marker at `coord`, or `None` (the option) when out of range.
    pub fn get(&self, coord: Coord) -> Option<Marker> {
        self.in_bounds(coord)
            .then(|| self.cells[coord.row * self.size + coord.col])
    }

    /// Returns true if `coord` is on the board and still empty.
    pub fn is_empty(&self, coord: Coord) -> bool {
        self.get(coord) == Some(Marker::None)
    }

    /// Returns true when no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|m| m.is_player())
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|m| m.is_player()).count()
    }

    /// Rows as slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Marker]> {
        self.cells.chunks(self.size)
    }

    /// Copies the board into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<Marker>> {
        self.rows().map(<[Marker]>::to_vec).collect()
    }

    /// Writes a marker without any rule checks.
    ///
    /// Callers must have checked bounds.
    pub(crate) fn set(&mut self, coord: Coord, marker: Marker) {
        let index = coord.row * self.size + coord.col;
        self.cells[index] = marker;
    }
}

impl Index<Coord> for Board {
    type Output = Marker;

    fn index(&self, coord: Coord) -> &Self::Output {
        &self.cells[coord.row * self.size + coord.col]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = vec!["-"; self.size].join("+");
        for (r, row) in self.rows().enumerate() {
            if r > 0 {
                writeln!(f)?;
                writeln!(f, "{rule}")?;
            }
            let line: Vec<&str> = row
                .iter()
                .map(|m| match m {
                    Marker::None => " ",
                    Marker::O => "O",
                    Marker::X => "X",
                })
                .collect();
            write!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}
