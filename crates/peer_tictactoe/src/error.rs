//! Engine construction errors.

use crate::Marker;
use derive_more::{Display, Error};
use tracing::instrument;

/// What was wrong with an engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EngineErrorKind {
    /// The marker cycle has no entries.
    #[display("marker cycle is empty")]
    EmptyMarkerCycle,
    /// The empty sentinel was listed as a player.
    #[display("marker cycle contains the empty marker")]
    NoneInCycle,
    /// A player symbol appears more than once.
    #[display("marker {_0} appears more than once in the cycle")]
    DuplicateMarker(Marker),
    /// The starting marker is not part of the cycle.
    #[display("first marker {_0} is not in the cycle")]
    FirstMarkerNotInCycle(Marker),
    /// The requested board edge exceeds [`crate::MAX_BOARD_SIZE`].
    #[display("board size {_0} exceeds the maximum of {}", crate::MAX_BOARD_SIZE)]
    BoardTooLarge(usize),
}

/// Engine error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Engine error: {} at {}:{}", kind, file, line)]
pub struct EngineError {
    /// Error kind.
    pub kind: EngineErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl EngineError {
    /// Creates a new engine error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: EngineErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
