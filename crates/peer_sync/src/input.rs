//! Input coming from the UI side.
//!
//! The UI writes into an [`InputSource`] whenever it likes; the game loop
//! reads it once per tick. One-shot inputs (a click, a new-game request) are
//! taken, so each is seen by at most one tick.

use crate::CursorPos;
use peer_tictactoe::{Coord, Marker};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, instrument};

/// Parameters of a requested new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_new::new)]
pub struct NewGameRequest {
    /// Board edge length.
    pub board_size: usize,
    /// Marker that moves first.
    pub first_marker: Marker,
}

/// Source of local input for the coordinator.
pub trait InputSource {
    /// Takes the pending new-game request, if any.
    fn take_new_game(&self) -> Option<NewGameRequest>;

    /// Takes the pending clicked cell, if any.
    fn take_click(&self) -> Option<Coord>;

    /// Current pointer position, if the pointer is known.
    fn pointer(&self) -> Option<CursorPos>;

    /// Local identity tag as currently entered by the user.
    fn local_id(&self) -> Option<String>;

    /// Peer identity tag as currently selected by the user.
    fn peer_id(&self) -> Option<String>;
}

#[derive(Debug, Default)]
struct InputState {
    new_game: Option<NewGameRequest>,
    click: Option<Coord>,
    pointer: Option<CursorPos>,
    local_id: Option<String>,
    peer_id: Option<String>,
}

/// Thread-safe input slot a UI thread writes into.
///
/// Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct SharedInput {
    state: Arc<Mutex<InputState>>,
}

impl SharedInput {
    /// Creates an empty input slot.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, InputState> {
        // Every write is a single assignment, so a poisoned lock still holds consistent state.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records a click, replacing any click not yet taken.
    #[instrument(skip(self))]
    pub fn click(&self, row: usize, col: usize) {
        debug!("Cell clicked");
        self.lock().click = Some(Coord::new(row, col));
    }

    /// Records the pointer position, clamped into [0, 1].
    pub fn move_pointer(&self, x: f64, y: f64) {
        self.lock().pointer = Some(CursorPos::clamped(x, y));
    }

    /// Forgets the pointer, e.g. when it leaves the board.
    pub fn clear_pointer(&self) {
        self.lock().pointer = None;
    }

    /// Requests a new game.
    #[instrument(skip(self))]
    pub fn request_new_game(&self, board_size: usize, first_marker: Marker) {
        self.lock().new_game = Some(NewGameRequest::new(board_size, first_marker));
    }

    /// Sets the local identity tag.
    pub fn set_local_id(&self, id: impl Into<String>) {
        self.lock().local_id = Some(id.into());
    }

    /// Selects the peer identity tag.
    pub fn select_peer(&self, id: impl Into<String>) {
        self.lock().peer_id = Some(id.into());
    }
}

impl InputSource for SharedInput {
    fn take_new_game(&self) -> Option<NewGameRequest> {
        self.lock().new_game.take()
    }

    fn take_click(&self) -> Option<Coord> {
        self.lock().click.take()
    }

    fn pointer(&self) -> Option<CursorPos> {
        self.lock().pointer
    }

    fn local_id(&self) -> Option<String> {
        self.lock().local_id.clone()
    }

    fn peer_id(&self) -> Option<String> {
        self.lock().peer_id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_taken_once() {
        let input = SharedInput::new();
        input.click(1, 2);
        assert_eq!(input.take_click(), Some(Coord::new(1, 2)));
        assert_eq!(input.take_click(), None);
    }

    #[test]
    fn test_latest_click_wins() {
        let input = SharedInput::new();
        input.click(0, 0);
        input.click(2, 2);
        assert_eq!(input.take_click(), Some(Coord::new(2, 2)));
    }

    #[test]
    fn test_pointer_clamped_and_cleared() {
        let input = SharedInput::new();
        assert_eq!(input.pointer(), None);
        input.move_pointer(1.2, -3.0);
        assert_eq!(input.pointer(), Some(CursorPos { x: 1.0, y: 0.0 }));
        input.clear_pointer();
        assert_eq!(input.pointer(), None);
    }

    #[test]
    fn test_clones_share_state() {
        let ui = SharedInput::new();
        let game_side = ui.clone();
        ui.request_new_game(4, Marker::X);
        ui.select_peer("bob");
        assert_eq!(game_side.take_new_game(), Some(NewGameRequest::new(4, Marker::X)));
        assert_eq!(game_side.take_new_game(), None);
        assert_eq!(game_side.peer_id().as_deref(), Some("bob"));
    }
}
