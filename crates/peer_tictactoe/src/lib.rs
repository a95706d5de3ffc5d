//! Pure tic-tac-toe game engine.
//!
//! Boards are N×N (N ≥ 2), turn order follows a configurable marker cycle,
//! and game phase (in progress, won, drawn) is always derived from the board
//! rather than stored. The engine does no I/O and has no concurrency of its
//! own; synchronizing two engines across processes lives in `peer_sync`.
//!
//! # Example
//!
//! ```
//! use peer_tictactoe::{GameEngine, GameStatus, Marker};
//!
//! let mut game = GameEngine::with_defaults(3);
//! assert!(game.place_marker(1, 1));
//! assert!(!game.place_marker(1, 1));
//! assert_eq!(game.current_marker(), Marker::X);
//! assert_eq!(game.status(), GameStatus::InProgress);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod engine;
mod error;
pub mod invariants;
mod rules;
mod types;

pub use board::{Board, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
pub use engine::{DEFAULT_BOARD_SIZE, DEFAULT_MARKER_CYCLE, GameEngine};
pub use error::{EngineError, EngineErrorKind};
pub use rules::{WinnerResult, calc_winner, is_draw};
pub use types::{Coord, GameStatus, Marker, Placement};
