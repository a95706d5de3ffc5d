//! Peer synchronization for a shared tic-tac-toe game.
//!
//! Two processes each own a [`peer_tictactoe::GameEngine`]. Local moves are
//! applied first and then broadcast; moves heard on the bus are replayed only
//! when they come from the selected peer and are legal right now. Pointer
//! positions are broadcast every tick for a shared cursor overlay.
//!
//! # Architecture
//!
//! - **Envelopes**: move and cursor messages tagged with the sender identity
//! - **Transport**: broadcast publish trait plus an in-process bus
//! - **Coordinator**: identity filtering, turn checks, status and view
//! - **Game loop**: fixed-rate ticking with a single writer
//!
//! # Example
//!
//! ```
//! use peer_sync::{LocalBus, SyncConfig, SyncCoordinator, Topic};
//!
//! let bus = LocalBus::default();
//! let mut moves = bus.subscribe(Topic::Command);
//! let mut alice = SyncCoordinator::new(&SyncConfig::new("alice", "bob"), bus.clone())?;
//!
//! assert!(alice.submit_local_move(1, 1));
//! assert!(moves.try_recv().is_some());
//! # Ok::<(), peer_sync::SyncError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod coordinator;
mod envelope;
mod error;
mod game_loop;
mod inbox;
mod input;
mod peers;
mod transport;
mod view;

pub use config::SyncConfig;
pub use coordinator::{RemoteMoveOutcome, SyncCoordinator};
pub use envelope::{CursorEnvelope, Envelope, MoveEnvelope, Topic};
pub use error::SyncError;
pub use game_loop::GameLoop;
pub use inbox::Inbox;
pub use input::{InputSource, NewGameRequest, SharedInput};
pub use peers::KnownPeers;
pub use transport::{DEFAULT_BUS_CAPACITY, LocalBus, Subscription, Transport, spawn_pump};
pub use view::{CursorPos, GameView, StatusText};
