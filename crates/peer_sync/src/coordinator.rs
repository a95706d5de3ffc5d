//! Keeps the local game in step with one remote peer.

use crate::{
    CursorEnvelope, CursorPos, Envelope, GameView, Inbox, InputSource, KnownPeers, MoveEnvelope,
    StatusText, SyncConfig, SyncError, Transport,
};
use peer_tictactoe::{Board, Coord, GameEngine, Marker, WinnerResult};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, trace, warn};

/// What happened to a remote move.
///
/// Only `Applied` changes the game; every other outcome is a silent drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum RemoteMoveOutcome {
    /// Placed on the local board.
    Applied,
    /// Our own broadcast coming back.
    SelfEcho,
    /// Sent by someone other than the selected peer.
    UnselectedPeer,
    /// The game is already won or drawn.
    GameOver,
    /// The claimed marker is not the one whose turn it is.
    OutOfTurn,
    /// The engine refused the cell (taken or off the board).
    Rejected,
}

/// Mediates between local input, the game engine and the bus.
///
/// All engine mutation goes through `&mut self`, and inbound envelopes only
/// reach the engine when the owner drains the inbox, so a coordinator driven
/// from one loop never sees concurrent writers.
pub struct SyncCoordinator<T> {
    engine: GameEngine,
    transport: T,
    local_id: String,
    peer_id: String,
    known_peers: KnownPeers,
    winner_line: Option<[Coord; 2]>,
    peer_cursor: Option<CursorPos>,
    inbox: Inbox,
    inbound: mpsc::UnboundedReceiver<Envelope>,
}

impl<T: Transport> SyncCoordinator<T> {
    /// Creates a coordinator with a fresh game built from `config`.
    ///
    /// # Errors
    ///
    /// Fails if the configured marker cycle or first marker is invalid.
    #[instrument(skip(config, transport), fields(local_id = %config.local_id(), peer_id = %config.peer_id()))]
    pub fn new(config: &SyncConfig, transport: T) -> Result<Self, SyncError> {
        let engine = GameEngine::new(
            *config.board_size(),
            config.marker_cycle().clone(),
            *config.first_marker(),
        )?;
        let (inbox, inbound) = Inbox::channel();
        info!(board_size = engine.board_size(), "Coordinator ready");
        Ok(Self {
            engine,
            transport,
            local_id: config.local_id().clone(),
            peer_id: config.peer_id().clone(),
            known_peers: KnownPeers::new(),
            winner_line: None,
            peer_cursor: None,
            inbox,
            inbound,
        })
    }

    /// Producer handle for inbound envelopes.
    pub fn inbox(&self) -> Inbox {
        self.inbox.clone()
    }

    /// Local identity tag stamped on outgoing envelopes.
    pub fn local_id(&self) -> &str {
        &self.local_id
    }

    /// Changes the local identity tag.
    #[instrument(skip(self, id))]
    pub fn set_local_id(&mut self, id: impl Into<String>) {
        self.local_id = id.into();
        info!(local_id = %self.local_id, "Local identity changed");
    }

    /// Identity whose envelopes are applied.
    pub fn peer_id(&self) -> &str {
        &self.peer_id
    }

    /// Selects the peer whose envelopes are applied.
    #[instrument(skip(self, id))]
    pub fn select_peer(&mut self, id: impl Into<String>) {
        self.peer_id = id.into();
        info!(peer_id = %self.peer_id, "Peer selected");
    }

    /// Read-only access to the game.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Owned copy of the board.
    pub fn board_snapshot(&self) -> Board {
        self.engine.board_snapshot()
    }

    /// Transport used for outbound envelopes.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Identities seen on the move topic.
    pub fn known_peers(&self) -> &[String] {
        self.known_peers.ids()
    }

    /// Selected peer's last pointer position.
    pub fn peer_cursor(&self) -> Option<CursorPos> {
        self.peer_cursor
    }

    /// Winning line cached by the last refresh.
    pub fn winner_line(&self) -> Option<[Coord; 2]> {
        self.winner_line
    }

    fn is_over(&self) -> bool {
        self.engine.calc_winner().is_winner() || self.engine.board_is_full()
    }

    fn publish(&self, envelope: Envelope) {
        if let Err(e) = self.transport.publish(&envelope) {
            warn!(error = %e, topic = %envelope.topic(), "Publish failed");
        }
    }

    /// Plays a local move and broadcasts it.
    ///
    /// Returns true if the move was placed. Nothing is published for a move
    /// that was not placed, or once the game is won or full.
    #[instrument(skip(self), fields(local_id = %self.local_id))]
    pub fn submit_local_move(&mut self, row: usize, col: usize) -> bool {
        if self.is_over() {
            debug!("Game over, local move ignored");
            return false;
        }

        let mover = self.engine.current_marker();
        if !self.engine.place_marker(row, col) {
            debug!("Local move rejected");
            return false;
        }

        info!(%mover, "Local move placed");
        self.publish(MoveEnvelope::now(self.local_id.clone(), row, col, mover).into());
        true
    }

    /// Replays a peer's move into the local game if it is legal now.
    #[instrument(skip(self, envelope), fields(origin = %envelope.origin, row = envelope.row, col = envelope.col, marker = %envelope.marker))]
    pub fn on_remote_move(&mut self, envelope: &MoveEnvelope) -> RemoteMoveOutcome {
        self.known_peers.observe(&envelope.origin, &self.local_id);

        let outcome = if envelope.origin == self.local_id {
            RemoteMoveOutcome::SelfEcho
        } else if envelope.origin != self.peer_id {
            RemoteMoveOutcome::UnselectedPeer
        } else if self.is_over() {
            RemoteMoveOutcome::GameOver
        } else if envelope.marker != self.engine.current_marker() {
            RemoteMoveOutcome::OutOfTurn
        } else if self.engine.place_marker(envelope.row, envelope.col) {
            RemoteMoveOutcome::Applied
        } else {
            RemoteMoveOutcome::Rejected
        };

        match outcome {
            RemoteMoveOutcome::Applied => info!("Remote move applied"),
            RemoteMoveOutcome::SelfEcho => trace!(%outcome, "Remote move dropped"),
            _ => debug!(%outcome, "Remote move dropped"),
        }
        outcome
    }

    /// Stores the selected peer's pointer. Returns true if it was stored.
    pub fn on_remote_cursor(&mut self, envelope: &CursorEnvelope) -> bool {
        if envelope.origin != self.peer_id {
            return false;
        }
        self.peer_cursor = Some(CursorPos::clamped(envelope.x, envelope.y));
        true
    }

    /// Routes one inbound envelope to its handler.
    pub fn dispatch(&mut self, envelope: Envelope) {
        match envelope {
            Envelope::Move(m) => {
                self.on_remote_move(&m);
            }
            Envelope::Cursor(c) => {
                self.on_remote_cursor(&c);
            }
        }
    }

    /// Applies everything queued in the inbox. Returns how many were handled.
    pub fn drain_inbox(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(envelope) = self.inbound.try_recv() {
            self.dispatch(envelope);
            handled += 1;
        }
        handled
    }

    /// Broadcasts the local pointer.
    pub fn publish_cursor(&self, pos: CursorPos) {
        self.publish(CursorEnvelope::now(self.local_id.clone(), pos.x, pos.y).into());
    }

    /// Discards the current game and starts a fresh one.
    ///
    /// The marker cycle carries over. The cached winning line and the peer
    /// cursor are cleared.
    ///
    /// # Errors
    ///
    /// Fails if `first_marker` is not in the marker cycle; the current game
    /// is kept in that case.
    #[instrument(skip(self))]
    pub fn new_game(&mut self, board_size: usize, first_marker: Marker) -> Result<(), SyncError> {
        self.engine = self.engine.create_new_game(board_size, first_marker)?;
        self.winner_line = None;
        self.peer_cursor = None;
        info!(board_size = self.engine.board_size(), "New game started");
        Ok(())
    }

    /// Status line content.
    pub fn status_text(&self) -> StatusText {
        match self.engine.calc_winner() {
            WinnerResult::Winner { marker, .. } => StatusText::Winner(marker),
            WinnerResult::NoWinner if self.engine.board_is_full() => StatusText::Draw,
            WinnerResult::NoWinner => StatusText::Turn(self.engine.current_marker()),
        }
    }

    /// Recomputes the winner and caches its line.
    pub fn refresh_winner(&mut self) {
        if let Some(line) = self.engine.calc_winner().line() {
            self.winner_line = Some(line);
        }
    }

    /// Picks up identity changes made through the input source.
    fn sync_identities<I: InputSource + ?Sized>(&mut self, input: &I) {
        if let Some(id) = input.local_id().filter(|id| *id != self.local_id) {
            self.set_local_id(id);
        }
        if let Some(id) = input.peer_id().filter(|id| *id != self.peer_id) {
            self.select_peer(id);
        }
    }

    /// Runs one tick of the game loop and returns the resulting view.
    ///
    /// In order: identity and new-game input, winner refresh, at most one
    /// local click, every queued inbound envelope, then the local pointer.
    #[instrument(skip_all, level = "trace")]
    pub fn tick<I: InputSource + ?Sized>(&mut self, input: &I) -> GameView {
        self.sync_identities(input);

        if let Some(request) = input.take_new_game() {
            // A click aimed at the old board must not land on the new one.
            input.take_click();
            if let Err(e) = self.new_game(request.board_size, request.first_marker) {
                warn!(error = %e, "New game request rejected");
            }
        }

        self.refresh_winner();

        if !self.is_over()
            && let Some(click) = input.take_click()
        {
            self.submit_local_move(click.row, click.col);
        }

        self.drain_inbox();

        if let Some(pos) = input.pointer() {
            self.publish_cursor(pos);
        }

        self.refresh_winner();
        self.view()
    }

    /// Everything a renderer needs right now.
    pub fn view(&self) -> GameView {
        GameView {
            board: self.engine.board_snapshot(),
            winner_line: self.winner_line,
            status: self.status_text(),
            known_peers: self.known_peers.ids().to_vec(),
            peer_cursor: self.peer_cursor,
        }
    }
}
