//! Single-consumer queue of inbound envelopes.

use crate::Envelope;
use tokio::sync::mpsc;
use tracing::trace;

/// Sending half handed to transport subscriptions.
///
/// Any number of producers may deliver concurrently; only the coordinator
/// owning the matching receiver applies what arrives, so the game engine is
/// never written from two places at once.
#[derive(Debug, Clone)]
pub struct Inbox {
    tx: mpsc::UnboundedSender<Envelope>,
}

impl Inbox {
    /// Creates a connected inbox and receiver.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Envelope>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Queues an envelope. Returns false once the coordinator is gone.
    pub fn deliver(&self, envelope: Envelope) -> bool {
        trace!(origin = envelope.origin(), topic = %envelope.topic(), "Queued envelope");
        self.tx.send(envelope).is_ok()
    }

    /// Returns true once the receiving coordinator has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
