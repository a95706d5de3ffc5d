//! Transports carrying envelopes between peers.
//!
//! A transport broadcasts every envelope to all subscribers of its topic,
//! the sender included, in send order. Delivery is fire-and-forget: nobody
//! waits for acknowledgement and nothing is retried.

use crate::{Envelope, Inbox, SyncError, Topic};
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, trace, warn};

/// Default number of undelivered messages a bus topic buffers per subscriber.
pub const DEFAULT_BUS_CAPACITY: usize = 64;

/// Outbound side of a broadcast transport.
pub trait Transport {
    /// Publishes an envelope on its topic.
    ///
    /// Having no subscribers is not an error.
    fn publish(&self, envelope: &Envelope) -> Result<(), SyncError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn publish(&self, envelope: &Envelope) -> Result<(), SyncError> {
        (**self).publish(envelope)
    }
}

/// In-process broadcast bus with one channel per topic.
///
/// Messages travel as JSON text, so anything published here has been through
/// the same codec a networked transport would use. Clones share the bus.
#[derive(Debug, Clone)]
pub struct LocalBus {
    command: broadcast::Sender<String>,
    cursor_pos: broadcast::Sender<String>,
}

impl LocalBus {
    /// Creates a bus buffering up to `capacity` messages per topic.
    #[instrument]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (command, _) = broadcast::channel(capacity);
        let (cursor_pos, _) = broadcast::channel(capacity);
        info!("Created local bus");
        Self {
            command,
            cursor_pos,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<String> {
        match topic {
            Topic::Command => &self.command,
            Topic::CursorPos => &self.cursor_pos,
        }
    }

    /// Subscribes to one topic. Only messages published afterwards are seen.
    pub fn subscribe(&self, topic: Topic) -> Subscription {
        Subscription {
            topic,
            rx: self.sender(topic).subscribe(),
        }
    }

    /// Publishes raw text on a topic, bypassing the encoder.
    ///
    /// Lets a foreign or misbehaving sender be simulated.
    pub fn publish_raw(&self, topic: Topic, text: impl Into<String>) {
        let _ = self.sender(topic).send(text.into());
    }

    /// Subscribes to both topics and forwards everything into `inbox`.
    ///
    /// Must be called from within a Tokio runtime.
    #[instrument(skip(self, inbox))]
    pub fn attach(&self, inbox: &Inbox) -> Vec<JoinHandle<()>> {
        [Topic::Command, Topic::CursorPos]
            .into_iter()
            .map(|topic| spawn_pump(self.subscribe(topic), inbox.clone()))
            .collect()
    }
}

impl Default for LocalBus {
    fn default() -> Self {
        Self::new(DEFAULT_BUS_CAPACITY)
    }
}

impl Transport for LocalBus {
    #[instrument(skip(self, envelope), fields(topic = %envelope.topic(), origin = envelope.origin()))]
    fn publish(&self, envelope: &Envelope) -> Result<(), SyncError> {
        let text = envelope.encode()?;
        if self.sender(envelope.topic()).send(text).is_err() {
            trace!("No subscribers");
        }
        Ok(())
    }
}

/// Receiving side of one bus topic.
///
/// Undecodable messages and envelopes of the wrong kind for the topic are
/// logged and skipped; they never reach the caller.
#[derive(Debug)]
pub struct Subscription {
    topic: Topic,
    rx: broadcast::Receiver<String>,
}

impl Subscription {
    /// Topic this subscription listens on.
    pub fn topic(&self) -> Topic {
        self.topic
    }

    fn accept(&self, text: &str) -> Option<Envelope> {
        match Envelope::decode(text) {
            Ok(envelope) if envelope.topic() == self.topic => Some(envelope),
            Ok(envelope) => {
                warn!(topic = %self.topic, kind = %envelope.topic(), "Envelope on wrong topic dropped");
                None
            }
            Err(e) => {
                warn!(topic = %self.topic, error = %e, "Undecodable message dropped");
                None
            }
        }
    }

    /// Waits for the next valid envelope. Returns `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<Envelope> {
        loop {
            match self.rx.recv().await {
                Ok(text) => {
                    if let Some(envelope) = self.accept(&text) {
                        return Some(envelope);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(topic = %self.topic, skipped, "Subscriber lagged, messages lost");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Returns the next valid envelope already buffered, without waiting.
    pub fn try_recv(&mut self) -> Option<Envelope> {
        loop {
            match self.rx.try_recv() {
                Ok(text) => {
                    if let Some(envelope) = self.accept(&text) {
                        return Some(envelope);
                    }
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(topic = %self.topic, skipped, "Subscriber lagged, messages lost");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }
}

/// Forwards a subscription into an inbox until either side closes.
pub fn spawn_pump(mut subscription: Subscription, inbox: Inbox) -> JoinHandle<()> {
    tokio::spawn(async move {
        let topic = subscription.topic();
        debug!(%topic, "Pump started");
        while let Some(envelope) = subscription.recv().await {
            if !inbox.deliver(envelope) {
                break;
            }
        }
        debug!(%topic, "Pump stopped");
    })
}
